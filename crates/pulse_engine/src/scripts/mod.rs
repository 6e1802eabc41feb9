//! Scripts shipped with the engine

pub mod player2d;
