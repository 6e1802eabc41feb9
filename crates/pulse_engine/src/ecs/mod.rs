//! Entity-Component-System implementation
//!
//! Provides the entity and component storage that scripts are bound to.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;

pub use world::World;
pub use entity::{Entity, EntityId};
pub use component::Component;
