//! # Pulse Engine
//!
//! A small scriptable 2D scene host. The engine owns entities, components,
//! keyboard state and the frame loop; behavior scripts attached to entities
//! receive a creation callback and a per-frame update callback.
//!
//! ## Features
//!
//! - **ECS World**: generational entity handles with typed component storage
//! - **Scripting**: `Script` trait objects bound to entities by class name
//! - **Script Fields**: typed, overridable per-instance script parameters
//! - **Configuration**: TOML and RON config files through `serde`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pulse_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(EngineConfig::default());
//!
//!     let world = engine.world_mut();
//!     let player = world.create_entity("Player");
//!     world.add_component(player, TransformComponent::default());
//!     world.add_component(player, Rigidbody2DComponent::dynamic());
//!     world.add_component(player, ScriptComponent::new("Player2D"));
//!     let camera = world.create_entity("Camera");
//!     world.add_component(camera, TransformComponent::default());
//!
//!     engine.start()?;
//!     engine.input_mut().press(KeyCode::D);
//!     engine.tick(FrameTime::from_secs_f32(1.0 / 60.0))?;
//!     engine.stop();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod input;
pub mod scripting;
pub mod scripts;

mod engine;

pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineConfig, EngineError,
        config::{Config, ConfigError},
        foundation::{
            math::{Vec2, Vec3, Quat},
            time::{FrameTime, Timer},
        },
        ecs::{
            World, Entity, EntityId, Component,
            components::{TransformComponent, Rigidbody2DComponent, BodyType, ScriptComponent},
        },
        input::{InputManager, KeyCode, KeyState},
        scripting::{Script, ScriptContext, ScriptEngine, ScriptError, ScriptFieldValue, ScriptRegistry},
        scripts::player2d::{Player2D, PlayerConfig, KeyBindings},
    };
}
