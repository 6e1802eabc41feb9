//! Script runtime
//!
//! Behavior scripts are host-controlled: the [`ScriptEngine`] owns every
//! instance and calls into it at well-defined points of the frame. A script
//! never reaches the world directly; it goes through the [`ScriptContext`]
//! it is handed for the duration of a callback.

mod context;
mod engine;
pub mod fields;
mod registry;

pub use context::ScriptContext;
pub use engine::ScriptEngine;
pub use fields::{ScriptFieldMap, ScriptFieldType, ScriptFieldValue};
pub use registry::{ScriptFactory, ScriptRegistry};

use crate::ecs::EntityId;
use crate::foundation::time::FrameTime;
use thiserror::Error;

/// Behavior attached to a single entity
pub trait Script: Send {
    /// Called once, when the script's entity becomes active
    fn on_create(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError>;

    /// Called once per frame with the elapsed frame time
    fn on_update(&mut self, ctx: &mut ScriptContext<'_>, frame_time: FrameTime) -> Result<(), ScriptError>;

    /// Called when the runtime stops while the entity is still alive
    fn on_destroy(&mut self, _ctx: &mut ScriptContext<'_>) {}

    /// Current values of the script's editable fields
    fn fields(&self) -> ScriptFieldMap {
        ScriptFieldMap::new()
    }

    /// Overwrite an editable field
    fn set_field(&mut self, name: &str, _value: ScriptFieldValue) -> Result<(), ScriptError> {
        Err(ScriptError::UnknownField(name.to_string()))
    }
}

/// Script errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    /// Lookup by name found nothing
    #[error("Entity '{0}' not found")]
    EntityNotFound(String),

    /// Handle refers to an entity that no longer exists
    #[error("Entity has been destroyed")]
    EntityDestroyed,

    /// Entity lacks a required component
    #[error("Entity {entity} has no {component}")]
    MissingComponent {
        /// Entity that was queried
        entity: EntityId,
        /// Component type name
        component: &'static str,
    },

    /// No script class registered under this name
    #[error("Unknown script class: {0}")]
    UnknownScript(String),

    /// Script has no field with this name
    #[error("Unknown script field: {0}")]
    UnknownField(String),

    /// Field exists but the value has another type
    #[error("Field '{field}' expects {expected}, got {found}")]
    FieldTypeMismatch {
        /// Field name
        field: String,
        /// Declared type
        expected: ScriptFieldType,
        /// Type of the rejected value
        found: ScriptFieldType,
    },

    /// Entity has no live script instance
    #[error("Entity has no running script")]
    NoRunningScript,

    /// Update ran before creation resolved the script's references
    #[error("Script used before initialization: {0}")]
    NotInitialized(&'static str),
}
