//! Script component
//!
//! Marks an entity as scripted. The script engine reads this at runtime start
//! to decide which script class to instantiate for the entity.

use crate::ecs::Component;
use crate::scripting::ScriptFieldValue;

/// Binds a script class to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptComponent {
    /// Registered script class name
    pub class_name: String,

    /// Field values applied to the instance before its creation callback
    pub field_overrides: Vec<(String, ScriptFieldValue)>,
}

impl Component for ScriptComponent {}

impl ScriptComponent {
    /// Bind the named script class with no overrides
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            field_overrides: Vec::new(),
        }
    }

    /// Builder pattern: Override a script field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<ScriptFieldValue>) -> Self {
        self.field_overrides.push((name.into(), value.into()));
        self
    }
}
