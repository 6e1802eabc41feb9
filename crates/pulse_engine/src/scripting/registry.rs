//! Script class registry

use std::collections::HashMap;

use super::{Script, ScriptError};
use crate::scripts::player2d::{Player2D, PlayerConfig};

/// Constructs a fresh script instance
pub type ScriptFactory = Box<dyn Fn() -> Box<dyn Script> + Send + Sync>;

/// Maps script class names to factories
#[derive(Default)]
pub struct ScriptRegistry {
    factories: HashMap<String, ScriptFactory>,
}

impl ScriptRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every script shipped by the engine, using default configs
    pub fn with_builtin_scripts() -> Self {
        let mut registry = Self::new();
        registry.register_builtin_scripts(&PlayerConfig::default());
        registry
    }

    /// Register the engine's own scripts
    pub fn register_builtin_scripts(&mut self, player: &PlayerConfig) {
        let player = player.clone();
        self.register(Player2D::CLASS_NAME, move || Box::new(Player2D::new(player.clone())));
    }

    /// Register a script class. A later registration under the same name wins.
    pub fn register<F>(&mut self, class_name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Script> + Send + Sync + 'static,
    {
        let class_name = class_name.into();
        if self.factories.insert(class_name.clone(), Box::new(factory)).is_some() {
            log::warn!("Script class '{}' re-registered", class_name);
        } else {
            log::debug!("Registered script class '{}'", class_name);
        }
    }

    /// Register a script class built with `Default`
    pub fn register_default<S>(&mut self, class_name: impl Into<String>)
    where
        S: Script + Default + 'static,
    {
        self.register(class_name, || Box::new(S::default()));
    }

    /// Whether a class is registered
    pub fn contains(&self, class_name: &str) -> bool {
        self.factories.contains_key(class_name)
    }

    /// Create a new instance of a class
    pub fn instantiate(&self, class_name: &str) -> Result<Box<dyn Script>, ScriptError> {
        self.factories
            .get(class_name)
            .map(|factory| factory())
            .ok_or_else(|| ScriptError::UnknownScript(class_name.to_string()))
    }

    /// Registered class names, sorted
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::time::FrameTime;
    use crate::scripting::ScriptContext;

    #[derive(Default)]
    struct Idle;

    impl Script for Idle {
        fn on_create(&mut self, _ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
            Ok(())
        }

        fn on_update(&mut self, _ctx: &mut ScriptContext<'_>, _frame_time: FrameTime) -> Result<(), ScriptError> {
            Ok(())
        }
    }

    #[test]
    fn test_builtin_scripts() {
        let registry = ScriptRegistry::with_builtin_scripts();
        assert!(registry.contains("Player2D"));
        assert!(registry.instantiate("Player2D").is_ok());
    }

    #[test]
    fn test_unknown_class() {
        let registry = ScriptRegistry::new();
        assert_eq!(
            registry.instantiate("Nope").err(),
            Some(ScriptError::UnknownScript("Nope".into()))
        );
    }

    #[test]
    fn test_class_names_sorted() {
        let mut registry = ScriptRegistry::with_builtin_scripts();
        registry.register_default::<Idle>("Idle");
        assert_eq!(registry.class_names(), vec!["Idle", "Player2D"]);
    }
}
