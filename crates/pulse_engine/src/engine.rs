//! Core engine implementation
//!
//! A headless host: it owns the world, keyboard state and script runtime and
//! advances them one frame at a time. Windowing and rendering live outside.

use crate::{
    config::{Config, ConfigError},
    ecs::{Entity, World},
    foundation::time::{FrameTime, Timer},
    input::InputManager,
    scripting::{ScriptEngine, ScriptError, ScriptRegistry},
    scripts::player2d::PlayerConfig,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main engine struct
///
/// The engine coordinates all subsystems and manages the frame loop.
pub struct Engine {
    /// ECS world containing all entities and components
    world: World,

    /// Keyboard state fed by the host
    input: InputManager,

    /// Script classes available to entities
    registry: ScriptRegistry,

    /// Live script instances
    scripts: ScriptEngine,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the runtime has been started
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Self {
        log::info!("Initializing engine...");

        let mut registry = ScriptRegistry::new();
        registry.register_builtin_scripts(&config.player);

        Self {
            world: World::new(),
            input: InputManager::new(),
            registry,
            scripts: ScriptEngine::new(),
            timer: Timer::new(),
            config,
            running: false,
        }
    }

    /// Create an engine from a TOML or RON config file
    pub fn from_config_file(path: impl AsRef<std::path::Path>) -> Result<Self, EngineError> {
        Ok(Self::new(EngineConfig::load_from_file(path)?))
    }

    /// Start the runtime: instantiate and create every bound script
    ///
    /// Returns the number of scripts that started.
    pub fn start(&mut self) -> Result<usize, EngineError> {
        if self.running {
            return Err(EngineError::AlreadyRunning);
        }
        log::info!("Starting runtime with {} entities", self.world.entity_count());

        let started = self.scripts.on_runtime_start(&mut self.world, &self.input, &self.registry);
        self.timer = Timer::new();
        self.running = true;
        Ok(started)
    }

    /// Advance one frame
    pub fn tick(&mut self, frame_time: FrameTime) -> Result<(), EngineError> {
        if !self.running {
            return Err(EngineError::NotRunning);
        }
        self.timer.advance(frame_time);
        self.scripts.on_update(&mut self.world, &self.input, frame_time);
        Ok(())
    }

    /// Start the script of an entity bound after the runtime started
    pub fn spawn_script(&mut self, entity: Entity) -> Result<(), EngineError> {
        if !self.running {
            return Err(EngineError::NotRunning);
        }
        self.scripts.instantiate(entity, &mut self.world, &self.input, &self.registry)?;
        Ok(())
    }

    /// Run `frames` fixed-step frames, letting `drive_input` set key state before each
    pub fn run_frames<F>(&mut self, frames: u64, mut drive_input: F) -> Result<(), EngineError>
    where
        F: FnMut(u64, &mut InputManager),
    {
        let step = FrameTime::from_secs_f32(self.config.fixed_time_step);
        for frame in 0..frames {
            drive_input(frame, &mut self.input);
            self.tick(step)?;
        }
        Ok(())
    }

    /// Stop the runtime and drop every script instance
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.scripts.on_runtime_stop(&mut self.world, &self.input);
        self.running = false;
        log::info!(
            "Engine stopped after {} frames ({:.1} average fps)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
    }

    /// Whether the runtime is started
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The world
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Keyboard state
    pub const fn input(&self) -> &InputManager {
        &self.input
    }

    /// Keyboard state, mutably
    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    /// Script registry, for registering additional classes before `start`
    pub fn registry_mut(&mut self) -> &mut ScriptRegistry {
        &mut self.registry
    }

    /// Live script instances
    pub const fn scripts(&self) -> &ScriptEngine {
        &self.scripts
    }

    /// Frame timer
    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Engine configuration
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds per frame used by [`Engine::run_frames`]
    pub fixed_time_step: f32,

    /// Settings for the built-in player script
    pub player: PlayerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_time_step: 1.0 / 60.0,
            player: PlayerConfig::default(),
        }
    }
}

impl Config for EngineConfig {}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Script failure surfaced to the host
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Frame requested before `start`
    #[error("Engine is not running")]
    NotRunning,

    /// `start` called twice
    #[error("Engine is already running")]
    AlreadyRunning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_requires_start() {
        let mut engine = Engine::new(EngineConfig::default());
        assert!(matches!(engine.tick(FrameTime::ZERO), Err(EngineError::NotRunning)));

        engine.start().unwrap();
        assert!(matches!(engine.start(), Err(EngineError::AlreadyRunning)));
        engine.tick(FrameTime::ZERO).unwrap();

        engine.stop();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_spawn_script_surfaces_errors() {
        let mut engine = Engine::new(EngineConfig::default());
        let entity = engine.world_mut().create_entity("Late");
        assert!(matches!(engine.spawn_script(entity), Err(EngineError::NotRunning)));

        engine.start().unwrap();
        engine
            .world_mut()
            .add_component(entity, crate::ecs::components::ScriptComponent::new("Unknown"));
        assert!(matches!(
            engine.spawn_script(entity),
            Err(EngineError::Script(ScriptError::UnknownScript(_)))
        ));
    }

    #[test]
    fn test_spawned_script_updates_in_creation_order() {
        use crate::ecs::components::ScriptComponent;
        use crate::scripting::{Script, ScriptContext};
        use std::sync::{Arc, Mutex};

        struct NameLog(Arc<Mutex<Vec<String>>>);

        impl Script for NameLog {
            fn on_create(&mut self, _ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
                Ok(())
            }

            fn on_update(&mut self, ctx: &mut ScriptContext<'_>, _frame_time: FrameTime) -> Result<(), ScriptError> {
                let name = ctx.world().name(ctx.entity()).unwrap_or_default().to_string();
                self.0.lock().unwrap().push(name);
                Ok(())
            }
        }

        let names = Arc::new(Mutex::new(Vec::new()));
        let mut engine = Engine::new(EngineConfig::default());
        let logged = names.clone();
        engine
            .registry_mut()
            .register("NameLog", move || Box::new(NameLog(logged.clone())));

        let a = engine.world_mut().create_entity("A");
        let b = engine.world_mut().create_entity("B");
        engine.world_mut().add_component(b, ScriptComponent::new("NameLog"));
        assert_eq!(engine.start().unwrap(), 1);

        engine.world_mut().add_component(a, ScriptComponent::new("NameLog"));
        engine.spawn_script(a).unwrap();
        engine.tick(FrameTime::from_millis(16)).unwrap();

        assert_eq!(*names.lock().unwrap(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_run_frames_counts_frames() {
        let mut engine = Engine::new(EngineConfig::default());
        engine.start().unwrap();

        let mut seen = Vec::new();
        engine.run_frames(3, |frame, _input| seen.push(frame)).unwrap();

        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(engine.timer().frame_count(), 3);
    }
}
