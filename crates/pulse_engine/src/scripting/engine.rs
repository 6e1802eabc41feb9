//! Script instance lifecycle and dispatch

use super::{Script, ScriptContext, ScriptError, ScriptFieldMap, ScriptFieldValue, ScriptRegistry};
use crate::ecs::components::ScriptComponent;
use crate::ecs::{Entity, EntityId, World};
use crate::foundation::time::FrameTime;
use crate::input::KeyState;

struct ScriptInstance {
    entity: Entity,
    id: EntityId,
    class_name: String,
    script: Box<dyn Script>,
}

/// Owns the live script instances and drives their callbacks
///
/// An instance only joins the update list once its creation callback has
/// succeeded, so `on_update` never runs on a half-initialized script.
/// Instances are kept sorted by entity creation order, whenever they start.
#[derive(Default)]
pub struct ScriptEngine {
    instances: Vec<ScriptInstance>,
}

impl ScriptEngine {
    /// Create an engine with no instances
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate and create a script for every entity with a [`ScriptComponent`]
    ///
    /// Entities whose script fails to instantiate or create are logged and
    /// left unscripted. Returns the number of instances started.
    pub fn on_runtime_start(&mut self, world: &mut World, input: &dyn KeyState, registry: &ScriptRegistry) -> usize {
        let mut started = 0;
        for entity in world.entities_with::<ScriptComponent>() {
            match self.instantiate(entity, world, input, registry) {
                Ok(()) => started += 1,
                Err(e) => {
                    let id = world.entity_id(entity).map(|id| id.to_string()).unwrap_or_default();
                    log::error!("Failed to start script on entity {}: {}", id, e);
                }
            }
        }
        log::info!("Started {} script instance(s)", started);
        started
    }

    /// Instantiate the script bound to one entity and run its creation callback
    pub fn instantiate(
        &mut self,
        entity: Entity,
        world: &mut World,
        input: &dyn KeyState,
        registry: &ScriptRegistry,
    ) -> Result<(), ScriptError> {
        let id = world.entity_id(entity).ok_or(ScriptError::EntityDestroyed)?;
        let binding = world
            .get_component::<ScriptComponent>(entity)
            .cloned()
            .ok_or(ScriptError::MissingComponent {
                entity: id,
                component: std::any::type_name::<ScriptComponent>(),
            })?;

        if self.is_scripted(entity) {
            log::warn!("Entity already has a running '{}' script", binding.class_name);
            return Ok(());
        }

        let mut script = registry.instantiate(&binding.class_name)?;
        for (name, value) in &binding.field_overrides {
            script.set_field(name, *value)?;
        }

        let mut ctx = ScriptContext::new(entity, world, input).ok_or(ScriptError::EntityDestroyed)?;
        script.on_create(&mut ctx)?;

        // Ids grow with creation, so sorting by id is creation order
        let index = self.instances.partition_point(|instance| instance.id < id);
        self.instances.insert(index, ScriptInstance {
            entity,
            id,
            class_name: binding.class_name,
            script,
        });
        Ok(())
    }

    /// Run one frame of script updates, in entity creation order
    ///
    /// Instances whose entity has been destroyed are dropped. A failing
    /// update is logged and does not stop the others.
    pub fn on_update(&mut self, world: &mut World, input: &dyn KeyState, frame_time: FrameTime) {
        self.instances.retain(|instance| {
            let alive = world.contains(instance.entity);
            if !alive {
                log::debug!("Dropping '{}' script of a destroyed entity", instance.class_name);
            }
            alive
        });

        for instance in &mut self.instances {
            let Some(mut ctx) = ScriptContext::new(instance.entity, world, input) else {
                continue;
            };
            let id = ctx.entity_id();
            if let Err(e) = instance.script.on_update(&mut ctx, frame_time) {
                log::error!("Script '{}' on entity {} failed to update: {}", instance.class_name, id, e);
            }
        }
    }

    /// Run destroy callbacks for entities still alive and drop every instance
    pub fn on_runtime_stop(&mut self, world: &mut World, input: &dyn KeyState) {
        for mut instance in self.instances.drain(..) {
            if let Some(mut ctx) = ScriptContext::new(instance.entity, world, input) {
                instance.script.on_destroy(&mut ctx);
            }
        }
        log::info!("Script runtime stopped");
    }

    /// Number of live instances
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Whether an entity has a live script instance
    pub fn is_scripted(&self, entity: Entity) -> bool {
        self.instances.iter().any(|instance| instance.entity == entity)
    }

    /// Field values of an entity's live script
    pub fn fields(&self, entity: Entity) -> Option<ScriptFieldMap> {
        self.instance(entity).map(|instance| instance.script.fields())
    }

    /// Overwrite a field of an entity's live script
    pub fn set_field(&mut self, entity: Entity, name: &str, value: ScriptFieldValue) -> Result<(), ScriptError> {
        self.instances
            .iter_mut()
            .find(|instance| instance.entity == entity)
            .ok_or(ScriptError::NoRunningScript)?
            .script
            .set_field(name, value)
    }

    fn instance(&self, entity: Entity) -> Option<&ScriptInstance> {
        self.instances.iter().find(|instance| instance.entity == entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputManager;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Counts callbacks; fails creation when `fail_create` is set
    struct Counter {
        creates: Arc<AtomicUsize>,
        updates: Arc<AtomicUsize>,
        fail_create: bool,
    }

    impl Script for Counter {
        fn on_create(&mut self, _ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            if self.fail_create {
                Err(ScriptError::EntityNotFound("Camera".into()))
            } else {
                Ok(())
            }
        }

        fn on_update(&mut self, _ctx: &mut ScriptContext<'_>, _frame_time: FrameTime) -> Result<(), ScriptError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Records the name of its entity on every update
    struct Recorder {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Script for Recorder {
        fn on_create(&mut self, _ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
            Ok(())
        }

        fn on_update(&mut self, ctx: &mut ScriptContext<'_>, _frame_time: FrameTime) -> Result<(), ScriptError> {
            let name = ctx.world().name(ctx.entity()).unwrap_or_default().to_string();
            self.log.lock().unwrap().push(name);
            Ok(())
        }
    }

    fn registry(fail_create: bool) -> (ScriptRegistry, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let creates = Arc::new(AtomicUsize::new(0));
        let updates = Arc::new(AtomicUsize::new(0));
        let mut registry = ScriptRegistry::new();
        let (c, u) = (creates.clone(), updates.clone());
        registry.register("Counter", move || {
            Box::new(Counter {
                creates: c.clone(),
                updates: u.clone(),
                fail_create,
            })
        });
        (registry, creates, updates)
    }

    #[test]
    fn test_start_and_update() {
        let (registry, creates, updates) = registry(false);
        let mut world = World::new();
        let input = InputManager::new();
        let a = world.create_entity("A");
        world.add_component(a, ScriptComponent::new("Counter"));
        world.create_entity("Unscripted");

        let mut engine = ScriptEngine::new();
        assert_eq!(engine.on_runtime_start(&mut world, &input, &registry), 1);
        assert!(engine.is_scripted(a));

        engine.on_update(&mut world, &input, FrameTime::from_millis(16));
        engine.on_update(&mut world, &input, FrameTime::from_millis(16));

        assert_eq!(creates.load(Ordering::SeqCst), 1);
        assert_eq!(updates.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_create_is_never_updated() {
        let (registry, creates, updates) = registry(true);
        let mut world = World::new();
        let input = InputManager::new();
        let a = world.create_entity("A");
        world.add_component(a, ScriptComponent::new("Counter"));

        let mut engine = ScriptEngine::new();
        assert_eq!(engine.on_runtime_start(&mut world, &input, &registry), 0);
        engine.on_update(&mut world, &input, FrameTime::from_millis(16));

        assert_eq!(creates.load(Ordering::SeqCst), 1);
        assert_eq!(updates.load(Ordering::SeqCst), 0);
        assert_eq!(engine.instance_count(), 0);
    }

    #[test]
    fn test_unknown_class_and_bad_override_are_skipped() {
        let (registry, creates, _) = registry(false);
        let mut world = World::new();
        let input = InputManager::new();
        let a = world.create_entity("A");
        world.add_component(a, ScriptComponent::new("Missing"));
        let b = world.create_entity("B");
        world.add_component(b, ScriptComponent::new("Counter").with_field("speed", 1.0_f32));

        let mut engine = ScriptEngine::new();
        assert_eq!(engine.on_runtime_start(&mut world, &input, &registry), 0);
        assert_eq!(creates.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_destroyed_entity_drops_instance() {
        let (registry, _, updates) = registry(false);
        let mut world = World::new();
        let input = InputManager::new();
        let a = world.create_entity("A");
        world.add_component(a, ScriptComponent::new("Counter"));

        let mut engine = ScriptEngine::new();
        engine.on_runtime_start(&mut world, &input, &registry);
        world.destroy_entity(a);
        engine.on_update(&mut world, &input, FrameTime::from_millis(16));

        assert_eq!(engine.instance_count(), 0);
        assert_eq!(updates.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_update_order_follows_creation_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ScriptRegistry::new();
        let recorded = log.clone();
        registry.register("Recorder", move || Box::new(Recorder { log: recorded.clone() }));

        let mut world = World::new();
        let input = InputManager::new();
        let a = world.create_entity("A");
        let b = world.create_entity("B");
        world.add_component(b, ScriptComponent::new("Recorder"));

        let mut engine = ScriptEngine::new();
        assert_eq!(engine.on_runtime_start(&mut world, &input, &registry), 1);

        // A was created first but only gets its script after start
        world.add_component(a, ScriptComponent::new("Recorder"));
        engine.instantiate(a, &mut world, &input, &registry).unwrap();
        engine.on_update(&mut world, &input, FrameTime::from_millis(16));

        assert_eq!(*log.lock().unwrap(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_instantiate_without_script_component() {
        let (registry, creates, _) = registry(false);
        let mut world = World::new();
        let input = InputManager::new();
        let a = world.create_entity("A");
        let id = world.entity_id(a).unwrap();

        let mut engine = ScriptEngine::new();
        match engine.instantiate(a, &mut world, &input, &registry) {
            Err(ScriptError::MissingComponent { entity, component }) => {
                assert_eq!(entity, id);
                assert!(component.ends_with("ScriptComponent"));
            }
            other => panic!("expected MissingComponent, got {other:?}"),
        }
        assert_eq!(creates.load(Ordering::SeqCst), 0);

        world.destroy_entity(a);
        assert_eq!(
            engine.instantiate(a, &mut world, &input, &registry),
            Err(ScriptError::EntityDestroyed)
        );
    }

    #[test]
    fn test_set_field_requires_running_script() {
        let (registry, _, _) = registry(false);
        let mut world = World::new();
        let input = InputManager::new();
        let a = world.create_entity("A");
        world.add_component(a, ScriptComponent::new("Counter"));
        let bare = world.create_entity("Bare");

        let mut engine = ScriptEngine::new();
        engine.on_runtime_start(&mut world, &input, &registry);

        assert_eq!(
            engine.set_field(bare, "speed", ScriptFieldValue::Float(1.0)),
            Err(ScriptError::NoRunningScript)
        );
        assert_eq!(
            engine.set_field(a, "speed", ScriptFieldValue::Float(1.0)),
            Err(ScriptError::UnknownField("speed".into()))
        );
    }

    #[test]
    fn test_stop_clears_instances() {
        let (registry, _, _) = registry(false);
        let mut world = World::new();
        let input = InputManager::new();
        let a = world.create_entity("A");
        world.add_component(a, ScriptComponent::new("Counter"));

        let mut engine = ScriptEngine::new();
        engine.on_runtime_start(&mut world, &input, &registry);
        engine.on_runtime_stop(&mut world, &input);

        assert_eq!(engine.instance_count(), 0);
        assert!(engine.fields(a).is_none());
    }
}
