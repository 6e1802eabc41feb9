//! Host capabilities handed to scripts

use super::ScriptError;
use crate::ecs::components::{Rigidbody2DComponent, TransformComponent};
use crate::ecs::{Component, Entity, EntityId, World};
use crate::foundation::math::{Vec2, Vec3};
use crate::input::{KeyCode, KeyState};

/// Borrowed view of the host for the duration of one script callback
pub struct ScriptContext<'a> {
    entity: Entity,
    entity_id: EntityId,
    world: &'a mut World,
    input: &'a dyn KeyState,
}

impl<'a> ScriptContext<'a> {
    /// Build a context for `entity`; `None` if the entity is not alive
    pub fn new(entity: Entity, world: &'a mut World, input: &'a dyn KeyState) -> Option<Self> {
        let entity_id = world.entity_id(entity)?;
        Some(Self {
            entity,
            entity_id,
            world,
            input,
        })
    }

    /// Entity the script is attached to
    pub const fn entity(&self) -> Entity {
        self.entity
    }

    /// Stable identifier of the script's entity
    pub const fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    /// Keyboard state
    pub fn input(&self) -> &dyn KeyState {
        self.input
    }

    /// Whether the key is currently held down
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.input.is_key_pressed(key)
    }

    /// Component on the script's own entity
    pub fn get_component<T: Component>(&self) -> Result<&T, ScriptError> {
        self.component_of(self.entity)
    }

    /// Mutable component on the script's own entity
    pub fn get_component_mut<T: Component>(&mut self) -> Result<&mut T, ScriptError> {
        self.component_of_mut(self.entity)
    }

    /// Whether the script's own entity has a component
    pub fn has_component<T: Component>(&self) -> bool {
        self.world.has_component::<T>(self.entity)
    }

    /// Component on any entity
    pub fn component_of<T: Component>(&self, entity: Entity) -> Result<&T, ScriptError> {
        let entity_id = self.world.entity_id(entity).ok_or(ScriptError::EntityDestroyed)?;
        self.world
            .get_component::<T>(entity)
            .ok_or(ScriptError::MissingComponent {
                entity: entity_id,
                component: std::any::type_name::<T>(),
            })
    }

    /// Mutable component on any entity
    pub fn component_of_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, ScriptError> {
        let entity_id = self.world.entity_id(entity).ok_or(ScriptError::EntityDestroyed)?;
        self.world
            .get_component_mut::<T>(entity)
            .ok_or(ScriptError::MissingComponent {
                entity: entity_id,
                component: std::any::type_name::<T>(),
            })
    }

    /// First entity, in creation order, with the given name
    pub fn find_entity_by_name(&self, name: &str) -> Option<Entity> {
        self.world.find_entity_by_name(name)
    }

    /// Apply a linear impulse at the center of an entity's rigid body
    pub fn apply_linear_impulse_to_center(
        &mut self,
        body: Entity,
        impulse: Vec2,
        wake: bool,
    ) -> Result<(), ScriptError> {
        self.component_of_mut::<Rigidbody2DComponent>(body)?
            .apply_linear_impulse_to_center(impulse, wake);
        Ok(())
    }

    /// Translation of an entity
    pub fn position(&self, entity: Entity) -> Result<Vec3, ScriptError> {
        Ok(self.component_of::<TransformComponent>(entity)?.translation)
    }

    /// Move an entity
    pub fn set_position(&mut self, entity: Entity, position: Vec3) -> Result<(), ScriptError> {
        self.component_of_mut::<TransformComponent>(entity)?.translation = position;
        Ok(())
    }

    /// Read-only access to the world
    pub fn world(&self) -> &World {
        &*self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputManager;

    #[test]
    fn test_context_requires_live_entity() {
        let mut world = World::new();
        let input = InputManager::new();
        let entity = world.create_entity("Ghost");
        world.destroy_entity(entity);

        assert!(ScriptContext::new(entity, &mut world, &input).is_none());
    }

    #[test]
    fn test_missing_component_reports_entity() {
        let mut world = World::new();
        let input = InputManager::new();
        let entity = world.create_entity("Bare");
        let id = world.entity_id(entity).unwrap();

        let ctx = ScriptContext::new(entity, &mut world, &input).unwrap();
        match ctx.get_component::<TransformComponent>() {
            Err(ScriptError::MissingComponent { entity, .. }) => assert_eq!(entity, id),
            other => panic!("expected MissingComponent, got {other:?}"),
        }
    }

    #[test]
    fn test_position_and_impulse_capabilities() {
        let mut world = World::new();
        let mut input = InputManager::new();
        input.press(KeyCode::Space);

        let player = world.create_entity("Player");
        world.add_component(player, Rigidbody2DComponent::dynamic());
        let camera = world.create_entity("Camera");
        world.add_component(camera, TransformComponent::default());

        let mut ctx = ScriptContext::new(player, &mut world, &input).unwrap();
        assert!(ctx.is_key_pressed(KeyCode::Space));
        assert_eq!(ctx.find_entity_by_name("Camera"), Some(camera));

        ctx.set_position(camera, Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(ctx.position(camera).unwrap(), Vec3::new(1.0, 2.0, 3.0));

        ctx.apply_linear_impulse_to_center(player, Vec2::new(0.5, 0.0), true).unwrap();
        assert_eq!(
            world.get_component::<Rigidbody2DComponent>(player).unwrap().linear_velocity,
            Vec2::new(0.5, 0.0)
        );
    }

    #[test]
    fn test_own_component_access() {
        let mut world = World::new();
        let input = InputManager::new();
        let entity = world.create_entity("Player");
        world.add_component(entity, TransformComponent::default());

        let mut ctx = ScriptContext::new(entity, &mut world, &input).unwrap();
        assert!(ctx.has_component::<TransformComponent>());
        assert!(!ctx.has_component::<Rigidbody2DComponent>());
        assert_eq!(ctx.world().name(entity), Some("Player"));

        ctx.get_component_mut::<TransformComponent>().unwrap().translation.y = 7.0;
        assert_eq!(ctx.position(entity).unwrap(), Vec3::new(0.0, 7.0, 0.0));
    }
}
