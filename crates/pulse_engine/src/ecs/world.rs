//! ECS World implementation

use super::{Component, Entity, EntityId};
use slotmap::{SecondaryMap, SlotMap};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Per-entity bookkeeping
#[derive(Debug, Clone)]
struct EntityRecord {
    id: EntityId,
    name: String,
}

/// Type-erased component column, so destroying an entity can clear every
/// storage without knowing the component types.
trait ComponentColumn: Send + Sync {
    fn remove_entity(&mut self, entity: Entity);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ComponentColumn for SecondaryMap<Entity, T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// ECS World containing all entities and components
pub struct World {
    entities: SlotMap<Entity, EntityRecord>,
    /// Live entities in creation order
    order: Vec<Entity>,
    next_entity_id: u64,
    component_storages: HashMap<TypeId, Box<dyn ComponentColumn>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            order: Vec::new(),
            next_entity_id: 1,
            component_storages: HashMap::new(),
        }
    }

    /// Create a new named entity
    pub fn create_entity(&mut self, name: impl Into<String>) -> Entity {
        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id += 1;

        let name = name.into();
        log::debug!("Creating entity {} ({})", id, name);

        let entity = self.entities.insert(EntityRecord { id, name });
        self.order.push(entity);
        entity
    }

    /// Destroy an entity and all of its components
    ///
    /// Returns `false` if the handle was already stale.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let Some(record) = self.entities.remove(entity) else {
            return false;
        };
        log::debug!("Destroying entity {} ({})", record.id, record.name);

        self.order.retain(|&e| e != entity);
        for storage in self.component_storages.values_mut() {
            storage.remove_entity(entity);
        }
        true
    }

    /// Whether the handle refers to a live entity
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an iterator over all live entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    /// Stable identifier of an entity
    pub fn entity_id(&self, entity: Entity) -> Option<EntityId> {
        self.entities.get(entity).map(|record| record.id)
    }

    /// Name of an entity
    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.entities.get(entity).map(|record| record.name.as_str())
    }

    /// Rename an entity. Returns `false` for stale handles.
    pub fn set_name(&mut self, entity: Entity, name: impl Into<String>) -> bool {
        match self.entities.get_mut(entity) {
            Some(record) => {
                record.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Find the first entity, in creation order, with the given name
    pub fn find_entity_by_name(&self, name: &str) -> Option<Entity> {
        self.order
            .iter()
            .copied()
            .find(|&entity| self.entities.get(entity).is_some_and(|record| record.name == name))
    }

    /// Find an entity by its stable identifier
    pub fn find_entity_by_id(&self, id: EntityId) -> Option<Entity> {
        self.entities
            .iter()
            .find_map(|(entity, record)| (record.id == id).then_some(entity))
    }

    /// Add a component to an entity, returning any component it replaced
    ///
    /// Adding to a stale handle is a no-op.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        if !self.contains(entity) {
            log::warn!("Ignoring {} added to a destroyed entity", std::any::type_name::<T>());
            return None;
        }
        self.storage_mut::<T>().insert(entity, component)
    }

    /// Remove a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<SecondaryMap<Entity, T>>())
            .and_then(|storage| storage.remove(entity))
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>().and_then(|storage| storage.get(entity))
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<SecondaryMap<Entity, T>>())
            .and_then(|storage| storage.get_mut(entity))
    }

    /// Whether an entity has a component of the given type
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// All live entities carrying a component of the given type, in creation order
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        let Some(storage) = self.storage::<T>() else {
            return Vec::new();
        };
        self.order
            .iter()
            .copied()
            .filter(|&entity| storage.contains_key(entity))
            .collect()
    }

    fn storage<T: Component>(&self) -> Option<&SecondaryMap<Entity, T>> {
        self.component_storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref::<SecondaryMap<Entity, T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> &mut SecondaryMap<Entity, T> {
        let storage = self
            .component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SecondaryMap::<Entity, T>::new()));
        match storage.as_any_mut().downcast_mut::<SecondaryMap<Entity, T>>() {
            Some(storage) => storage,
            None => unreachable!("component storage keyed by the wrong TypeId"),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
