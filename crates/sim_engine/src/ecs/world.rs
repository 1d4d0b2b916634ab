//! ECS world implementation
//!
//! The world owns every entity and component. Entities live in a slot map
//! whose value is the entity's tag bit set; each optional component kind
//! occupies its own sparse column keyed by entity. Stages borrow the world
//! for the duration of a tick and route structural changes (tags, heading,
//! destination) through the command buffer; only positions are written in
//! place, by a single writer.

use crate::ecs::components::{BoundingVolume, Destination, Heading, Position, TagFilter, TagSet};
use crate::ecs::entity::{ComponentMap, Entity};
use crate::foundation::math::Vec3;
use slotmap::SlotMap;

/// ECS world containing all entities and components
#[derive(Default)]
pub struct World {
    entities: SlotMap<Entity, TagSet>,
    positions: ComponentMap<Position>,
    bounds: ComponentMap<BoundingVolume>,
    headings: ComponentMap<Heading>,
    destinations: ComponentMap<Destination>,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world has no live entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Create a new entity carrying the given tags and no components
    pub fn spawn(&mut self, tags: TagSet) -> Entity {
        self.entities.insert(tags)
    }

    /// Create an entity with a position and a bounding volume centered on it
    pub fn spawn_at(&mut self, position: Vec3, extents: Vec3, tags: TagSet) -> Entity {
        let entity = self.spawn(tags);
        self.positions.insert(entity, Position::from_vec(position));
        self.bounds
            .insert(entity, BoundingVolume::new(position, extents));
        entity
    }

    /// Destroy an entity and all of its components
    ///
    /// Returns false if the entity was already dead.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        self.positions.remove(entity);
        self.bounds.remove(entity);
        self.headings.remove(entity);
        self.destinations.remove(entity);
        true
    }

    /// Whether the entity is alive
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Tag set of an entity, if alive
    pub fn tags(&self, entity: Entity) -> Option<TagSet> {
        self.entities.get(entity).copied()
    }

    /// Whether a live entity carries every tag in `tags`
    pub fn has_tags(&self, entity: Entity, tags: TagSet) -> bool {
        self.entities
            .get(entity)
            .map_or(false, |held| held.contains(tags))
    }

    /// Add tags to an entity; no-op on dead entities
    pub fn add_tags(&mut self, entity: Entity, tags: TagSet) -> bool {
        match self.entities.get_mut(entity) {
            Some(held) => {
                held.insert(tags);
                true
            }
            None => false,
        }
    }

    /// Remove tags from an entity; no-op on dead entities
    pub fn remove_tags(&mut self, entity: Entity, tags: TagSet) -> bool {
        match self.entities.get_mut(entity) {
            Some(held) => {
                held.remove(tags);
                true
            }
            None => false,
        }
    }

    /// Iterate live entities matching a tag filter, in slot order
    pub fn entities_with(&self, filter: TagFilter) -> impl Iterator<Item = Entity> + '_ {
        self.entities
            .iter()
            .filter_map(move |(entity, tags)| filter.matches(*tags).then_some(entity))
    }

    /// Position of an entity
    pub fn position(&self, entity: Entity) -> Option<&Position> {
        self.positions.get(entity)
    }

    /// Mutable position of an entity
    pub fn position_mut(&mut self, entity: Entity) -> Option<&mut Position> {
        self.positions.get_mut(entity)
    }

    /// Attach or replace an entity's position; no-op on dead entities
    pub fn set_position(&mut self, entity: Entity, position: Position) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.positions.insert(entity, position);
        true
    }

    /// Bounding volume of an entity
    pub fn bounds(&self, entity: Entity) -> Option<&BoundingVolume> {
        self.bounds.get(entity)
    }

    /// Attach or replace an entity's bounding volume; no-op on dead entities
    pub fn set_bounds(&mut self, entity: Entity, volume: BoundingVolume) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.bounds.insert(entity, volume);
        true
    }

    /// Heading of an entity
    pub fn heading(&self, entity: Entity) -> Option<&Heading> {
        self.headings.get(entity)
    }

    /// Attach or replace an entity's heading; no-op on dead entities
    pub fn set_heading(&mut self, entity: Entity, heading: Heading) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.headings.insert(entity, heading);
        true
    }

    /// Detach an entity's heading
    pub fn remove_heading(&mut self, entity: Entity) -> bool {
        self.headings.remove(entity).is_some()
    }

    /// Destination of an entity
    pub fn destination(&self, entity: Entity) -> Option<&Destination> {
        self.destinations.get(entity)
    }

    /// Attach or replace an entity's destination; no-op on dead entities
    pub fn set_destination(&mut self, entity: Entity, destination: Destination) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.destinations.insert(entity, destination);
        true
    }

    /// Detach an entity's destination
    pub fn remove_destination(&mut self, entity: Entity) -> bool {
        self.destinations.remove(entity).is_some()
    }

    /// Visit every entity carrying both a position and a heading
    ///
    /// The closure receives the position mutably and the heading and
    /// optional destination read-only; this is the single-writer access
    /// pattern of the translation stage.
    pub fn for_each_mover<F>(&mut self, mut f: F)
    where
        F: FnMut(Entity, &mut Position, &Heading, Option<&Destination>),
    {
        for (entity, heading) in &self.headings {
            if let Some(position) = self.positions.get_mut(entity) {
                f(entity, position, heading, self.destinations.get(entity));
            }
        }
    }

    /// Visit every entity carrying a position and a bounding volume
    pub fn for_each_bounded<F>(&mut self, mut f: F)
    where
        F: FnMut(Entity, TagSet, &Position, &mut BoundingVolume),
    {
        for (entity, volume) in &mut self.bounds {
            if let (Some(tags), Some(position)) =
                (self.entities.get(entity), self.positions.get(entity))
            {
                f(entity, *tags, position, volume);
            }
        }
    }
}
