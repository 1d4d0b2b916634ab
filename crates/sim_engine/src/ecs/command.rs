//! Deferred structural mutation commands
//!
//! Stages never add or remove tags, headings, or destinations while the
//! world is being iterated. They append commands to a buffer instead; the
//! sync stage drains every buffer once per tick, in producer order, after
//! all producing stages have finished. Commands naming a despawned entity
//! apply as no-ops.

use crate::ecs::components::{Destination, Heading, TagSet};
use crate::ecs::entity::Entity;
use crate::ecs::world::World;

/// One deferred structural mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Add marker tags to an entity
    AddTags {
        /// Target entity
        entity: Entity,
        /// Tags to add
        tags: TagSet,
    },
    /// Remove marker tags from an entity
    RemoveTags {
        /// Target entity
        entity: Entity,
        /// Tags to remove
        tags: TagSet,
    },
    /// Attach or replace an entity's heading
    SetHeading {
        /// Target entity
        entity: Entity,
        /// New heading
        heading: Heading,
    },
    /// Detach an entity's heading
    RemoveHeading {
        /// Target entity
        entity: Entity,
    },
    /// Attach or replace an entity's destination
    SetDestination {
        /// Target entity
        entity: Entity,
        /// New destination
        destination: Destination,
    },
    /// Detach an entity's destination
    RemoveDestination {
        /// Target entity
        entity: Entity,
    },
}

/// FIFO queue of deferred commands
#[derive(Debug, Default)]
pub struct CommandBuffer {
    queue: Vec<Command>,
}

impl CommandBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the buffer holds no commands
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Append a command
    pub fn push(&mut self, command: Command) {
        self.queue.push(command);
    }

    /// Queue a tag addition
    pub fn add_tags(&mut self, entity: Entity, tags: TagSet) {
        self.push(Command::AddTags { entity, tags });
    }

    /// Queue a tag removal
    pub fn remove_tags(&mut self, entity: Entity, tags: TagSet) {
        self.push(Command::RemoveTags { entity, tags });
    }

    /// Queue a heading attach or replace
    pub fn set_heading(&mut self, entity: Entity, heading: Heading) {
        self.push(Command::SetHeading { entity, heading });
    }

    /// Queue a heading detach
    pub fn remove_heading(&mut self, entity: Entity) {
        self.push(Command::RemoveHeading { entity });
    }

    /// Queue a destination attach or replace
    pub fn set_destination(&mut self, entity: Entity, destination: Destination) {
        self.push(Command::SetDestination { entity, destination });
    }

    /// Queue a destination detach
    pub fn remove_destination(&mut self, entity: Entity) {
        self.push(Command::RemoveDestination { entity });
    }

    /// Drain the buffer into the world in FIFO order
    ///
    /// Returns the number of commands that found a live target.
    pub fn apply(&mut self, world: &mut World) -> usize {
        let mut applied = 0;
        for command in self.queue.drain(..) {
            let landed = match command {
                Command::AddTags { entity, tags } => world.add_tags(entity, tags),
                Command::RemoveTags { entity, tags } => world.remove_tags(entity, tags),
                Command::SetHeading { entity, heading } => world.set_heading(entity, heading),
                Command::RemoveHeading { entity } => world.remove_heading(entity),
                Command::SetDestination {
                    entity,
                    destination,
                } => world.set_destination(entity, destination),
                Command::RemoveDestination { entity } => world.remove_destination(entity),
            };
            if landed {
                applied += 1;
            }
        }
        applied
    }
}

/// One command buffer per producing stage
///
/// Buffers drain in the producers' declared dependency order: input
/// operations, then translation, then selection, then the freeze toggle.
#[derive(Debug, Default)]
pub struct CommandQueues {
    /// Keyboard-driven operations (deselect, debug moves)
    pub input: CommandBuffer,
    /// Arrival removals from the translation stage
    pub motion: CommandBuffer,
    /// Hover/select tag maintenance
    pub selection: CommandBuffer,
    /// Freeze toggle adds and removes
    pub freeze: CommandBuffer,
}

impl CommandQueues {
    /// Create a set of empty buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Total queued commands across all buffers
    pub fn len(&self) -> usize {
        self.input.len() + self.motion.len() + self.selection.len() + self.freeze.len()
    }

    /// Whether every buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain every buffer into the world, in producer order
    pub fn apply_all(&mut self, world: &mut World) -> usize {
        self.input.apply(world)
            + self.motion.apply(world)
            + self.selection.apply(world)
            + self.freeze.apply(world)
    }
}
