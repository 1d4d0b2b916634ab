//! Entity-Component-System core
//!
//! Entities are slotmap keys, components live in typed columns on the
//! [`World`], and stages communicate through command buffers that are
//! drained once per tick by the scheduler's sync phase.

pub mod command;
pub mod components;
pub mod entity;
pub mod scheduler;
pub mod systems;
pub mod world;

pub use command::{Command, CommandBuffer, CommandQueues};
pub use entity::Entity;
pub use scheduler::{Resources, Schedule, ScheduleError, Stage, StagePhase};
pub use world::World;
