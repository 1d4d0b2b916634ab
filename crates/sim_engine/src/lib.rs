//! # Sim Engine
//!
//! An interactive picking and movement engine for grid-based scenes.
//!
//! ## Features
//!
//! - **Spatial queries**: Parallel ray casting against entity bounds
//! - **Deterministic picking**: Distance-sorted results, nearest wins
//! - **Selection state machine**: Hover and click resolution with self-healing
//! - **Deferred mutation**: Stages record commands, the sync phase applies them
//! - **Explicit scheduling**: Stages declare reads and writes, the planner batches them
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sim_engine::prelude::*;
//!
//! fn main() -> Result<(), SimError> {
//!     let mut sim = Simulation::new(SimConfig::default())?;
//!     sim.world_mut().spawn_at(
//!         Vec3::zeros(),
//!         Vec3::new(0.5, 0.5, 0.5),
//!         TagSet::SELECTABLE,
//!     );
//!
//!     // Drive one frame: pointer at the viewport center, button down.
//!     let input = FrameInput::idle(0.016).with_pointer(640.0, 360.0).with_click();
//!     sim.tick(&input);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod camera;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod simulation;

pub use simulation::{FrameInput, SimError, Simulation};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        camera::Camera,
        config::{Config, ConfigError, SimConfig},
        ecs::{
            components::{Destination, Heading, Position, TagFilter, TagSet},
            systems::{IntersectionResult, QueryBuffer},
            Entity, World,
        },
        foundation::{
            math::{Mat4, Vec2, Vec3},
            time::Timer,
        },
        input::PointerState,
        physics::{Ray, AABB},
        simulation::{FrameInput, SimError, Simulation, TickContext},
    };
}
