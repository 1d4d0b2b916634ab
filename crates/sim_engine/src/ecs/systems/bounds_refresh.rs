//! Bounds refresh stage
//!
//! Recenters each entity's world-space bounding box on its current
//! position so the spatial query sees up-to-date volumes. Entities tagged
//! `FROZEN` are known static and are skipped; the freeze toggle clears
//! the tag whenever that assumption stops holding.

use crate::ecs::components::TagSet;
use crate::ecs::scheduler::{Resources, Stage, StagePhase};
use crate::simulation::TickContext;

/// Per-tick world-bounds upkeep
pub struct BoundsRefreshStage;

impl Stage for BoundsRefreshStage {
    fn name(&self) -> &'static str {
        "bounds_refresh"
    }

    fn phase(&self) -> StagePhase {
        StagePhase::Simulation
    }

    fn dependencies(&self) -> &[&'static str] {
        &["translation"]
    }

    fn reads(&self) -> Resources {
        Resources::POSITIONS | Resources::TAGS
    }

    fn writes(&self) -> Resources {
        Resources::BOUNDS
    }

    fn run(&mut self, ctx: &mut TickContext<'_>) {
        ctx.world.for_each_bounded(|_, tags, position, volume| {
            if tags.contains(TagSet::FROZEN) {
                return;
            }
            volume.refresh(position.value);
        });
    }
}
