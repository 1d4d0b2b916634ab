//! Command playback
//!
//! The only stage in the `Sync` phase. Every simulation stage records
//! its structural changes into a per-producer buffer; this stage drains
//! them all into the world in one place, after the last reader has run.

use crate::ecs::scheduler::{Resources, Stage, StagePhase};
use crate::simulation::TickContext;

/// Drains every command buffer into the world
pub struct ApplyCommandsStage;

impl Stage for ApplyCommandsStage {
    fn name(&self) -> &'static str {
        "apply_commands"
    }

    fn phase(&self) -> StagePhase {
        StagePhase::Sync
    }

    fn reads(&self) -> Resources {
        Resources::COMMANDS
    }

    fn writes(&self) -> Resources {
        Resources::TAGS | Resources::MOTION | Resources::POSITIONS
    }

    fn run(&mut self, ctx: &mut TickContext<'_>) {
        let applied = ctx.commands.apply_all(ctx.world);
        if applied > 0 {
            log::trace!("applied {applied} commands");
        }
    }
}
