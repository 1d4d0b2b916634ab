//! Keyboard-driven operations on the current selection
//!
//! Three one-shot triggers act on every `SELECTED` entity: deselect it,
//! nudge it onto a fixed heading, or send it to a configured destination.
//! The move trigger derives speed from distance over a configured travel
//! time, so far-away entities arrive in the same wall-clock time as near
//! ones. All effects go through the command queue, nothing is mutated
//! here.

use crate::config::DebugOpsConfig;
use crate::ecs::components::{Destination, Heading, TagFilter, TagSet};
use crate::ecs::scheduler::{Resources, Stage, StagePhase};
use crate::simulation::TickContext;

/// Applies the frame's one-shot triggers to the selected set
pub struct InputOpsStage {
    ops: DebugOpsConfig,
}

impl InputOpsStage {
    /// Create the stage with the given trigger settings
    pub fn new(ops: DebugOpsConfig) -> Self {
        Self { ops }
    }
}

impl Stage for InputOpsStage {
    fn name(&self) -> &'static str {
        "input_ops"
    }

    fn phase(&self) -> StagePhase {
        StagePhase::Simulation
    }

    fn reads(&self) -> Resources {
        Resources::TAGS | Resources::POSITIONS
    }

    fn writes(&self) -> Resources {
        Resources::COMMANDS
    }

    fn run(&mut self, ctx: &mut TickContext<'_>) {
        let input = ctx.input;
        if !(input.deselect || input.nudge_selected || input.move_selected) {
            return;
        }

        let world = &*ctx.world;
        let commands = &mut ctx.commands.input;
        let selected = TagFilter::all_of(TagSet::SELECTED);

        if input.deselect {
            let mut cleared = 0usize;
            for entity in world.entities_with(selected) {
                commands.remove_tags(entity, TagSet::SELECTED);
                cleared += 1;
            }
            if cleared > 0 {
                log::debug!("deselect trigger cleared {cleared} entities");
            }
        }

        if input.nudge_selected {
            for entity in world.entities_with(selected) {
                commands.set_heading(entity, Heading::new(self.ops.nudge_heading));
            }
        }

        if input.move_selected {
            for entity in world.entities_with(selected) {
                let Some(position) = world.position(entity) else {
                    continue;
                };
                let distance = position.distance_to(self.ops.move_target);
                let speed = distance / self.ops.move_duration;
                commands.set_heading(
                    entity,
                    Heading::toward(position.value, self.ops.move_target, speed),
                );
                commands.set_destination(
                    entity,
                    Destination::new(
                        self.ops.move_target,
                        self.ops.move_threshold,
                        self.ops.move_snap,
                    ),
                );
                // A dispatched entity leaves the selection, mirroring a
                // completed move order.
                commands.remove_tags(entity, TagSet::SELECTED);
                log::debug!(
                    "move trigger: {entity:?} dispatched to {:?} over {}s",
                    self.ops.move_target,
                    self.ops.move_duration
                );
            }
        }
    }
}
