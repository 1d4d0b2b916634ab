//! Selection resolver: hover and select tag maintenance
//!
//! Consumes the best (first) sorted result plus the click pulse and emits
//! tag commands. Hover follows the ray every tick; the selected set only
//! changes on a click pulse. All mutation goes through the selection
//! command buffer and lands at the sync point.

use crate::ecs::command::CommandBuffer;
use crate::ecs::components::{TagFilter, TagSet};
use crate::ecs::scheduler::{Resources, Stage, StagePhase};
use crate::ecs::systems::raycast::IntersectionResult;
use crate::ecs::world::World;
use crate::simulation::TickContext;

/// Resolve hover/select transitions for one tick
///
/// Rules, evaluated against `best` (the closest sorted result, if any):
/// - every hovered entity other than a valid best loses `HOVERED`;
/// - a valid best gains `HOVERED` unless it already carries it;
/// - on a click pulse, every selected entity other than a valid best
///   loses `SELECTED` (clicking empty space clears the selection), and a
///   valid best gains `SELECTED` unless it already carries it;
/// - without a click pulse the selected set is untouched.
///
/// The hovered/selected sets are expected to hold at most one entity.
/// A larger set is reduced the same way rather than trusted, so a
/// violated invariant heals itself within one tick.
pub fn resolve(
    world: &World,
    best: Option<IntersectionResult>,
    clicked: bool,
    commands: &mut CommandBuffer,
) {
    let best_valid = best.map_or(false, |result| result.is_valid_hit());
    let best_entity = best.map(|result| result.entity);

    let mut hovered_count = 0usize;
    for entity in world.entities_with(TagFilter::all_of(TagSet::HOVERED)) {
        hovered_count += 1;
        if !best_valid || Some(entity) != best_entity {
            commands.remove_tags(entity, TagSet::HOVERED);
        }
    }
    if hovered_count > 1 {
        log::warn!("{hovered_count} entities carried HOVERED; reducing to one");
    }

    if best_valid {
        if let Some(entity) = best_entity {
            if !world.has_tags(entity, TagSet::HOVERED) {
                commands.add_tags(entity, TagSet::HOVERED);
            }
        }
    }

    if !clicked {
        return;
    }

    let mut selected_count = 0usize;
    for entity in world.entities_with(TagFilter::all_of(TagSet::SELECTED)) {
        selected_count += 1;
        if !best_valid || Some(entity) != best_entity {
            commands.remove_tags(entity, TagSet::SELECTED);
        }
    }
    if selected_count > 1 {
        log::warn!("{selected_count} entities carried SELECTED; reducing to one");
    }

    if best_valid {
        if let Some(entity) = best_entity {
            if !world.has_tags(entity, TagSet::SELECTED) {
                commands.add_tags(entity, TagSet::SELECTED);
            }
        }
    }
}

/// Per-tick stage wrapping [`resolve`]
///
/// A disarmed query buffer means the selection chain was skipped this
/// tick; hover and selection state carry over unchanged.
pub struct SelectionResolveStage;

impl Stage for SelectionResolveStage {
    fn name(&self) -> &'static str {
        "selection_resolve"
    }

    fn phase(&self) -> StagePhase {
        StagePhase::Simulation
    }

    fn dependencies(&self) -> &[&'static str] {
        &["result_sort"]
    }

    fn reads(&self) -> Resources {
        Resources::QUERY_RESULTS | Resources::TAGS
    }

    fn writes(&self) -> Resources {
        Resources::COMMANDS
    }

    fn run(&mut self, ctx: &mut TickContext<'_>) {
        if !ctx.query.is_armed() {
            return;
        }
        let best = ctx.query.results().first().copied();
        resolve(
            ctx.world,
            best,
            ctx.pointer.clicked(),
            &mut ctx.commands.selection,
        );
    }
}
