//! Static freeze toggle
//!
//! Entities that are not moving get tagged `FROZEN` so per-frame upkeep
//! (bounds refresh) can skip them. The tag is a toggle, not a one-way
//! latch: an entity that regains a heading is thawed, and a camera
//! movement thaws the whole set for one tick so every bounding volume is
//! recomputed against the new view. `SKIP_FREEZE` opts an entity out of
//! the optimization entirely.

use crate::ecs::components::{TagFilter, TagSet};
use crate::ecs::scheduler::{Resources, Stage, StagePhase};
use crate::simulation::TickContext;

/// Per-tick freeze bookkeeping, running after the resolver
pub struct FreezeStage;

impl Stage for FreezeStage {
    fn name(&self) -> &'static str {
        "freeze_toggle"
    }

    fn phase(&self) -> StagePhase {
        StagePhase::Simulation
    }

    fn dependencies(&self) -> &[&'static str] {
        &["selection_resolve"]
    }

    fn reads(&self) -> Resources {
        Resources::TAGS | Resources::MOTION | Resources::BOUNDS
    }

    fn writes(&self) -> Resources {
        Resources::COMMANDS
    }

    fn run(&mut self, ctx: &mut TickContext<'_>) {
        let world = &*ctx.world;
        let commands = &mut ctx.commands.freeze;

        if ctx.input.camera_moved {
            // Thaw everything for one tick; the next bounds refresh sees
            // the full set and the tick after that refreezes it.
            let filter = TagFilter::all_of(TagSet::FROZEN).with_none(TagSet::SKIP_FREEZE);
            let mut thawed = 0usize;
            for entity in world.entities_with(filter) {
                commands.remove_tags(entity, TagSet::FROZEN);
                thawed += 1;
            }
            if thawed > 0 {
                log::debug!("camera moved, thawed {thawed} entities");
            }
            return;
        }

        // Settled entities: bounded, not moving, not opted out.
        let freezable = TagFilter::none_of(TagSet::FROZEN | TagSet::SKIP_FREEZE);
        for entity in world.entities_with(freezable) {
            if world.bounds(entity).is_some() && world.heading(entity).is_none() {
                commands.add_tags(entity, TagSet::FROZEN);
            }
        }

        // A frozen entity that regained a heading must thaw or its bounds
        // would go stale while it moves.
        for entity in world.entities_with(TagFilter::all_of(TagSet::FROZEN)) {
            if world.heading(entity).is_some() {
                commands.remove_tags(entity, TagSet::FROZEN);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::ecs::command::CommandQueues;
    use crate::ecs::components::Heading;
    use crate::ecs::systems::raycast::QueryBuffer;
    use crate::ecs::world::World;
    use crate::foundation::math::Vec3;
    use crate::input::PointerState;
    use crate::simulation::FrameInput;

    fn run_freeze(world: &mut World, camera_moved: bool) {
        let camera = Camera::default();
        let pointer = PointerState::new(640.0, 480.0);
        let mut query = QueryBuffer::new();
        let mut commands = CommandQueues::new();
        let mut input = FrameInput::idle(0.016);
        input.camera_moved = camera_moved;
        {
            let mut ctx = TickContext {
                world,
                camera: &camera,
                pointer: &pointer,
                query: &mut query,
                commands: &mut commands,
                input: &input,
            };
            FreezeStage.run(&mut ctx);
        }
        commands.apply_all(world);
    }

    #[test]
    fn test_settled_entities_freeze() {
        let mut world = World::new();
        let settled = world.spawn_at(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5), TagSet::empty());
        let boundless = world.spawn(TagSet::empty());

        run_freeze(&mut world, false);

        assert!(world.has_tags(settled, TagSet::FROZEN));
        assert!(!world.has_tags(boundless, TagSet::FROZEN));
    }

    #[test]
    fn test_moving_entities_do_not_freeze() {
        let mut world = World::new();
        let mover = world.spawn_at(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5), TagSet::empty());
        world.set_heading(mover, Heading::new(Vec3::new(1.0, 0.0, 0.0)));

        run_freeze(&mut world, false);
        assert!(!world.has_tags(mover, TagSet::FROZEN));
    }

    #[test]
    fn test_skip_freeze_opts_out() {
        let mut world = World::new();
        let skipped = world.spawn_at(
            Vec3::zeros(),
            Vec3::new(0.5, 0.5, 0.5),
            TagSet::SKIP_FREEZE,
        );

        run_freeze(&mut world, false);
        assert!(!world.has_tags(skipped, TagSet::FROZEN));
    }

    #[test]
    fn test_rearmed_entity_thaws() {
        let mut world = World::new();
        let entity = world.spawn_at(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5), TagSet::empty());

        run_freeze(&mut world, false);
        assert!(world.has_tags(entity, TagSet::FROZEN));

        world.set_heading(entity, Heading::new(Vec3::new(1.0, 0.0, 0.0)));
        run_freeze(&mut world, false);
        assert!(!world.has_tags(entity, TagSet::FROZEN));
    }

    #[test]
    fn test_camera_movement_thaws_everything_for_one_tick() {
        let mut world = World::new();
        let frozen = world.spawn_at(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5), TagSet::empty());
        let opted_out = world.spawn_at(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.5, 0.5, 0.5),
            TagSet::SKIP_FREEZE | TagSet::FROZEN,
        );

        run_freeze(&mut world, false);
        assert!(world.has_tags(frozen, TagSet::FROZEN));

        run_freeze(&mut world, true);
        assert!(!world.has_tags(frozen, TagSet::FROZEN));
        // SKIP_FREEZE entities keep whatever tag they carry.
        assert!(world.has_tags(opted_out, TagSet::FROZEN));

        // The following quiet tick refreezes the settled entity.
        run_freeze(&mut world, false);
        assert!(world.has_tags(frozen, TagSet::FROZEN));
    }
}
