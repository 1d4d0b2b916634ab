//! Translation stage: heading integration and destination arrival
//!
//! Advances every entity that carries both a position and a heading.
//! Positions are written in place (single writer per entity); arrival
//! cleanup goes through the motion command buffer so the heading and
//! destination columns never change mid-iteration.

use crate::ecs::scheduler::{Resources, Stage, StagePhase};
use crate::simulation::TickContext;

/// Per-tick motion integrator
///
/// Without a destination the update is unbounded movement:
/// `position += heading * dt`, every tick, until something external
/// removes the heading. With a destination the same update applies while
/// the remaining distance exceeds the arrival threshold; at or below it
/// the entity has arrived, optionally snaps exactly onto the target, and
/// queues removal of both motion components. The threshold comparison is
/// the entire arrival tolerance.
pub struct TranslationStage;

impl Stage for TranslationStage {
    fn name(&self) -> &'static str {
        "translation"
    }

    fn phase(&self) -> StagePhase {
        StagePhase::Simulation
    }

    fn dependencies(&self) -> &[&'static str] {
        &["input_ops"]
    }

    fn reads(&self) -> Resources {
        Resources::MOTION
    }

    fn writes(&self) -> Resources {
        Resources::POSITIONS | Resources::COMMANDS
    }

    fn run(&mut self, ctx: &mut TickContext<'_>) {
        let dt = ctx.input.dt;
        let commands = &mut ctx.commands.motion;
        ctx.world.for_each_mover(|entity, position, heading, destination| {
            match destination {
                None => {
                    position.value += heading.value * dt;
                }
                Some(destination) => {
                    if position.distance_to(destination.target) > destination.threshold {
                        position.value += heading.value * dt;
                    } else {
                        if destination.snap {
                            position.value = destination.target;
                        }
                        commands.remove_heading(entity);
                        commands.remove_destination(entity);
                        log::debug!("entity {entity:?} arrived at destination");
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::ecs::command::CommandQueues;
    use crate::ecs::components::{Destination, Heading, TagSet};
    use crate::ecs::systems::raycast::QueryBuffer;
    use crate::ecs::world::World;
    use crate::foundation::math::Vec3;
    use crate::input::PointerState;
    use crate::simulation::FrameInput;
    use approx::assert_relative_eq;

    fn run_tick(world: &mut World, dt: f32) {
        let camera = Camera::default();
        let pointer = PointerState::new(640.0, 480.0);
        let mut query = QueryBuffer::new();
        let mut commands = CommandQueues::new();
        let input = FrameInput::idle(dt);
        {
            let mut ctx = TickContext {
                world,
                camera: &camera,
                pointer: &pointer,
                query: &mut query,
                commands: &mut commands,
                input: &input,
            };
            TranslationStage.run(&mut ctx);
        }
        commands.apply_all(world);
    }

    #[test]
    fn test_unbounded_movement_advances_position() {
        let mut world = World::new();
        let entity = world.spawn_at(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5), TagSet::empty());
        world.set_heading(entity, Heading::new(Vec3::new(2.0, 0.0, 0.0)));

        run_tick(&mut world, 0.5);

        let position = world.position(entity).unwrap();
        assert_relative_eq!(position.value.x, 1.0, epsilon = 1e-6);
        // No destination means the heading persists.
        assert!(world.heading(entity).is_some());
    }

    #[test]
    fn test_motion_continues_outside_threshold() {
        let mut world = World::new();
        let entity = world.spawn_at(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5), TagSet::empty());
        world.set_heading(entity, Heading::new(Vec3::new(1.0, 0.0, 0.0)));
        world.set_destination(
            entity,
            Destination::new(Vec3::new(5.0, 0.0, 0.0), 0.1, true),
        );

        run_tick(&mut world, 1.0);

        let position = world.position(entity).unwrap();
        assert_relative_eq!(position.value.x, 1.0, epsilon = 1e-6);
        assert!(world.heading(entity).is_some());
        assert!(world.destination(entity).is_some());
    }

    #[test]
    fn test_arrival_snaps_and_removes_motion_state() {
        let mut world = World::new();
        let entity = world.spawn_at(
            Vec3::new(4.95, 0.0, 0.0),
            Vec3::new(0.5, 0.5, 0.5),
            TagSet::empty(),
        );
        world.set_heading(entity, Heading::new(Vec3::new(1.0, 0.0, 0.0)));
        world.set_destination(
            entity,
            Destination::new(Vec3::new(5.0, 0.0, 0.0), 0.1, true),
        );

        run_tick(&mut world, 1.0);

        // Snap puts the position exactly on the target even though the
        // step itself would have overshot.
        let position = world.position(entity).unwrap();
        assert_eq!(position.value, Vec3::new(5.0, 0.0, 0.0));
        assert!(world.heading(entity).is_none());
        assert!(world.destination(entity).is_none());
    }

    #[test]
    fn test_arrival_without_snap_keeps_position() {
        let mut world = World::new();
        let entity = world.spawn_at(
            Vec3::new(4.95, 0.0, 0.0),
            Vec3::new(0.5, 0.5, 0.5),
            TagSet::empty(),
        );
        world.set_heading(entity, Heading::new(Vec3::new(1.0, 0.0, 0.0)));
        world.set_destination(
            entity,
            Destination::new(Vec3::new(5.0, 0.0, 0.0), 0.1, false),
        );

        run_tick(&mut world, 1.0);

        let position = world.position(entity).unwrap();
        assert_relative_eq!(position.value.x, 4.95, epsilon = 1e-6);
        assert!(world.heading(entity).is_none());
        assert!(world.destination(entity).is_none());
    }

    #[test]
    fn test_arrival_is_idempotent() {
        let mut world = World::new();
        let entity = world.spawn_at(
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(0.5, 0.5, 0.5),
            TagSet::empty(),
        );
        world.set_heading(entity, Heading::new(Vec3::new(1.0, 0.0, 0.0)));
        world.set_destination(
            entity,
            Destination::new(Vec3::new(5.0, 0.0, 0.0), 0.0, true),
        );

        run_tick(&mut world, 1.0);
        assert!(world.heading(entity).is_none());
        assert!(world.destination(entity).is_none());

        // Further ticks do nothing without external re-arming.
        for _ in 0..3 {
            run_tick(&mut world, 1.0);
        }
        assert_eq!(world.position(entity).unwrap().value, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_threshold_requires_exact_arrival() {
        let mut world = World::new();
        // 4.5 and 0.5 are exact in binary, so the step lands exactly on 5.0.
        let entity = world.spawn_at(
            Vec3::new(4.5, 0.0, 0.0),
            Vec3::new(0.5, 0.5, 0.5),
            TagSet::empty(),
        );
        world.set_heading(entity, Heading::new(Vec3::new(0.5, 0.0, 0.0)));
        world.set_destination(
            entity,
            Destination::new(Vec3::new(5.0, 0.0, 0.0), 0.0, true),
        );

        // Not exactly there yet: still moving.
        run_tick(&mut world, 1.0);
        assert!(world.heading(entity).is_some());

        // The step landed exactly on the target; the next pass arrives.
        run_tick(&mut world, 1.0);
        assert!(world.heading(entity).is_none());
        assert_eq!(world.position(entity).unwrap().value.x, 5.0);
    }

    #[test]
    fn test_zero_dt_freezes_motion_but_not_arrival() {
        let mut world = World::new();
        let entity = world.spawn_at(
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(0.5, 0.5, 0.5),
            TagSet::empty(),
        );
        world.set_heading(entity, Heading::new(Vec3::new(1.0, 0.0, 0.0)));
        world.set_destination(
            entity,
            Destination::new(Vec3::new(5.0, 0.0, 0.0), 0.5, true),
        );

        // Already inside the threshold: arrival triggers even with dt 0.
        run_tick(&mut world, 0.0);
        assert!(world.heading(entity).is_none());
        assert_eq!(world.position(entity).unwrap().value, Vec3::new(5.0, 0.0, 0.0));
    }
}
