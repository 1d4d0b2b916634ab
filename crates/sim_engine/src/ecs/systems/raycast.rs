//! Spatial query stage: ray versus candidate bounding volumes
//!
//! Once per tick the pointer ray is tested against the world-space box of
//! every selectable entity. Each candidate owns exactly one slot in the
//! results buffer, written by an independent parallel task that reads
//! nothing but its own candidate, so the sweep needs no synchronization.

use rayon::prelude::*;

use crate::ecs::components::{TagFilter, TagSet};
use crate::ecs::entity::Entity;
use crate::ecs::scheduler::{Resources, Stage, StagePhase};
use crate::ecs::world::World;
use crate::physics::collision::{Ray, AABB};
use crate::simulation::TickContext;

/// Result of testing the pick ray against one candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionResult {
    /// Whether the ray crossed the candidate's bounding volume
    pub hit: bool,
    /// Distance from the ray origin to the entry point; `f32::MAX` on a miss
    pub distance: f32,
    /// The candidate this result belongs to
    pub entity: Entity,
}

impl IntersectionResult {
    /// A hit at the given distance
    pub fn hit_at(entity: Entity, distance: f32) -> Self {
        Self {
            hit: true,
            distance,
            entity,
        }
    }

    /// A miss; the distance is the maximum representable value
    pub fn miss(entity: Entity) -> Self {
        Self {
            hit: false,
            distance: f32::MAX,
            entity,
        }
    }

    /// Whether this result is a usable pick: a hit at a finite, forward distance
    pub fn is_valid_hit(&self) -> bool {
        self.hit && self.distance >= 0.0 && self.distance < f32::MAX
    }
}

/// Persistent storage for the spatial query
///
/// The candidate scratch and the results array live across ticks; the
/// results array is resized only when the candidate cardinality changes,
/// and any resize completes before the parallel sweep starts. `armed`
/// records whether the results belong to the current tick, so a tick that
/// skips the query (pointer off-viewport) cannot leak stale results into
/// the resolver.
#[derive(Debug, Default)]
pub struct QueryBuffer {
    candidates: Vec<(Entity, AABB)>,
    results: Vec<IntersectionResult>,
    armed: bool,
}

impl QueryBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Results of the most recent sweep; meaningful only while armed
    pub fn results(&self) -> &[IntersectionResult] {
        &self.results
    }

    /// Mutable view of the results for the in-place sorter
    pub fn results_mut(&mut self) -> &mut [IntersectionResult] {
        &mut self.results
    }

    /// Whether the results were produced this tick
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Mark the results as stale; downstream stages become no-ops
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Collect the candidate set: entities matching the filter that carry
    /// a bounding volume
    pub fn gather(&mut self, world: &World, filter: TagFilter) {
        self.candidates.clear();
        for entity in world.entities_with(filter) {
            if let Some(volume) = world.bounds(entity) {
                self.candidates.push((entity, volume.world));
            }
        }
    }

    /// Sweep the ray over the gathered candidates in parallel
    ///
    /// Writes exactly one result per candidate at the candidate's own
    /// index and arms the buffer. The output length always equals the
    /// candidate count.
    pub fn sweep(&mut self, ray: &Ray) {
        if self.results.len() != self.candidates.len() {
            self.results.resize(
                self.candidates.len(),
                IntersectionResult::miss(Entity::default()),
            );
        }
        self.results
            .par_iter_mut()
            .zip(self.candidates.par_iter())
            .for_each(|(slot, (entity, bounds))| {
                *slot = match bounds.intersect_ray(ray.origin, ray.direction) {
                    Some(distance) => IntersectionResult::hit_at(*entity, distance),
                    None => IntersectionResult::miss(*entity),
                };
            });
        self.armed = true;
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.results.capacity()
    }
}

/// Per-tick stage that builds the pointer ray and runs the sweep
///
/// When the pointer is outside the viewport the whole query is skipped
/// and the buffer is disarmed; hover and selection state then stay
/// untouched for the tick.
pub struct SpatialQueryStage {
    filter: TagFilter,
}

impl SpatialQueryStage {
    /// Query candidates carrying the `SELECTABLE` tag
    pub fn new() -> Self {
        Self {
            filter: TagFilter::all_of(TagSet::SELECTABLE),
        }
    }
}

impl Default for SpatialQueryStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for SpatialQueryStage {
    fn name(&self) -> &'static str {
        "spatial_query"
    }

    fn phase(&self) -> StagePhase {
        StagePhase::Simulation
    }

    fn dependencies(&self) -> &[&'static str] {
        &["bounds_refresh"]
    }

    fn reads(&self) -> Resources {
        Resources::BOUNDS | Resources::TAGS
    }

    fn writes(&self) -> Resources {
        Resources::QUERY_RESULTS
    }

    fn run(&mut self, ctx: &mut TickContext<'_>) {
        let Some((ndc_x, ndc_y)) = ctx.pointer.screen_to_ndc() else {
            ctx.query.disarm();
            return;
        };
        let Some(ray) = ctx.camera.screen_to_world_ray(ndc_x, ndc_y) else {
            ctx.query.disarm();
            return;
        };
        ctx.query.gather(ctx.world, self.filter);
        ctx.query.sweep(&ray);
        log::trace!(
            "spatial query swept {} candidates",
            ctx.query.results().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn board(world: &mut World) -> (Entity, Entity) {
        let near = world.spawn_at(
            Vec3::new(0.0, 0.0, -3.5),
            Vec3::new(0.5, 0.5, 0.5),
            TagSet::SELECTABLE,
        );
        let far = world.spawn_at(
            Vec3::new(0.0, 0.0, -5.5),
            Vec3::new(0.5, 0.5, 0.5),
            TagSet::SELECTABLE,
        );
        (near, far)
    }

    #[test]
    fn test_one_result_per_candidate() {
        let mut world = World::new();
        let (near, far) = board(&mut world);
        // A selectable entity without bounds is not a candidate.
        world.spawn(TagSet::SELECTABLE);

        let mut buffer = QueryBuffer::new();
        buffer.gather(&world, TagFilter::all_of(TagSet::SELECTABLE));
        buffer.sweep(&Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0)));

        assert!(buffer.is_armed());
        assert_eq!(buffer.results().len(), 2);
        let entities: Vec<_> = buffer.results().iter().map(|r| r.entity).collect();
        assert_eq!(entities, vec![near, far]);
    }

    #[test]
    fn test_hit_distances_and_misses() {
        let mut world = World::new();
        let (near, _far) = board(&mut world);

        let mut buffer = QueryBuffer::new();
        buffer.gather(&world, TagFilter::all_of(TagSet::SELECTABLE));
        buffer.sweep(&Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0)));

        let near_result = buffer.results()[0];
        assert_eq!(near_result.entity, near);
        assert!(near_result.is_valid_hit());
        assert_relative_eq!(near_result.distance, 3.0, epsilon = 1e-5);

        // Aim away from the board: every slot still exists, all misses.
        buffer.sweep(&Ray::new(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(buffer.results().len(), 2);
        for result in buffer.results() {
            assert!(!result.hit);
            assert_eq!(result.distance, f32::MAX);
            assert!(!result.is_valid_hit());
        }
    }

    #[test]
    fn test_results_reallocate_only_on_cardinality_change() {
        let mut world = World::new();
        board(&mut world);

        let mut buffer = QueryBuffer::new();
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        buffer.gather(&world, TagFilter::all_of(TagSet::SELECTABLE));
        buffer.sweep(&ray);
        let capacity = buffer.capacity();

        for _ in 0..4 {
            buffer.gather(&world, TagFilter::all_of(TagSet::SELECTABLE));
            buffer.sweep(&ray);
        }
        assert_eq!(buffer.capacity(), capacity);

        world.spawn_at(
            Vec3::new(2.0, 0.0, -2.0),
            Vec3::new(0.5, 0.5, 0.5),
            TagSet::SELECTABLE,
        );
        buffer.gather(&world, TagFilter::all_of(TagSet::SELECTABLE));
        buffer.sweep(&ray);
        assert_eq!(buffer.results().len(), 3);
    }

    #[test]
    fn test_disarm_marks_results_stale() {
        let mut world = World::new();
        board(&mut world);

        let mut buffer = QueryBuffer::new();
        buffer.gather(&world, TagFilter::all_of(TagSet::SELECTABLE));
        buffer.sweep(&Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0)));
        assert!(buffer.is_armed());

        buffer.disarm();
        assert!(!buffer.is_armed());
        // The data itself survives for reuse next tick.
        assert_eq!(buffer.results().len(), 2);
    }

    #[test]
    fn test_empty_candidate_set_arms_with_no_results() {
        let world = World::new();
        let mut buffer = QueryBuffer::new();
        buffer.gather(&world, TagFilter::all_of(TagSet::SELECTABLE));
        buffer.sweep(&Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0)));
        assert!(buffer.is_armed());
        assert!(buffer.results().is_empty());
    }
}
