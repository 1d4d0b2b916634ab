//! Result sorter: deterministic total order over intersection results
//!
//! The order is: every hit before every miss, hits ascending by distance,
//! misses keeping their relative input order. The resolver afterwards
//! only ever looks at index 0.

use crate::ecs::scheduler::{Resources, Stage, StagePhase};
use crate::ecs::systems::raycast::IntersectionResult;
use crate::simulation::TickContext;
use std::cmp::Ordering;

/// Whether `a` must sort strictly before `b`
fn ranks_before(a: &IntersectionResult, b: &IntersectionResult) -> bool {
    match (a.hit, b.hit) {
        (true, false) => true,
        (false, _) => false,
        (true, true) => a.distance.total_cmp(&b.distance) == Ordering::Less,
    }
}

/// Sort results in place under the pipeline's total order
///
/// Insertion sort: candidate counts are board-scale (tens, not
/// thousands), the input is nearly sorted across consecutive ticks, and
/// the swap-only inner loop keeps equal elements stable.
pub fn sort_results(results: &mut [IntersectionResult]) {
    for i in 1..results.len() {
        let mut j = i;
        while j > 0 && ranks_before(&results[j], &results[j - 1]) {
            results.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Per-tick stage wrapping [`sort_results`]
///
/// A disarmed buffer (skipped query) leaves the results untouched.
pub struct ResultSortStage;

impl Stage for ResultSortStage {
    fn name(&self) -> &'static str {
        "result_sort"
    }

    fn phase(&self) -> StagePhase {
        StagePhase::Simulation
    }

    fn dependencies(&self) -> &[&'static str] {
        &["spatial_query"]
    }

    fn reads(&self) -> Resources {
        Resources::QUERY_RESULTS
    }

    fn writes(&self) -> Resources {
        Resources::QUERY_RESULTS
    }

    fn run(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.query.is_armed() {
            sort_results(ctx.query.results_mut());
        }
    }
}
