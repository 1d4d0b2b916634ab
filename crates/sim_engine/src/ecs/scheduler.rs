//! Stage scheduling and dependency management
//!
//! Orders the per-tick stages into a deterministic plan built from each
//! stage's declared phase, dependencies, and read/write resource sets.
//! Planning happens once at construction; an impossible configuration is
//! a [`ScheduleError`], never a runtime panic.

use bitflags::bitflags;
use std::collections::HashSet;
use thiserror::Error;

use crate::simulation::TickContext;

bitflags! {
    /// Coarse shared resources a stage may read or write
    ///
    /// Conflict detection works on these bits: two stages may share a
    /// batch only if neither writes what the other touches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Resources: u8 {
        /// Entity positions
        const POSITIONS = 1 << 0;
        /// World-space bounding volumes
        const BOUNDS = 1 << 1;
        /// Per-entity tag sets
        const TAGS = 1 << 2;
        /// Heading and destination columns
        const MOTION = 1 << 3;
        /// The persistent intersection-results buffer
        const QUERY_RESULTS = 1 << 4;
        /// The deferred command queues
        const COMMANDS = 1 << 5;
    }
}

/// Stage execution phases with explicit ordering
///
/// Every simulation-phase stage finishes before the sync phase starts;
/// the sync phase is where deferred commands land in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StagePhase {
    /// Producers: input application, motion, query, resolution
    Simulation = 0,
    /// The single command-apply synchronization point
    Sync = 1,
}

/// A unit of per-tick work with declared data access
pub trait Stage {
    /// Unique stage name, referenced by dependents
    fn name(&self) -> &'static str;

    /// Which phase this stage belongs to
    fn phase(&self) -> StagePhase;

    /// Names of stages that must complete before this one runs
    fn dependencies(&self) -> &[&'static str] {
        &[]
    }

    /// Resources this stage reads
    fn reads(&self) -> Resources;

    /// Resources this stage writes
    fn writes(&self) -> Resources;

    /// Execute the stage
    fn run(&mut self, ctx: &mut TickContext<'_>);
}

/// Errors from schedule construction
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Two stages share a name
    #[error("duplicate stage name '{0}'")]
    DuplicateStage(&'static str),

    /// A declared dependency names no registered stage
    #[error("stage '{stage}' depends on unknown stage '{dependency}'")]
    UnknownDependency {
        /// The declaring stage
        stage: &'static str,
        /// The missing dependency name
        dependency: &'static str,
    },

    /// No progress could be made while batching a phase
    #[error("circular or unsatisfiable dependency among stages: {0}")]
    CircularDependency(String),
}

/// Deterministic execution plan over registered stages
///
/// Stages are grouped into conflict-free batches per phase. Within a
/// batch no stage writes a resource another member touches, so batch
/// members could run concurrently; execution is sequential because the
/// only data-parallel work in this pipeline lives inside the spatial
/// query stage itself.
#[derive(Default)]
pub struct Schedule {
    stages: Vec<Box<dyn Stage>>,
    plan: Vec<Vec<usize>>,
}

impl Schedule {
    /// Create an empty schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stage; registration order breaks ordering ties
    pub fn add_stage(&mut self, stage: Box<dyn Stage>) {
        self.stages.push(stage);
    }

    /// Build the execution plan from the registered stages
    pub fn build_plan(&mut self) -> Result<(), ScheduleError> {
        let mut names = HashSet::new();
        for stage in &self.stages {
            if !names.insert(stage.name()) {
                return Err(ScheduleError::DuplicateStage(stage.name()));
            }
        }
        for stage in &self.stages {
            for &dependency in stage.dependencies() {
                if !names.contains(dependency) {
                    return Err(ScheduleError::UnknownDependency {
                        stage: stage.name(),
                        dependency,
                    });
                }
            }
        }

        let mut plan = Vec::new();
        let mut completed: HashSet<&'static str> = HashSet::new();
        for phase in [StagePhase::Simulation, StagePhase::Sync] {
            let indices: Vec<usize> = (0..self.stages.len())
                .filter(|&idx| self.stages[idx].phase() == phase)
                .collect();
            self.plan_phase(&indices, &mut completed, &mut plan)?;
        }
        log::debug!("schedule plan: {:?}", Self::names_for(&self.stages, &plan));
        self.plan = plan;
        Ok(())
    }

    /// Batch one phase: repeatedly sweep the unscheduled stages in
    /// registration order, admitting every stage whose dependencies are
    /// complete and whose access does not conflict with the batch so far.
    fn plan_phase(
        &self,
        indices: &[usize],
        completed: &mut HashSet<&'static str>,
        plan: &mut Vec<Vec<usize>>,
    ) -> Result<(), ScheduleError> {
        let mut remaining: Vec<usize> = indices.to_vec();
        while !remaining.is_empty() {
            let mut batch = Vec::new();
            let mut batch_reads = Resources::empty();
            let mut batch_writes = Resources::empty();

            for &idx in &remaining {
                let stage = &self.stages[idx];
                let deps_satisfied = stage
                    .dependencies()
                    .iter()
                    .all(|dep| completed.contains(dep));
                let conflicts = stage.writes().intersects(batch_writes | batch_reads)
                    || stage.reads().intersects(batch_writes);
                if deps_satisfied && !conflicts {
                    batch.push(idx);
                    batch_reads |= stage.reads();
                    batch_writes |= stage.writes();
                }
            }

            if batch.is_empty() {
                let stuck: Vec<&str> = remaining
                    .iter()
                    .map(|&idx| self.stages[idx].name())
                    .collect();
                return Err(ScheduleError::CircularDependency(stuck.join(", ")));
            }

            for &idx in &batch {
                completed.insert(self.stages[idx].name());
            }
            remaining.retain(|idx| !batch.contains(idx));
            plan.push(batch);
        }
        Ok(())
    }

    /// Execute every planned batch in order
    pub fn run_tick(&mut self, ctx: &mut TickContext<'_>) {
        for batch in &self.plan {
            for &idx in batch {
                let stage = &mut self.stages[idx];
                log::trace!("stage '{}'", stage.name());
                stage.run(ctx);
            }
        }
    }

    /// Names of the planned batches in execution order
    pub fn batch_names(&self) -> Vec<Vec<&'static str>> {
        Self::names_for(&self.stages, &self.plan)
    }

    fn names_for(stages: &[Box<dyn Stage>], plan: &[Vec<usize>]) -> Vec<Vec<&'static str>> {
        plan.iter()
            .map(|batch| batch.iter().map(|&idx| stages[idx].name()).collect())
            .collect()
    }
}
