//! Simulation context
//!
//! [`Simulation`] owns everything a tick touches: the world, the camera,
//! the pointer state, the persistent query buffer, the command queues
//! and the stage schedule. There is no global state anywhere in the
//! engine; embedders construct as many independent simulations as they
//! need and drive each one with [`Simulation::tick`].

use crate::camera::Camera;
use crate::config::{ConfigError, SimConfig};
use crate::ecs::command::CommandQueues;
use crate::ecs::scheduler::{Schedule, ScheduleError};
use crate::ecs::systems::{
    ApplyCommandsStage, BoundsRefreshStage, FreezeStage, InputOpsStage, QueryBuffer,
    ResultSortStage, SelectionResolveStage, SpatialQueryStage, TranslationStage,
};
use crate::ecs::world::World;
use crate::foundation::math::Vec2;
use crate::input::PointerState;

/// Errors surfaced while constructing a simulation
///
/// Construction is the only fallible part of the engine; a simulation
/// that builds successfully ticks without panicking.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    /// A setting failed validation
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The stage graph could not be planned
    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

/// Everything the host sampled for one frame
///
/// All triggers are edge signals: `clicked` means the button went down
/// this frame, not that it is held.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Pointer position in pixels from the top-left, if present
    pub pointer: Option<Vec2>,
    /// Primary button pressed this frame
    pub clicked: bool,
    /// Clear the entire selection
    pub deselect: bool,
    /// Put every selected entity on the configured nudge heading
    pub nudge_selected: bool,
    /// Send every selected entity to the configured destination
    pub move_selected: bool,
    /// The camera moved since the last frame
    pub camera_moved: bool,
    /// Frame time in seconds
    pub dt: f32,
}

impl FrameInput {
    /// A frame with no pointer and no triggers
    pub fn idle(dt: f32) -> Self {
        Self {
            pointer: None,
            clicked: false,
            deselect: false,
            nudge_selected: false,
            move_selected: false,
            camera_moved: false,
            dt,
        }
    }

    /// Place the pointer at a pixel position
    #[must_use]
    pub fn with_pointer(mut self, x: f32, y: f32) -> Self {
        self.pointer = Some(Vec2::new(x, y));
        self
    }

    /// Press the primary button this frame
    #[must_use]
    pub fn with_click(mut self) -> Self {
        self.clicked = true;
        self
    }
}

/// Borrowed view of the simulation handed to each stage
///
/// The fields are disjoint borrows of [`Simulation`], so a stage can
/// hold `&mut` references into several of them at once.
pub struct TickContext<'a> {
    /// Entity and component storage
    pub world: &'a mut World,
    /// Camera used for ray casting
    pub camera: &'a Camera,
    /// This frame's pointer state
    pub pointer: &'a PointerState,
    /// Persistent spatial query results
    pub query: &'a mut QueryBuffer,
    /// Per-producer command buffers
    pub commands: &'a mut CommandQueues,
    /// This frame's input sample
    pub input: &'a FrameInput,
}

/// A self-contained picking and movement simulation
pub struct Simulation {
    world: World,
    camera: Camera,
    pointer: PointerState,
    query: QueryBuffer,
    commands: CommandQueues,
    schedule: Schedule,
    tick_count: u64,
}

impl Simulation {
    /// Build a simulation from validated settings
    ///
    /// Validates the configuration, places the camera, registers the
    /// built-in stage pipeline and plans it. Every hard failure the
    /// engine can produce happens here.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let mut camera = Camera::perspective(
            config.camera.position,
            config.camera.fov_degrees,
            config.viewport.aspect(),
            config.camera.near,
            config.camera.far,
        );
        camera.set_target(config.camera.target);
        let pointer = PointerState::new(config.viewport.width, config.viewport.height);

        let mut schedule = Schedule::new();
        schedule.add_stage(Box::new(InputOpsStage::new(config.ops.clone())));
        schedule.add_stage(Box::new(TranslationStage));
        schedule.add_stage(Box::new(BoundsRefreshStage));
        schedule.add_stage(Box::new(SpatialQueryStage::new()));
        schedule.add_stage(Box::new(ResultSortStage));
        schedule.add_stage(Box::new(SelectionResolveStage));
        schedule.add_stage(Box::new(FreezeStage));
        schedule.add_stage(Box::new(ApplyCommandsStage));
        schedule.build_plan()?;

        log::info!("simulation ready, stage batches: {:?}", schedule.batch_names());

        Ok(Self {
            world: World::new(),
            camera,
            pointer,
            query: QueryBuffer::new(),
            commands: CommandQueues::new(),
            schedule,
            tick_count: 0,
        })
    }

    /// Entity and component storage
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable entity and component storage, for scene setup
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The simulation camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access
    ///
    /// Hosts that move the camera should raise `camera_moved` on the
    /// next frame's input so frozen entities get their bounds refreshed.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// This frame's pointer state
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Last tick's spatial query results, sorted nearest first
    pub fn query(&self) -> &QueryBuffer {
        &self.query
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self, input: &FrameInput) {
        self.pointer.begin_frame(input.pointer, input.clicked);

        let Self {
            world,
            camera,
            pointer,
            query,
            commands,
            schedule,
            tick_count,
        } = self;

        let mut ctx = TickContext {
            world,
            camera,
            pointer,
            query,
            commands,
            input,
        };
        schedule.run_tick(&mut ctx);

        *tick_count += 1;
        log::trace!("tick {tick_count} complete");
    }
}
