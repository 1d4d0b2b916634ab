//! Chess-board picking demo
//!
//! Drives the engine with a scripted frame sequence instead of a real
//! window: settle the board, hover the white king's pawn, click it, and
//! dispatch it across the board to the configured destination. Run with
//! `RUST_LOG=debug cargo run -p chess` to watch the pipeline work.

mod board;
mod bootstrap;
mod components;
mod config;

use sim_engine::foundation::math::Vec4;
use sim_engine::prelude::*;

use board::{BoardFile, BoardPosition};
use bootstrap::ChessScene;
use config::DemoConfig;

/// Frame time of the scripted driver, one 60 Hz frame
const FRAME_DT: f32 = 1.0 / 60.0;

/// Travel frames before the driver gives up waiting for arrival
const MAX_TRAVEL_FRAMES: usize = 600;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("engine error: {0}")]
    Sim(#[from] SimError),

    #[error("board error: {0}")]
    Board(#[from] board::BoardError),

    #[error("{0} does not project onto the viewport")]
    OffScreen(BoardPosition),
}

fn main() -> Result<(), DemoError> {
    sim_engine::foundation::logging::init_with_default("info");

    let mut timer = Timer::new();
    let config = DemoConfig::load_or_default("chess.toml");
    let mut sim = Simulation::new(config.sim.clone())?;
    let scene = bootstrap::spawn_board(sim.world_mut(), &config.board)?;

    // One idle frame settles the board; every tile and piece freezes.
    sim.tick(&FrameInput::idle(FRAME_DT));

    let pawn_square = BoardPosition::new(BoardFile::E, 2)?;
    let pawn_world = pawn_square.to_world(config.board.origin, config.board.spacing);
    let pixel = screen_position_of(sim.camera(), &config.sim, pawn_world)
        .ok_or(DemoError::OffScreen(pawn_square))?;
    let Some(pawn) = scene.piece_near(sim.world(), pawn_world, config.board.spacing * 0.5)
    else {
        log::warn!("no piece on {pawn_square}, nothing to demonstrate");
        return Ok(());
    };

    // Hover the pawn, then click it.
    sim.tick(&FrameInput::idle(FRAME_DT).with_pointer(pixel.x, pixel.y));
    report_tagged(&sim, &scene, TagSet::HOVERED, "hovered");

    sim.tick(&FrameInput::idle(FRAME_DT).with_pointer(pixel.x, pixel.y).with_click());
    report_tagged(&sim, &scene, TagSet::SELECTED, "selected");

    // Dispatch the selection; motion starts once the commands land.
    let mut dispatch = FrameInput::idle(FRAME_DT);
    dispatch.move_selected = true;
    sim.tick(&dispatch);

    let mut frames = 0usize;
    while sim.world().destination(pawn).is_some() && frames < MAX_TRAVEL_FRAMES {
        sim.tick(&FrameInput::idle(FRAME_DT));
        frames += 1;
    }

    match sim.world().position(pawn) {
        Some(position) => {
            match BoardPosition::from_world(position.value, config.board.origin, config.board.spacing)
            {
                Ok(square) => log::info!(
                    "{} arrived on {square} after {frames} frames",
                    scene.describe(pawn).map_or("piece".into(), ToString::to_string)
                ),
                Err(_) => log::warn!(
                    "piece stopped off the board at {:?} after {frames} frames",
                    position.value
                ),
            }
        }
        None => log::warn!("moved piece vanished from the world"),
    }

    // A final idle frame lets the settled piece refreeze.
    sim.tick(&FrameInput::idle(FRAME_DT));

    timer.update();
    log::info!(
        "demo complete: {} ticks in {:.1} ms",
        sim.tick_count(),
        timer.delta_time() * 1000.0
    );
    Ok(())
}

/// Log every entity carrying `tags`, naming pieces where possible
fn report_tagged(sim: &Simulation, scene: &ChessScene, tags: TagSet, verb: &str) {
    for entity in sim.world().entities_with(TagFilter::all_of(tags)) {
        match scene.describe(entity) {
            Some(piece) => log::info!("{verb}: {piece}"),
            None => log::info!("{verb}: {entity:?}"),
        }
    }
}

/// Project a world-space point to pixel coordinates
///
/// The inverse of the engine's pointer-to-ray path; returns `None` when
/// the point is behind the camera or outside the viewport.
fn screen_position_of(camera: &Camera, config: &SimConfig, point: Vec3) -> Option<Vec2> {
    let clip = camera.view_projection_matrix() * Vec4::new(point.x, point.y, point.z, 1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
        return None;
    }
    Some(Vec2::new(
        (ndc_x + 1.0) * 0.5 * config.viewport.width,
        (1.0 - ndc_y) * 0.5 * config.viewport.height,
    ))
}
