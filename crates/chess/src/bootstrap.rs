//! Scene setup
//!
//! Spawns the 8x8 tile grid and both teams' starting pieces into an
//! engine world. Pieces are selectable and carry bounding volumes sized
//! for picking; tiles get thin volumes and no selectable tag, so they
//! freeze on the first tick and never answer a spatial query.

use sim_engine::ecs::entity::ComponentMap;
use sim_engine::prelude::*;

use crate::board::{BoardError, BoardFile, BoardPosition};
use crate::components::{Piece, PieceKind, Team, Tile};
use crate::config::BoardConfig;

/// Back-rank piece layout from the A file to the H file
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Game-side component tables, keyed by engine entity
#[derive(Default)]
pub struct ChessScene {
    /// Piece data for piece entities
    pub pieces: ComponentMap<Piece>,
    /// Tile data for tile entities
    pub tiles: ComponentMap<Tile>,
}

impl ChessScene {
    /// The piece entity closest to a world-space point, within `radius`
    pub fn piece_near(&self, world: &World, point: Vec3, radius: f32) -> Option<Entity> {
        self.pieces
            .keys()
            .filter_map(|entity| {
                let position = world.position(entity)?;
                let distance = position.distance_to(point);
                (distance <= radius).then_some((entity, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity)
    }

    /// Describe an entity for logging, if it is a piece
    pub fn describe(&self, entity: Entity) -> Option<&Piece> {
        self.pieces.get(entity)
    }
}

/// Spawn the full starting position into the world
pub fn spawn_board(world: &mut World, board: &BoardConfig) -> Result<ChessScene, BoardError> {
    let mut scene = ChessScene::default();

    for position in BoardPosition::all() {
        let center = position.to_world(board.origin, board.spacing);
        let entity = world.spawn_at(center, board.tile_extents, TagSet::empty());
        scene.tiles.insert(
            entity,
            Tile {
                position,
                dark: position.is_dark(),
            },
        );
    }

    for team in Team::BOTH {
        for (index, kind) in BACK_RANK.iter().enumerate() {
            let file = BoardFile::ALL[index];
            let position = BoardPosition::new(file, team.back_rank())?;
            spawn_piece(world, &mut scene, board, *kind, team, position);
        }
        for file in BoardFile::ALL {
            let position = BoardPosition::new(file, team.pawn_rank())?;
            spawn_piece(world, &mut scene, board, PieceKind::Pawn, team, position);
        }
    }

    log::info!(
        "board ready: {} tiles, {} pieces",
        scene.tiles.len(),
        scene.pieces.len()
    );
    Ok(scene)
}

fn spawn_piece(
    world: &mut World,
    scene: &mut ChessScene,
    board: &BoardConfig,
    kind: PieceKind,
    team: Team,
    position: BoardPosition,
) {
    let center = position.to_world(board.origin, board.spacing);
    let entity = world.spawn_at(center, board.piece_extents, TagSet::SELECTABLE);
    scene.pieces.insert(entity, Piece { kind, team });
    log::debug!("spawned {team} {kind} at {position}");
}
