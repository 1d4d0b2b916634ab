//! Game-specific components
//!
//! The engine only knows about positions, bounds, tags and motion; what
//! a piece *is* lives here, in side tables keyed by entity.

use std::fmt;

use crate::board::BoardPosition;

/// Type of chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// The king
    King,
    /// The queen
    Queen,
    /// A bishop
    Bishop,
    /// A knight
    Knight,
    /// A rook
    Rook,
    /// A pawn
    Pawn,
}

impl PieceKind {
    /// Lowercase display name
    pub fn name(self) -> &'static str {
        match self {
            Self::King => "king",
            Self::Queen => "queen",
            Self::Bishop => "bishop",
            Self::Knight => "knight",
            Self::Rook => "rook",
            Self::Pawn => "pawn",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the two opposing sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    /// The side that starts on ranks 1 and 2
    White,
    /// The side that starts on ranks 8 and 7
    Black,
}

impl Team {
    /// Both teams, white first
    pub const BOTH: [Self; 2] = [Self::White, Self::Black];

    /// Rank the team's major pieces start on
    pub fn back_rank(self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => 8,
        }
    }

    /// Rank the team's pawns start on
    pub fn pawn_rank(self) -> i32 {
        match self {
            Self::White => 2,
            Self::Black => 7,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => f.write_str("white"),
            Self::Black => f.write_str("black"),
        }
    }
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// What kind of piece this is
    pub kind: PieceKind,
    /// Which side it belongs to
    pub team: Team,
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.team, self.kind)
    }
}

/// One square of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Where on the board this tile sits
    pub position: BoardPosition,
    /// Whether the tile is dark
    pub dark: bool,
}
