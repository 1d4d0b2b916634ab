//! Board coordinates
//!
//! A board position is a file letter (A-H) and a 1-based rank, with A1
//! in the near-left corner. Positions validate on construction, so a
//! [`BoardPosition`] that exists is always on the board.

use std::fmt;

use sim_engine::prelude::Vec3;

/// Column letter on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardFile {
    /// Leftmost file
    A,
    /// Second file
    B,
    /// Third file
    C,
    /// Fourth file, the queen's file
    D,
    /// Fifth file, the king's file
    E,
    /// Sixth file
    F,
    /// Seventh file
    G,
    /// Rightmost file
    H,
}

impl BoardFile {
    /// All files in board order
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    /// Zero-based column index
    pub fn index(self) -> u8 {
        self as u8
    }

    /// One-based column number
    pub fn number(self) -> i32 {
        i32::from(self.index()) + 1
    }
}

impl fmt::Display for BoardFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Errors for off-board coordinates
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// File was outside 1 to 8
    #[error("file must be between 1 and 8 (inclusive), got {0}")]
    FileOutOfRange(i32),

    /// Rank was outside 1 to 8
    #[error("rank must be between 1 and 8 (inclusive), got {0}")]
    RankOutOfRange(i32),
}

/// A validated position on the board, such as E2
///
/// Stored zero-based internally; the accessors speak the 1-based chess
/// convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardPosition {
    file: u8,
    rank: u8,
}

impl BoardPosition {
    /// Create a position from a file letter and 1-based rank
    pub fn new(file: BoardFile, rank: i32) -> Result<Self, BoardError> {
        if !(1..=8).contains(&rank) {
            return Err(BoardError::RankOutOfRange(rank));
        }
        Ok(Self {
            file: file.index(),
            rank: (rank - 1) as u8,
        })
    }

    /// Create a position from 1-based file and rank numbers
    pub fn from_numbers(file: i32, rank: i32) -> Result<Self, BoardError> {
        if !(1..=8).contains(&file) {
            return Err(BoardError::FileOutOfRange(file));
        }
        if !(1..=8).contains(&rank) {
            return Err(BoardError::RankOutOfRange(rank));
        }
        Ok(Self {
            file: (file - 1) as u8,
            rank: (rank - 1) as u8,
        })
    }

    /// Snap a world-space point to the tile it lies on
    pub fn from_world(point: Vec3, origin: Vec3, spacing: f32) -> Result<Self, BoardError> {
        let file = ((point.x - origin.x) / spacing).round() as i32 + 1;
        let rank = ((point.z - origin.z) / spacing).round() as i32 + 1;
        Self::from_numbers(file, rank)
    }

    /// Every position on the board, rank by rank from A1
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Self { file, rank }))
    }

    /// Column letter
    pub fn file(&self) -> BoardFile {
        BoardFile::ALL[usize::from(self.file)]
    }

    /// One-based column number
    pub fn file_number(&self) -> i32 {
        i32::from(self.file) + 1
    }

    /// One-based rank
    pub fn rank(&self) -> i32 {
        i32::from(self.rank) + 1
    }

    /// Whether this tile is dark, with A1 dark
    pub fn is_dark(&self) -> bool {
        (self.file + self.rank) % 2 == 0
    }

    /// Center of this tile in world space
    ///
    /// Files run along world X and ranks along world Z, starting from
    /// `origin` at A1.
    pub fn to_world(&self, origin: Vec3, spacing: f32) -> Vec3 {
        origin
            + Vec3::new(
                f32::from(self.file) * spacing,
                0.0,
                f32::from(self.rank) * spacing,
            )
    }
}

impl fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_round_trip() {
        let position = BoardPosition::new(BoardFile::E, 2).unwrap();
        assert_eq!(position.file(), BoardFile::E);
        assert_eq!(position.file_number(), 5);
        assert_eq!(position.rank(), 2);
        assert_eq!(position.to_string(), "E2");

        let same = BoardPosition::from_numbers(5, 2).unwrap();
        assert_eq!(position, same);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert_eq!(
            BoardPosition::new(BoardFile::A, 0),
            Err(BoardError::RankOutOfRange(0))
        );
        assert_eq!(
            BoardPosition::new(BoardFile::A, 9),
            Err(BoardError::RankOutOfRange(9))
        );
        assert_eq!(
            BoardPosition::from_numbers(0, 1),
            Err(BoardError::FileOutOfRange(0))
        );
        assert_eq!(
            BoardPosition::from_numbers(9, 8),
            Err(BoardError::FileOutOfRange(9))
        );
        // File is checked before rank when both are bad.
        assert_eq!(
            BoardPosition::from_numbers(9, 0),
            Err(BoardError::FileOutOfRange(9))
        );
    }

    #[test]
    fn test_corners_map_to_world() {
        let origin = Vec3::new(-2.0, 0.0, 1.0);
        let a1 = BoardPosition::new(BoardFile::A, 1).unwrap();
        let h8 = BoardPosition::new(BoardFile::H, 8).unwrap();

        assert_eq!(a1.to_world(origin, 1.0), origin);
        assert_eq!(h8.to_world(origin, 1.0), Vec3::new(5.0, 0.0, 8.0));
        assert_eq!(h8.to_world(origin, 2.0), Vec3::new(12.0, 0.0, 15.0));
    }

    #[test]
    fn test_world_round_trip() {
        let origin = Vec3::zeros();
        for position in BoardPosition::all() {
            let world = position.to_world(origin, 1.5);
            let back = BoardPosition::from_world(world, origin, 1.5).unwrap();
            assert_eq!(back, position);
        }
    }

    #[test]
    fn test_from_world_rejects_points_off_the_board() {
        let origin = Vec3::zeros();
        assert!(BoardPosition::from_world(Vec3::new(-1.0, 0.0, 0.0), origin, 1.0).is_err());
        assert!(BoardPosition::from_world(Vec3::new(0.0, 0.0, 8.0), origin, 1.0).is_err());
    }

    #[test]
    fn test_tile_shading_alternates() {
        let a1 = BoardPosition::new(BoardFile::A, 1).unwrap();
        let b1 = BoardPosition::new(BoardFile::B, 1).unwrap();
        let a2 = BoardPosition::new(BoardFile::A, 2).unwrap();
        let h8 = BoardPosition::new(BoardFile::H, 8).unwrap();

        assert!(a1.is_dark());
        assert!(!b1.is_dark());
        assert!(!a2.is_dark());
        assert!(h8.is_dark());
    }

    #[test]
    fn test_all_enumerates_the_full_board() {
        let squares: Vec<_> = BoardPosition::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0].to_string(), "A1");
        assert_eq!(squares[7].to_string(), "H1");
        assert_eq!(squares[63].to_string(), "H8");
    }
}
