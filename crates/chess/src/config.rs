//! Demo configuration
//!
//! Engine settings plus the board layout, loadable from `chess.toml`
//! next to the binary. Missing files and missing keys fall back to a
//! playable default with the camera above the board.

use serde::{Deserialize, Serialize};
use sim_engine::config::{Config, SimConfig};
use sim_engine::prelude::Vec3;

/// Board layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// World position of tile A1
    pub origin: Vec3,
    /// Distance between adjacent tile centers
    pub spacing: f32,
    /// Half-extents of a piece's bounding volume
    pub piece_extents: Vec3,
    /// Half-extents of a tile's bounding volume
    pub tile_extents: Vec3,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            origin: Vec3::zeros(),
            spacing: 1.0,
            piece_extents: Vec3::new(0.4, 0.75, 0.4),
            tile_extents: Vec3::new(0.5, 0.05, 0.5),
        }
    }
}

/// Demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Engine settings
    pub sim: SimConfig,
    /// Board layout
    pub board: BoardConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let mut sim = SimConfig::default();
        // Hover over the white side looking across the board center.
        sim.camera.position = Vec3::new(3.5, 9.0, -3.0);
        sim.camera.target = Vec3::new(3.5, 0.0, 3.5);
        Self {
            sim,
            board: BoardConfig::default(),
        }
    }
}

impl Config for DemoConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_overlooks_the_board() {
        let config = DemoConfig::default();
        assert!(config.sim.validate().is_ok());
        assert_eq!(config.sim.camera.target, Vec3::new(3.5, 0.0, 3.5));
        assert!(config.sim.camera.position.y > 0.0);
    }

    #[test]
    fn test_partial_file_keeps_demo_defaults() {
        let parsed: DemoConfig = toml::from_str("[board]\nspacing = 2.0\n").unwrap();
        assert_eq!(parsed.board.spacing, 2.0);
        assert_eq!(parsed.board.origin, Vec3::zeros());
        // The demo camera default survives, not the engine one.
        assert_eq!(parsed.sim.camera.position, Vec3::new(3.5, 9.0, -3.0));
    }
}
