//! Position component

use crate::foundation::math::Vec3;

/// World-space position of an entity
///
/// Mutated in place by the translation stage (single writer per entity) or
/// by spawn logic; every other stage reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Location in world space
    pub value: Vec3,
}

impl Position {
    /// Create a position from coordinates
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            value: Vec3::new(x, y, z),
        }
    }

    /// Create a position from a vector
    pub fn from_vec(value: Vec3) -> Self {
        Self { value }
    }

    /// Euclidean distance to a point
    pub fn distance_to(&self, target: Vec3) -> f32 {
        (self.value - target).norm()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            value: Vec3::zeros(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_position_creation() {
        let position = Position::new(1.0, 2.0, 3.0);
        assert_eq!(position.value, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Position::default().value, Vec3::zeros());
    }

    #[test]
    fn test_distance_to() {
        let position = Position::new(0.0, 0.0, 0.0);
        assert_relative_eq!(
            position.distance_to(Vec3::new(3.0, 4.0, 0.0)),
            5.0,
            epsilon = 1e-6
        );
        assert_eq!(position.distance_to(Vec3::zeros()), 0.0);
    }
}
