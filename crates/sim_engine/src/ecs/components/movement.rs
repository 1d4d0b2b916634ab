//! Heading and destination components for entities in motion
//!
//! An entity moves while it carries a [`Heading`]. A [`Destination`] is an
//! optional companion that bounds the motion: when the entity comes within
//! the arrival threshold of the target, the translation stage removes both
//! components through the command buffer. A heading without a destination
//! is unbounded movement by design.

use crate::foundation::math::Vec3;

/// Motion vector for an entity
///
/// The direction is the unit movement direction and the magnitude is speed
/// in world units per second. Present only while the entity is moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    /// Direction times speed
    pub value: Vec3,
}

impl Heading {
    /// Create a heading from a direction-times-speed vector
    pub fn new(value: Vec3) -> Self {
        Self { value }
    }

    /// Create a heading pointing from `from` toward `to` at the given speed
    ///
    /// Returns a zero heading when the two points coincide.
    pub fn toward(from: Vec3, to: Vec3, speed: f32) -> Self {
        let offset = to - from;
        let distance = offset.norm();
        if distance > 0.0 {
            Self {
                value: offset * (speed / distance),
            }
        } else {
            Self {
                value: Vec3::zeros(),
            }
        }
    }

    /// Speed in world units per second
    pub fn speed(&self) -> f32 {
        self.value.norm()
    }
}

/// Arrival target for an entity in motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Destination {
    /// Target position in world space
    pub target: Vec3,
    /// Arrival radius. A remaining distance at or below this value counts
    /// as arrived; zero demands exact floating-point arrival. This is the
    /// whole tolerance, no extra epsilon is applied.
    pub threshold: f32,
    /// Place the entity exactly onto the target on arrival
    pub snap: bool,
}

impl Destination {
    /// Create a destination; negative thresholds are treated as zero
    pub fn new(target: Vec3, threshold: f32, snap: bool) -> Self {
        Self {
            target,
            threshold: threshold.max(0.0),
            snap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_heading_speed() {
        let heading = Heading::new(Vec3::new(3.0, 0.0, 4.0));
        assert_relative_eq!(heading.speed(), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_heading_toward_scales_to_speed() {
        let heading = Heading::toward(Vec3::zeros(), Vec3::new(10.0, 0.0, 0.0), 2.0);
        assert_eq!(heading.value, Vec3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(heading.speed(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_heading_toward_coincident_points_is_zero() {
        let at = Vec3::new(1.0, 2.0, 3.0);
        let heading = Heading::toward(at, at, 5.0);
        assert_eq!(heading.value, Vec3::zeros());
    }

    #[test]
    fn test_destination_clamps_negative_threshold() {
        let destination = Destination::new(Vec3::zeros(), -1.0, false);
        assert_eq!(destination.threshold, 0.0);
    }
}
