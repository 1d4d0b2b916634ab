//! Bounding volume component for spatial queries

use crate::foundation::math::Vec3;
use crate::physics::collision::AABB;

/// Axis-aligned bounding volume derived from an entity's visual extent
///
/// `world` is the box the spatial query actually intersects. The bounds
/// refresh stage recenters it on the owning entity's position each tick;
/// `local_extents` is the half-size of the entity's footprint and does not
/// change after spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Half-size of the entity's footprint
    pub local_extents: Vec3,
    /// Current world-space box
    pub world: AABB,
}

impl BoundingVolume {
    /// Create a bounding volume centered on `center`
    pub fn new(center: Vec3, local_extents: Vec3) -> Self {
        Self {
            local_extents,
            world: AABB::from_center_extents(center, local_extents),
        }
    }

    /// Recenter the world-space box on a new position
    pub fn refresh(&mut self, center: Vec3) {
        self.world = AABB::from_center_extents(center, self.local_extents);
    }
}
