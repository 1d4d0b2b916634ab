//! Ray and axis-aligned bounding box primitives

use crate::foundation::math::Vec3;

/// A ray in 3D space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized on construction)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    ///
    /// The direction is normalized; passing a zero vector yields a
    /// degenerate ray whose components are NaN and which hits nothing.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get the point along the ray at parameter `t`
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents (half-size)
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Test ray intersection with this AABB using the slab method
    ///
    /// Returns the distance to the entry point if the ray intersects, None
    /// otherwise. A ray starting inside the box reports distance 0.
    pub fn intersect_ray(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        let inv_dir = Vec3::new(
            if ray_dir.x != 0.0 { 1.0 / ray_dir.x } else { f32::INFINITY },
            if ray_dir.y != 0.0 { 1.0 / ray_dir.y } else { f32::INFINITY },
            if ray_dir.z != 0.0 { 1.0 / ray_dir.z } else { f32::INFINITY },
        );

        let t1 = (self.min.x - ray_origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray_origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray_origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray_origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray_origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray_origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // Ray intersects if tmax >= tmin and tmax >= 0
        if tmax >= tmin && tmax >= 0.0 {
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_direction_is_normalized() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -5.0));
        assert_relative_eq!(ray.direction.norm(), 1.0, epsilon = 1e-6);
        assert_eq!(ray.direction, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_ray_point_at() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.point_at(2.5), Vec3::new(3.5, 0.0, 0.0));
    }

    #[test]
    fn test_aabb_from_center_extents() {
        let aabb = AABB::from_center_extents(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(aabb.min, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(aabb.max, Vec3::new(1.5, 2.5, 3.5));
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.extents(), Vec3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_aabb_contains_point() {
        let aabb = AABB::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(aabb.contains_point(Vec3::zeros()));
        assert!(aabb.contains_point(Vec3::new(1.0, 1.0, 1.0)));
        assert!(!aabb.contains_point(Vec3::new(1.1, 0.0, 0.0)));
    }

    #[test]
    fn test_ray_hits_box_ahead() {
        let aabb = AABB::from_center_extents(Vec3::new(0.0, 0.0, -5.0), Vec3::new(1.0, 1.0, 1.0));
        let hit = aabb.intersect_ray(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(hit.unwrap(), 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ray_misses_box() {
        let aabb = AABB::from_center_extents(Vec3::new(5.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let hit = aabb.intersect_ray(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_ray_ignores_box_behind_origin() {
        let aabb = AABB::from_center_extents(Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 1.0, 1.0));
        let hit = aabb.intersect_ray(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_ray_inside_box_reports_zero() {
        let aabb = AABB::from_center_extents(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        let hit = aabb.intersect_ray(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(hit, Some(0.0));
    }

    #[test]
    fn test_axis_parallel_ray_with_zero_components() {
        // Direction has zero y and z; the slab test must not divide by zero.
        let aabb = AABB::from_center_extents(Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.5, 0.5, 0.5));
        let hit = aabb.intersect_ray(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(hit.unwrap(), 2.5, epsilon = 1e-6);
    }
}
