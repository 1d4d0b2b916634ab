//! 3D camera
//!
//! Right-handed Y-up camera with an on-demand perspective projection.
//! Besides the usual view and projection matrices it provides the
//! inverse path the picking pipeline needs: normalized device
//! coordinates back out to a world-space ray.

use crate::foundation::math::{utils, Mat4, Point3, Vec3, Vec4};
use crate::physics::Ray;

/// Perspective camera in world space
///
/// Matrices are recomputed on every call rather than cached; camera
/// parameters change rarely enough that this has never shown up in a
/// profile.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera is looking at in world space
    pub target: Vec3,
    /// Up vector for camera orientation
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Distance to near clipping plane
    pub near: f32,
    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    ///
    /// `fov_degrees` is converted to radians internally; `near` must be
    /// positive and `far` must exceed it, which [`crate::config::SimConfig::validate`]
    /// checks before a camera is ever built from settings.
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("camera position updated to {position:?}");
    }

    /// Update the look-at point without moving the camera
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("camera target updated to {target:?}");
    }

    /// Set the look-at point and up vector together
    ///
    /// The up vector need not be perpendicular to the view direction;
    /// the view matrix orthonormalizes it.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
    }

    /// Update the aspect ratio after a viewport resize
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// World-to-camera transformation
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(self.target),
            &self.up,
        )
    }

    /// Perspective projection transformation
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Combined world-to-clip transformation
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unproject a screen position into a world-space ray
    ///
    /// Takes normalized device coordinates (`-1..1` on both axes, Y up)
    /// and returns a ray from the camera position through that point on
    /// the screen. Returns `None` when the view-projection matrix is not
    /// invertible, which only happens for degenerate camera parameters;
    /// callers treat that frame as pointing at nothing.
    pub fn screen_to_world_ray(&self, ndc_x: f32, ndc_y: f32) -> Option<Ray> {
        let inv_view_proj = self.view_projection_matrix().try_inverse()?;

        // Unproject matching points on the near and far planes.
        let ndc_near = Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let ndc_far = Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let world_near_h = inv_view_proj * ndc_near;
        let world_far_h = inv_view_proj * ndc_far;
        if world_near_h.w == 0.0 || world_far_h.w == 0.0 {
            return None;
        }

        let world_near = world_near_h.xyz() / world_near_h.w;
        let world_far = world_far_h.xyz() / world_far_h.w;

        Some(Ray::new(self.position, world_far - world_near))
    }
}

impl Default for Camera {
    /// Camera above and behind the origin, looking down at it
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, 3.0),
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}
