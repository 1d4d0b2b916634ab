//! Pointer state for picking operations
//!
//! Tracks the per-frame pointer position in pixels and converts it to
//! Normalized Device Coordinates (NDC) for ray casting. A pointer that
//! is absent or outside the viewport yields no NDC at all, which is how
//! the query stage knows to skip the frame.

use crate::foundation::math::Vec2;

/// Pointer state for picking operations
#[derive(Debug, Clone)]
pub struct PointerState {
    /// Viewport width in pixels
    window_width: f32,
    /// Viewport height in pixels
    window_height: f32,
    /// Pointer position in pixels from the top-left, if present
    position: Option<Vec2>,
    /// Primary button pressed this frame
    clicked: bool,
}

impl PointerState {
    /// Create pointer state for a viewport of the given size
    pub fn new(window_width: f32, window_height: f32) -> Self {
        Self {
            window_width,
            window_height,
            position: None,
            clicked: false,
        }
    }

    /// Update viewport size after a resize
    pub fn set_window_size(&mut self, width: f32, height: f32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// Record this frame's pointer position and click state
    pub fn begin_frame(&mut self, position: Option<Vec2>, clicked: bool) {
        self.position = position;
        self.clicked = clicked;
    }

    /// Pointer position in pixels, if the pointer is present
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Whether the primary button was pressed this frame
    pub fn clicked(&self) -> bool {
        self.clicked
    }

    /// Whether the pointer is present and inside the viewport
    pub fn in_viewport(&self) -> bool {
        self.position.is_some_and(|p| {
            p.x >= 0.0 && p.x <= self.window_width && p.y >= 0.0 && p.y <= self.window_height
        })
    }

    /// Convert the pointer position to Normalized Device Coordinates
    ///
    /// NDC range is `[-1, 1]` on both axes with Y pointing up, matching
    /// the projection convention in [`crate::camera::Camera`]. The pixel
    /// origin is top-left, so Y is flipped here.
    ///
    /// Returns `None` when the pointer is absent or outside the
    /// viewport.
    pub fn screen_to_ndc(&self) -> Option<(f32, f32)> {
        if !self.in_viewport() {
            return None;
        }
        let position = self.position?;
        let ndc_x = (position.x / self.window_width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (position.y / self.window_height) * 2.0;
        Some((ndc_x, ndc_y))
    }
}
