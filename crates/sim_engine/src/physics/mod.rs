//! Physics module - Geometric queries
//!
//! Provides the ray and bounding-volume primitives used by the spatial
//! query pipeline. Intersection is against axis-aligned boxes only; the
//! simulation never tests actual mesh geometry.

pub mod collision;

pub use collision::{Ray, AABB};
