//! Component types attached to entities
//!
//! The world stores a fixed set of optional component slots per entity:
//! position, bounding volume, heading, destination, and a tag bit set.
//! There is no runtime type dispatch; each component kind has its own
//! typed column.

pub mod bounds;
pub mod movement;
pub mod tags;
pub mod transform;

pub use bounds::BoundingVolume;
pub use movement::{Destination, Heading};
pub use tags::{TagFilter, TagSet};
pub use transform::Position;
