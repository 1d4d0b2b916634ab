//! Entity identifiers and per-entity component storage

use slotmap::{new_key_type, SecondaryMap};

new_key_type! {
    /// Opaque handle identifying one simulated object
    ///
    /// An entity has no intrinsic data; it is a generational key into the
    /// world's component maps. A key outlives the entity it named, so every
    /// lookup checks liveness.
    pub struct Entity;
}

/// Sparse per-entity storage for one optional component type
///
/// Each component kind lives in its own map keyed by [`Entity`]. Presence in
/// the map is what "the entity has this component" means.
pub type ComponentMap<T> = SecondaryMap<Entity, T>;
