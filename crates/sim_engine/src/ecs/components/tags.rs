//! Marker tags and tag filters
//!
//! Tags are zero-size markers packed into one bit set per entity. The
//! picking pipeline communicates entirely through them: the spatial query
//! filters on `SELECTABLE`, the resolver maintains `HOVERED` and
//! `SELECTED`, and the freeze toggle maintains `FROZEN`.

use bitflags::bitflags;

bitflags! {
    /// Per-entity marker tag set
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TagSet: u8 {
        /// Candidate for pointer picking
        const SELECTABLE = 1 << 0;
        /// The pointer ray currently rests on this entity
        const HOVERED = 1 << 1;
        /// The entity was clicked while hovered
        const SELECTED = 1 << 2;
        /// The entity is static; per-frame bounds upkeep may skip it
        const FROZEN = 1 << 3;
        /// Opts the entity out of the freeze optimization entirely
        const SKIP_FREEZE = 1 << 4;
    }
}

/// All/None tag filter for world queries
///
/// An entity matches when it carries every tag in `all` and no tag in
/// `none`. The empty filter matches every live entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagFilter {
    /// Tags an entity must carry to match
    pub all: TagSet,
    /// Tags an entity must not carry to match
    pub none: TagSet,
}

impl TagFilter {
    /// Match entities carrying every tag in `all`
    pub fn all_of(all: TagSet) -> Self {
        Self {
            all,
            none: TagSet::empty(),
        }
    }

    /// Match entities carrying no tag in `none`
    pub fn none_of(none: TagSet) -> Self {
        Self {
            all: TagSet::empty(),
            none,
        }
    }

    /// Add excluded tags to this filter
    pub fn with_none(mut self, none: TagSet) -> Self {
        self.none |= none;
        self
    }

    /// Whether the given tag set satisfies this filter
    pub fn matches(&self, tags: TagSet) -> bool {
        tags.contains(self.all) && !tags.intersects(self.none)
    }
}
