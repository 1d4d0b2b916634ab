//! Built-in pipeline stages
//!
//! One module per stage, in pipeline order: input triggers, translation,
//! bounds refresh, spatial query, result sort, selection resolve, freeze
//! bookkeeping, then command playback in the sync phase.

pub mod apply;
pub mod bounds_refresh;
pub mod freeze;
pub mod input_ops;
pub mod raycast;
pub mod selection;
pub mod sort;
pub mod translation;

pub use apply::ApplyCommandsStage;
pub use bounds_refresh::BoundsRefreshStage;
pub use freeze::FreezeStage;
pub use input_ops::InputOpsStage;
pub use raycast::{IntersectionResult, QueryBuffer, SpatialQueryStage};
pub use selection::SelectionResolveStage;
pub use sort::ResultSortStage;
pub use translation::TranslationStage;
