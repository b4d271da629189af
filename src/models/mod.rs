pub mod overlay;
pub mod pattern;
pub mod target;

pub use overlay::{iso_timestamp, DetectionEvent, OverlayDetails, OverlayId, OverlayRequest};
pub use pattern::{MatchMode, PatternSet};
pub use target::{Target, TargetCategory};
