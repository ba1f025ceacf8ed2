//! Core data model definitions shared across Vidra crates.

pub mod options;
pub mod phase;
pub mod snapshot;
pub mod source;
pub mod time;

// Intentionally curated re-exports for downstream consumers.
pub use options::PlayerOptions;
pub use phase::PlaybackPhase;
pub use snapshot::PlaybackSnapshot;
pub use source::{MediaFormat, QualityLabel, Source};
pub use time::format_timestamp;
