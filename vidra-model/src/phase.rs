use std::fmt::{self, Display};

/// Transport phase of a mounted player.
///
/// `Loading` is entered on mount, on every quality switch and whenever the
/// backend reports buffering. `Failed` is entered on a backend-reported
/// playback error and left by the next successful play or quality switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlaybackPhase {
    #[default]
    Loading,
    Ready,
    Playing,
    Paused,
    Ended,
    Failed,
}

impl Display for PlaybackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackPhase::Loading => "loading",
            PlaybackPhase::Ready => "ready",
            PlaybackPhase::Playing => "playing",
            PlaybackPhase::Paused => "paused",
            PlaybackPhase::Ended => "ended",
            PlaybackPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}
