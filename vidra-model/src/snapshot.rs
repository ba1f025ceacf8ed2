use crate::{PlaybackPhase, QualityLabel, format_timestamp};

/// Read-only view of a player session handed to the embedding page.
///
/// Produced fresh from the controller after every update; the page renders
/// from it and never mutates it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaybackSnapshot {
    pub phase: PlaybackPhase,
    pub is_playing: bool,
    pub is_loading: bool,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub is_muted: bool,
    pub is_fullscreen: bool,
    pub controls_visible: bool,
    pub active_quality: QualityLabel,
    /// Quality labels in catalog order.
    pub qualities: Vec<QualityLabel>,
    pub last_error: Option<String>,
}

impl PlaybackSnapshot {
    /// The quality menu is only offered when there is something to pick.
    pub fn quality_menu_available(&self) -> bool {
        self.qualities.len() > 1
    }

    /// Volume the slider should show; a muted player displays zero.
    pub fn effective_volume(&self) -> f64 {
        if self.is_muted { 0.0 } else { self.volume }
    }

    /// Whether the speaker icon should render as muted.
    pub fn shows_muted_icon(&self) -> bool {
        self.is_muted || self.volume == 0.0
    }

    /// Clock text, e.g. `01:05 / 10:00`.
    pub fn clock(&self) -> String {
        format!(
            "{} / {}",
            format_timestamp(self.current_time),
            format_timestamp(self.duration)
        )
    }

    /// Playback progress in `[0, 1]`; zero while the duration is unknown.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PlaybackSnapshot {
        PlaybackSnapshot {
            phase: PlaybackPhase::Paused,
            is_playing: false,
            is_loading: false,
            current_time: 65.0,
            duration: 600.0,
            volume: 0.4,
            is_muted: true,
            is_fullscreen: false,
            controls_visible: true,
            active_quality: "720p".into(),
            qualities: vec!["1080p".into(), "720p".into()],
            last_error: None,
        }
    }

    #[test]
    fn test_overlay_helpers() {
        let snap = snapshot();
        assert!(snap.quality_menu_available());
        assert_eq!(snap.effective_volume(), 0.0);
        assert!(snap.shows_muted_icon());
        assert_eq!(snap.clock(), "01:05 / 10:00");
        assert!((snap.progress() - 65.0 / 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_without_duration() {
        let snap = PlaybackSnapshot {
            duration: 0.0,
            qualities: vec!["720p".into()],
            ..snapshot()
        };
        assert_eq!(snap.progress(), 0.0);
        assert!(!snap.quality_menu_available());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_snapshot_serializes_phase_snake_case() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["phase"], "paused");
        assert_eq!(json["active_quality"], "720p");
    }
}
