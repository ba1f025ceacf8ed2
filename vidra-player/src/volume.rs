use log::debug;

use crate::PlaybackController;
use crate::backend::{FullscreenSurface, MediaBackend};
use crate::scheduler::Scheduler;

const DRIFT: f64 = 1e-9;

/// Snap to the nearest hundredth when only float drift separates them, so
/// repeated keyboard steps land on exact values. Other levels pass through.
pub(crate) fn snap_drift(volume: f64) -> f64 {
    let hundredths = (volume * 100.0).round() / 100.0;
    if (volume - hundredths).abs() < DRIFT {
        hundredths
    } else {
        volume
    }
}

impl<B, S> PlaybackController<B, S>
where
    B: MediaBackend + FullscreenSurface,
    S: Scheduler,
{
    /// Set the output volume. Zero reads as muted; any audible level clears
    /// a mute the backend is still holding.
    pub(crate) fn set_volume(&mut self, volume: f64) {
        self.session.set_volume(volume);
        let volume = self.session.volume();

        self.session.set_muted(volume == 0.0);
        self.backend.set_volume(volume);
        if volume > 0.0 && self.backend.muted() {
            self.backend.set_muted(false);
        }
    }

    pub(crate) fn toggle_mute(&mut self) {
        let muted = !self.session.is_muted();
        self.session.set_muted(muted);
        self.backend.set_muted(muted);

        if !muted && self.session.volume() == 0.0 {
            let restored = self.config.unmute_volume;
            debug!("[Player] Unmuted at zero volume, restoring {}", restored);
            self.session.set_volume(restored);
            self.backend.set_volume(self.session.volume());
        }
    }

    /// Keyboard volume step. At a bound the step changes nothing.
    pub(crate) fn step_volume(&mut self, delta: f64) {
        let current = self.session.volume();
        let target = snap_drift((current + delta).clamp(0.0, 1.0));
        if target == current {
            return;
        }
        self.set_volume(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_removes_float_drift() {
        let mut volume: f64 = 1.0;
        for _ in 0..5 {
            volume = snap_drift(volume - 0.1);
        }
        assert_eq!(volume, 0.5);

        assert_eq!(snap_drift(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_snap_keeps_off_grid_levels() {
        assert_eq!(snap_drift(0.37), 0.37);
        assert_eq!(snap_drift(0.304_999), 0.304_999);
        assert_eq!(snap_drift(0.333 + 0.1), 0.333 + 0.1);
        assert_eq!(snap_drift(0.0), 0.0);
    }
}
