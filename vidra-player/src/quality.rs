//! Quality switching.
//!
//! A switch loads the new source and owes the user a restore: once the
//! backend reports data-ready, seek back to where they were and resume if
//! they were playing. Only the newest switch's restore is kept; a switch
//! issued while another is still loading replaces it.

use log::{debug, info};
use vidra_model::{PlaybackPhase, QualityLabel};

use crate::PlaybackController;
use crate::backend::{FullscreenSurface, MediaBackend};
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingSwap {
    pub(crate) label: QualityLabel,
    pub(crate) saved_time: f64,
    pub(crate) saved_playing: bool,
    // Phase to settle in when the restore does not resume playback
    pub(crate) resting_phase: PlaybackPhase,
}

fn resting_phase(prior: PlaybackPhase) -> PlaybackPhase {
    match prior {
        PlaybackPhase::Loading | PlaybackPhase::Failed => PlaybackPhase::Ready,
        PlaybackPhase::Playing => PlaybackPhase::Paused,
        other => other,
    }
}

impl<B, S> PlaybackController<B, S>
where
    B: MediaBackend + FullscreenSurface,
    S: Scheduler,
{
    pub(crate) fn switch_quality(&mut self, label: &str) {
        let Some(index) = self.session.catalog().position(label) else {
            debug!("[Quality] Unknown quality {}, ignoring", label);
            return;
        };
        if index == self.session.active_index() {
            debug!("[Quality] {} already active", label);
            return;
        }

        let resting = match self.pending_swap.take() {
            Some(previous) => {
                info!(
                    "[Quality] Superseding pending switch to {}",
                    previous.label
                );
                previous.resting_phase
            }
            None => {
                let prior = self
                    .session
                    .take_buffering_from()
                    .unwrap_or(self.session.phase());
                resting_phase(prior)
            }
        };

        let swap = PendingSwap {
            label: label.into(),
            saved_time: self.session.current_time(),
            saved_playing: self.session.is_playing(),
            resting_phase: resting,
        };
        info!(
            "[Quality] Switching to {} at {:.2}s (resume: {})",
            swap.label, swap.saved_time, swap.saved_playing
        );

        self.session.activate(index);
        self.session.clear_buffering();
        self.session.set_loading(true);
        self.session.set_phase(PlaybackPhase::Loading);
        self.session.set_error(None);
        self.pending_swap = Some(swap);

        self.backend.load(self.session.active_source());
    }

    /// Apply the owed restore once the new source is ready. A no-op when no
    /// switch is pending.
    pub(crate) fn restore_after_swap(&mut self) {
        let Some(swap) = self.pending_swap.take() else {
            return;
        };

        self.session.set_current_time(swap.saved_time);
        let target = self.session.current_time();
        self.backend.set_current_time(target);
        self.session.set_loading(false);
        self.session.set_phase(swap.resting_phase);

        debug!(
            "[Quality] Restored {} at {:.2}s (requested {:.2}s)",
            swap.label, target, swap.saved_time
        );

        // A switch made before the first metadata inherits the autoplay.
        let autoplay = std::mem::take(&mut self.autoplay_armed);
        if swap.saved_playing || autoplay {
            self.start_playback();
        } else {
            self.session.set_playing(false);
        }
    }

    pub fn pending_quality(&self) -> Option<&QualityLabel> {
        self.pending_swap.as_ref().map(|swap| &swap.label)
    }
}
