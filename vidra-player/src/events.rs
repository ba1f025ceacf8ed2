//! Media backend notifications.

use log::{debug, error, info, trace};
use vidra_model::PlaybackPhase;

use crate::PlaybackController;
use crate::backend::{FullscreenSurface, MediaBackend};
use crate::messages::MediaEvent;
use crate::scheduler::Scheduler;

impl<B, S> PlaybackController<B, S>
where
    B: MediaBackend + FullscreenSurface,
    S: Scheduler,
{
    pub(crate) fn on_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadedMetadata { duration } => {
                self.on_loaded_metadata(duration)
            }
            MediaEvent::LoadedData => self.restore_after_swap(),
            MediaEvent::TimeUpdate { current_time } => {
                // The new source reports from zero until the restore seeks.
                if self.pending_swap.is_none() {
                    trace!("[Player] Time update {:.3}", current_time);
                    self.session.set_current_time(current_time);
                }
            }
            MediaEvent::Playing => self.on_playing(),
            MediaEvent::Paused => self.on_paused(),
            MediaEvent::Waiting => {
                debug!("[Player] Buffering");
                self.session.begin_buffering();
            }
            MediaEvent::CanPlay => self.on_can_play(),
            MediaEvent::Ended => self.on_ended_event(),
            MediaEvent::PlayRejected(reason) => {
                if let Some(swap) = self.pending_swap.as_mut() {
                    swap.saved_playing = false;
                }
                let prior = self.session.phase();
                self.reject_playback(prior, &reason);
            }
            MediaEvent::Error(message) => self.on_playback_error(message),
        }
    }

    fn on_loaded_metadata(&mut self, duration: f64) {
        self.session.set_duration(duration);
        info!(
            "[Player] Metadata loaded for {}: duration {:.2}s",
            self.session.active_source().quality(),
            self.session.duration()
        );

        // A swap stays loading until its data-ready restore.
        if self.pending_swap.is_some() {
            return;
        }

        self.session.set_error(None);
        if self.session.is_buffering() {
            return;
        }

        self.session.set_loading(false);
        if self.session.phase() == PlaybackPhase::Loading {
            let phase = if self.session.is_playing() {
                PlaybackPhase::Playing
            } else {
                PlaybackPhase::Ready
            };
            self.session.set_phase(phase);
        }

        if std::mem::take(&mut self.autoplay_armed)
            && !self.session.is_playing()
        {
            debug!("[Player] Autoplay requested");
            self.start_playback();
        }
    }

    fn on_playing(&mut self) {
        if self.pending_swap.is_some() {
            debug!("[Player] Ignoring play acknowledgement mid-switch");
            return;
        }

        self.session.set_playing(true);
        self.session.set_loading(false);
        self.session.clear_buffering();
        self.session.set_phase(PlaybackPhase::Playing);
        self.session.set_error(None);
        self.reset_controls_timer();
    }

    fn on_paused(&mut self) {
        if self.pending_swap.is_some() {
            debug!("[Player] Ignoring pause acknowledgement mid-switch");
            return;
        }

        self.session.set_playing(false);
        if self.session.is_buffering() {
            self.session.retarget_buffering(PlaybackPhase::Paused);
        } else if self.session.phase() == PlaybackPhase::Playing {
            self.session.set_phase(PlaybackPhase::Paused);
        }
        self.pin_controls();
    }

    fn on_can_play(&mut self) {
        if self.pending_swap.is_some() {
            return;
        }

        self.session.set_loading(false);
        let Some(from) = self.session.take_buffering_from() else {
            if self.session.phase() == PlaybackPhase::Loading {
                let phase = if self.session.is_playing() {
                    PlaybackPhase::Playing
                } else {
                    PlaybackPhase::Ready
                };
                self.session.set_phase(phase);
            }
            return;
        };

        let phase = if self.session.is_playing() {
            PlaybackPhase::Playing
        } else if from == PlaybackPhase::Playing {
            PlaybackPhase::Paused
        } else {
            from
        };
        debug!("[Player] Buffering cleared, back to {}", phase);
        self.session.set_phase(phase);
    }

    fn on_ended_event(&mut self) {
        info!("[Player] Playback ended");
        self.session.set_playing(false);
        self.session.set_loading(false);
        self.session.clear_buffering();
        self.session.set_phase(PlaybackPhase::Ended);
        self.pin_controls();

        self.fire_on_ended();

        if self.options.loop_playback {
            debug!("[Player] Looping");
            self.start_playback();
        }
    }

    fn on_playback_error(&mut self, message: String) {
        error!(
            "[Player] Playback error on {}: {}",
            self.session.active_source().quality(),
            message
        );
        if let Some(swap) = self.pending_swap.take() {
            debug!("[Quality] Dropping restore for {}", swap.label);
        }
        self.session.set_playing(false);
        self.session.set_loading(false);
        self.session.clear_buffering();
        self.session.set_phase(PlaybackPhase::Failed);
        self.session.set_error(Some(message));
    }
}
