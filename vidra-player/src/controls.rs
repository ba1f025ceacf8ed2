//! Inactivity timer for the controls overlay.

use std::time::Duration;

use log::{debug, trace};

use crate::PlaybackController;
use crate::backend::{FullscreenSurface, MediaBackend};
use crate::messages::Status;
use crate::scheduler::{Scheduler, TimerId, TimerIds};

/// Bookkeeping for the single debounced hide countdown.
#[derive(Debug)]
pub(crate) struct ControlsTimer {
    delay: Duration,
    pending: Option<TimerId>,
    ids: TimerIds,
}

impl ControlsTimer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            ids: TimerIds::default(),
        }
    }

    /// Drop the pending id without touching the scheduler. Ids keep counting
    /// up so anything still in flight stays stale.
    pub(crate) fn forget(&mut self) {
        self.pending = None;
    }
}

impl<B, S> PlaybackController<B, S>
where
    B: MediaBackend + FullscreenSurface,
    S: Scheduler,
{
    /// Show the overlay and restart the countdown.
    pub(crate) fn reset_controls_timer(&mut self) {
        self.session.set_controls_shown(true);
        self.cancel_controls_timer();
        self.schedule_controls_timer();
    }

    fn schedule_controls_timer(&mut self) {
        let id = self.controls.ids.next();
        self.scheduler.schedule(id, self.controls.delay);
        self.controls.pending = Some(id);
        trace!(
            "[Controls] Hide scheduled as {} in {:?}",
            id, self.controls.delay
        );
    }

    pub(crate) fn cancel_controls_timer(&mut self) {
        if let Some(id) = self.controls.pending.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Show the overlay and stop counting down (paused, ended).
    pub(crate) fn pin_controls(&mut self) {
        self.session.set_controls_shown(true);
        self.cancel_controls_timer();
    }

    pub(crate) fn on_controls_timer(&mut self, id: TimerId) -> Status {
        if self.controls.pending != Some(id) {
            debug!("[Controls] Ignoring stale {}", id);
            return Status::Ignored;
        }
        self.controls.pending = None;

        if self.session.is_playing() && !self.session.is_loading() {
            debug!("[Controls] Hiding after inactivity");
            self.session.set_controls_shown(false);
        } else {
            self.schedule_controls_timer();
        }
        Status::Captured
    }

    pub(crate) fn on_pointer_leave(&mut self) {
        self.cancel_controls_timer();
        if self.session.is_playing() && !self.session.is_loading() {
            self.session.set_controls_shown(false);
        }
    }

    /// Id of the countdown currently running, if any.
    pub fn pending_controls_timer(&self) -> Option<TimerId> {
        self.controls.pending
    }
}
