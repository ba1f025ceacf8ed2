use log::{debug, error};

use crate::PlaybackController;
use crate::backend::{FullscreenSurface, MediaBackend};
use crate::scheduler::Scheduler;

impl<B, S> PlaybackController<B, S>
where
    B: MediaBackend + FullscreenSurface,
    S: Scheduler,
{
    /// Enter fullscreen on this player's surface, or leave it if the surface
    /// already holds fullscreen. `is_fullscreen` only follows the platform's
    /// change notification.
    pub(crate) fn toggle_fullscreen(&mut self) {
        let result = if self.backend.is_fullscreen_target() {
            debug!("[Fullscreen] Exiting");
            self.backend.exit_fullscreen()
        } else {
            debug!("[Fullscreen] Requesting");
            self.backend.request_fullscreen()
        };

        if let Err(err) = result {
            error!("[Fullscreen] Error toggling fullscreen mode: {}", err);
        }
    }

    pub(crate) fn on_fullscreen_changed(&mut self, fullscreen: bool) {
        debug!("[Fullscreen] Changed: {}", fullscreen);
        self.session.set_fullscreen(fullscreen);
    }
}
