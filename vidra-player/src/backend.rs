//! Media backend abstraction layer
//!
//! The controller never talks to a concrete decoder or window. It drives the
//! two capabilities below and learns about progress only through
//! [`MediaEvent`](crate::messages::MediaEvent) notifications posted back by
//! the host. Each mounted controller owns its backend, so independent players
//! can coexist and tests can inject a fake.

use vidra_model::Source;

use crate::error::BackendError;

/// Decoding/rendering primitive for one player instance.
pub trait MediaBackend {
    /// Replace the current media with `source` and start loading it.
    /// Completion is reported via metadata/data-ready notifications.
    fn load(&mut self, source: &Source);

    /// Start or resume playback. Refusals may be reported here or later as
    /// a `PlayRejected` notification.
    fn play(&mut self) -> Result<(), BackendError>;

    fn pause(&mut self);

    /// Seek to an absolute position in seconds.
    fn set_current_time(&mut self, seconds: f64);

    /// Output volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f64);

    fn set_muted(&mut self, muted: bool);

    /// The backend's own mute flag, which can differ from the session's.
    fn muted(&self) -> bool;
}

/// Fullscreen-capable rendering surface the player is mounted on.
pub trait FullscreenSurface {
    /// Whether this player's surface is the platform's current fullscreen
    /// element.
    fn is_fullscreen_target(&self) -> bool;

    fn request_fullscreen(&mut self) -> Result<(), BackendError>;

    fn exit_fullscreen(&mut self) -> Result<(), BackendError>;
}
