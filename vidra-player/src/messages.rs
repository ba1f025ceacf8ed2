use vidra_model::QualityLabel;

use crate::keyboard::Key;
use crate::scheduler::TimerId;

/// Everything that can happen to a mounted player. The host feeds these to
/// [`PlaybackController::update`](crate::PlaybackController::update) one at a
/// time.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Backend notifications
    Media(MediaEvent),
    FullscreenChanged(bool),

    // Raw input
    Key(Key),
    Pointer(PointerEvent),

    // Explicit user actions (overlay buttons, sliders, menus)
    Play,
    Pause,
    PlayPause,
    Seek(f64),
    SetVolume(f64),
    ToggleMute,
    SelectQuality(QualityLabel),
    ToggleFullscreen,

    // Internally scheduled timers coming back from the scheduler
    Timer(TimerId),
}

/// Transport notifications emitted by the media backend.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Duration is known for the current source.
    LoadedMetadata { duration: f64 },
    /// Enough of a freshly loaded source is buffered to seek and play.
    LoadedData,
    TimeUpdate { current_time: f64 },
    /// Play acknowledgement.
    Playing,
    /// Pause acknowledgement.
    Paused,
    /// Stalled waiting for data.
    Waiting,
    /// Able to play again after a stall.
    CanPlay,
    Ended,
    /// Asynchronous refusal of an earlier `play()`.
    PlayRejected(String),
    /// Decode/network failure of the current source.
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Entered,
    Moved,
    Left,
    /// Click on the video surface itself.
    Clicked,
}

/// Whether the controller consumed a message. Hosts suppress the platform's
/// default action (page scroll on space/arrows, ...) only for `Captured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Captured,
    Ignored,
}

impl Status {
    pub fn is_captured(self) -> bool {
        self == Status::Captured
    }
}

impl From<MediaEvent> for Message {
    fn from(event: MediaEvent) -> Self {
        Message::Media(event)
    }
}

impl From<Key> for Message {
    fn from(key: Key) -> Self {
        Message::Key(key)
    }
}

impl From<PointerEvent> for Message {
    fn from(event: PointerEvent) -> Self {
        Message::Pointer(event)
    }
}
