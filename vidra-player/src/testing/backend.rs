use vidra_model::{QualityLabel, Source};

use crate::backend::{FullscreenSurface, MediaBackend};
use crate::error::BackendError;

/// One call the controller made on its backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Load(QualityLabel),
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f64),
    SetMuted(bool),
    RequestFullscreen,
    ExitFullscreen,
}

/// Recording backend. It never emits notifications; tests post the
/// `MediaEvent`s they want the controller to see.
#[derive(Debug, Default)]
pub struct FakeBackend {
    calls: Vec<BackendCall>,
    muted: bool,
    fullscreen_target: bool,
    reject_play: Option<String>,
    reject_fullscreen: Option<String>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every `play()` with `reason`.
    pub fn rejecting_play(mut self, reason: impl Into<String>) -> Self {
        self.reject_play = Some(reason.into());
        self
    }

    pub fn rejecting_fullscreen(mut self, reason: impl Into<String>) -> Self {
        self.reject_fullscreen = Some(reason.into());
        self
    }

    pub fn set_reject_play(&mut self, reason: Option<String>) {
        self.reject_play = reason;
    }

    /// Pretend the surface does (or does not) currently hold fullscreen.
    pub fn set_fullscreen_target(&mut self, target: bool) {
        self.fullscreen_target = target;
    }

    /// Flip the backend's own mute flag behind the controller's back.
    pub fn set_backend_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn last_call(&self) -> Option<&BackendCall> {
        self.calls.last()
    }

    pub fn count(&self, wanted: &BackendCall) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }

    /// Quality labels loaded so far, in order.
    pub fn loads(&self) -> Vec<QualityLabel> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::Load(label) => Some(label.clone()),
                _ => None,
            })
            .collect()
    }
}

impl MediaBackend for FakeBackend {
    fn load(&mut self, source: &Source) {
        self.calls.push(BackendCall::Load(source.quality().clone()));
    }

    fn play(&mut self) -> Result<(), BackendError> {
        self.calls.push(BackendCall::Play);
        match &self.reject_play {
            Some(reason) => Err(BackendError::PlayRejected(reason.clone())),
            None => Ok(()),
        }
    }

    fn pause(&mut self) {
        self.calls.push(BackendCall::Pause);
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.calls.push(BackendCall::SetCurrentTime(seconds));
    }

    fn set_volume(&mut self, volume: f64) {
        self.calls.push(BackendCall::SetVolume(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.calls.push(BackendCall::SetMuted(muted));
    }

    fn muted(&self) -> bool {
        self.muted
    }
}

impl FullscreenSurface for FakeBackend {
    fn is_fullscreen_target(&self) -> bool {
        self.fullscreen_target
    }

    fn request_fullscreen(&mut self) -> Result<(), BackendError> {
        self.calls.push(BackendCall::RequestFullscreen);
        match &self.reject_fullscreen {
            Some(reason) => Err(BackendError::Fullscreen(reason.clone())),
            None => Ok(()),
        }
    }

    fn exit_fullscreen(&mut self) -> Result<(), BackendError> {
        self.calls.push(BackendCall::ExitFullscreen);
        match &self.reject_fullscreen {
            Some(reason) => Err(BackendError::Fullscreen(reason.clone())),
            None => Ok(()),
        }
    }
}
