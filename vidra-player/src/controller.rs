//! The playback controller: one state owner per mounted player.
//!
//! Every transition goes through [`PlaybackController::update`]. Backend
//! notifications, raw input, explicit user actions and fired timers all
//! arrive as [`Message`]s and are handled to completion before the next one.

use std::fmt;

use log::{debug, info, warn};
use vidra_config::ControllerConfig;
use vidra_model::{PlaybackPhase, PlaybackSnapshot, PlayerOptions, Source};

use crate::backend::{FullscreenSurface, MediaBackend};
use crate::catalog::SourceCatalog;
use crate::controls::ControlsTimer;
use crate::error::PlayerError;
use crate::messages::{Message, PointerEvent, Status};
use crate::quality::PendingSwap;
use crate::scheduler::Scheduler;
use crate::session::PlaybackSession;

type EndedCallback = Box<dyn FnMut()>;

pub struct PlaybackController<B, S>
where
    B: MediaBackend + FullscreenSurface,
    S: Scheduler,
{
    pub(crate) backend: B,
    pub(crate) scheduler: S,
    pub(crate) session: PlaybackSession,
    pub(crate) options: PlayerOptions,
    pub(crate) config: ControllerConfig,
    pub(crate) controls: ControlsTimer,
    // Restore owed once the newest quality swap reports data-ready
    pub(crate) pending_swap: Option<PendingSwap>,
    // Consumed by the first metadata load of a session
    pub(crate) autoplay_armed: bool,
    on_ended: Option<EndedCallback>,
    mounted: bool,
}

impl<B, S> PlaybackController<B, S>
where
    B: MediaBackend + FullscreenSurface,
    S: Scheduler,
{
    /// Mount a player over `sources`, loading the first one.
    ///
    /// An empty or ambiguous source list, or a config the controller cannot
    /// honor, is rejected before the backend is touched.
    pub fn mount(
        mut backend: B,
        scheduler: S,
        sources: Vec<Source>,
        options: PlayerOptions,
        config: ControllerConfig,
    ) -> Result<Self, PlayerError> {
        config.validate()?;
        let catalog = SourceCatalog::new(sources)?;
        let session = PlaybackSession::new(catalog);

        info!(
            "[Player] Mounting '{}' with {} source(s), starting at {}",
            options.accessible_label(),
            session.catalog().len(),
            session.active_source().quality()
        );
        backend.load(session.active_source());

        Ok(Self {
            backend,
            scheduler,
            session,
            autoplay_armed: options.autoplay,
            options,
            controls: ControlsTimer::new(config.controls_hide_delay()),
            config,
            pending_swap: None,
            on_ended: None,
            mounted: true,
        })
    }

    /// Register the completion callback fired on end-of-stream.
    pub fn on_ended(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_ended = Some(Box::new(callback));
        self
    }

    pub fn update(&mut self, message: Message) -> Status {
        if !self.mounted {
            debug!("[Player] Dropping {:?} after unmount", message);
            return Status::Ignored;
        }

        match message {
            Message::Media(event) => {
                self.on_media_event(event);
                Status::Captured
            }
            Message::FullscreenChanged(fullscreen) => {
                self.on_fullscreen_changed(fullscreen);
                Status::Captured
            }
            Message::Key(key) => self.handle_key(&key),
            Message::Pointer(event) => self.handle_pointer(event),
            Message::Play => self.user_action(Self::start_playback),
            Message::Pause => self.user_action(Self::pause_playback),
            Message::PlayPause => self.user_action(Self::toggle_play_pause),
            Message::Seek(seconds) => {
                self.user_action(|controller| controller.seek(seconds))
            }
            Message::SetVolume(volume) => {
                self.user_action(|controller| controller.set_volume(volume))
            }
            Message::ToggleMute => self.user_action(Self::toggle_mute),
            Message::SelectQuality(label) => self.user_action(|controller| {
                controller.switch_quality(label.as_str())
            }),
            Message::ToggleFullscreen => {
                self.user_action(Self::toggle_fullscreen)
            }
            Message::Timer(id) => self.on_controls_timer(id),
        }
    }

    fn user_action(&mut self, action: impl FnOnce(&mut Self)) -> Status {
        action(self);
        self.reset_controls_timer();
        Status::Captured
    }

    fn handle_pointer(&mut self, event: PointerEvent) -> Status {
        match event {
            PointerEvent::Entered | PointerEvent::Moved => {
                self.reset_controls_timer()
            }
            PointerEvent::Left => self.on_pointer_leave(),
            PointerEvent::Clicked => {
                self.toggle_play_pause();
                self.reset_controls_timer();
            }
        }
        Status::Captured
    }

    // Transport

    pub(crate) fn toggle_play_pause(&mut self) {
        if self.session.is_playing() {
            self.pause_playback();
        } else {
            self.start_playback();
        }
    }

    pub(crate) fn start_playback(&mut self) {
        // Mid-swap the backend is busy loading; only the intent changes and
        // the restore applies it.
        if let Some(swap) = self.pending_swap.as_mut() {
            swap.saved_playing = true;
            self.session.set_playing(true);
            return;
        }

        let prior = self.session.phase();
        if prior == PlaybackPhase::Ended {
            self.backend.set_current_time(0.0);
            self.session.set_current_time(0.0);
        }

        self.session.set_playing(true);
        match self.backend.play() {
            Ok(()) => {
                if !self.session.is_loading() {
                    self.session.set_phase(PlaybackPhase::Playing);
                } else {
                    self.session.retarget_buffering(PlaybackPhase::Playing);
                }
            }
            Err(err) => self.reject_playback(prior, &err.to_string()),
        }
    }

    pub(crate) fn pause_playback(&mut self) {
        self.session.set_playing(false);

        if let Some(swap) = self.pending_swap.as_mut() {
            swap.saved_playing = false;
            return;
        }

        self.backend.pause();
        if self.session.is_loading() {
            self.session.retarget_buffering(PlaybackPhase::Paused);
        } else if self.session.phase() == PlaybackPhase::Playing {
            self.session.set_phase(PlaybackPhase::Paused);
        }
    }

    /// A refused `play()`: log, fall back to not playing, never retry.
    pub(crate) fn reject_playback(
        &mut self,
        prior: PlaybackPhase,
        reason: &str,
    ) {
        warn!("[Player] Play failed: {}", reason);
        self.session.set_playing(false);

        if self.session.is_loading() {
            self.session.retarget_buffering(PlaybackPhase::Paused);
            return;
        }

        let phase = match prior {
            PlaybackPhase::Ready => PlaybackPhase::Ready,
            PlaybackPhase::Failed => PlaybackPhase::Failed,
            _ => PlaybackPhase::Paused,
        };
        self.session.set_phase(phase);
    }

    /// Seek to an absolute position, clamped to `[0, duration]`.
    pub(crate) fn seek(&mut self, seconds: f64) {
        let target = self.session.clamp_seek(seconds);
        self.session.set_current_time(target);

        if let Some(swap) = self.pending_swap.as_mut() {
            swap.saved_time = target;
            return;
        }

        self.backend.set_current_time(target);
        if self.session.phase() == PlaybackPhase::Ended
            && target < self.session.duration()
        {
            self.session.set_phase(PlaybackPhase::Paused);
        }
    }

    pub(crate) fn seek_relative(&mut self, delta: f64) {
        self.seek(self.session.current_time() + delta);
    }

    // Read side

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.session.snapshot()
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn controls_visible(&self) -> bool {
        self.session.controls_visible()
    }

    pub fn active_source(&self) -> &Source {
        self.session.active_source()
    }

    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn accessible_label(&self) -> &str {
        self.options.accessible_label()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // Lifecycle

    /// Tear down the current session and start a fresh one over `sources`.
    ///
    /// The new list is validated first; on error the running session is left
    /// untouched.
    pub fn replace_sources(
        &mut self,
        sources: Vec<Source>,
    ) -> Result<(), PlayerError> {
        let catalog = SourceCatalog::new(sources)?;

        self.teardown();

        let fullscreen = self.session.is_fullscreen();
        self.session = PlaybackSession::new(catalog);
        self.session.set_fullscreen(fullscreen);
        self.autoplay_armed = self.options.autoplay;
        self.mounted = true;

        info!(
            "[Player] Sources replaced ({} source(s)), starting at {}",
            self.session.catalog().len(),
            self.session.active_source().quality()
        );
        self.backend.load(self.session.active_source());
        Ok(())
    }

    /// Cancel every pending timer and drop any owed restore. Messages
    /// delivered afterwards are ignored.
    pub fn unmount(&mut self) {
        if self.mounted {
            info!("[Player] Unmounting '{}'", self.accessible_label());
            self.teardown();
            self.mounted = false;
        }
    }

    fn teardown(&mut self) {
        self.controls.forget();
        self.scheduler.cancel_all();
        if let Some(swap) = self.pending_swap.take() {
            debug!("[Quality] Discarding pending restore for {}", swap.label);
        }
    }

    pub(crate) fn fire_on_ended(&mut self) {
        if let Some(callback) = self.on_ended.as_mut() {
            callback();
        }
    }
}

impl<B, S> Drop for PlaybackController<B, S>
where
    B: MediaBackend + FullscreenSurface,
    S: Scheduler,
{
    fn drop(&mut self) {
        if self.mounted {
            self.teardown();
        }
    }
}

impl<B, S> fmt::Debug for PlaybackController<B, S>
where
    B: MediaBackend + FullscreenSurface,
    S: Scheduler,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("session", &self.session)
            .field("options", &self.options)
            .field("config", &self.config)
            .field("pending_swap", &self.pending_swap)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}
