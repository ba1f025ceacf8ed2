//! Playback state store.
//!
//! `PlaybackSession` is the single owner of a mounted player's transport
//! state. Fields are private; the controller mutates them through the
//! crate-visible setters below, which keep the numeric invariants:
//! - `current_time` and `duration` are finite and non-negative,
//! - `current_time <= duration` once the duration is known,
//! - `volume` stays within `[0, 1]`,
//! - the active index always points into the catalog.

use vidra_model::{PlaybackPhase, PlaybackSnapshot, Source};

use crate::catalog::SourceCatalog;

#[derive(Debug, Clone)]
pub struct PlaybackSession {
    catalog: SourceCatalog,
    active: usize,

    current_time: f64,
    duration: f64,

    is_playing: bool,
    is_loading: bool,
    volume: f64,
    is_muted: bool,
    is_fullscreen: bool,

    // Raw overlay flag driven by the visibility timer; see `controls_visible`
    controls_shown: bool,

    phase: PlaybackPhase,
    // Phase to return to once a buffering stall clears
    buffering_from: Option<PlaybackPhase>,
    last_error: Option<String>,
}

impl PlaybackSession {
    /// Fresh session on the first source, loading, paused, full volume.
    pub fn new(catalog: SourceCatalog) -> Self {
        Self {
            catalog,
            active: 0,
            current_time: 0.0,
            duration: 0.0,
            is_playing: false,
            is_loading: true,
            volume: 1.0,
            is_muted: false,
            is_fullscreen: false,
            controls_shown: true,
            phase: PlaybackPhase::Loading,
            buffering_from: None,
            last_error: None,
        }
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_source(&self) -> &Source {
        self.catalog.at(self.active)
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Zero until metadata is loaded.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn has_duration(&self) -> bool {
        self.duration > 0.0
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Overlay visibility. Always true while paused or loading, whatever the
    /// timer last decided.
    pub fn controls_visible(&self) -> bool {
        self.controls_shown || !self.is_playing || self.is_loading
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            phase: self.phase,
            is_playing: self.is_playing,
            is_loading: self.is_loading,
            current_time: self.current_time,
            duration: self.duration,
            volume: self.volume,
            is_muted: self.is_muted,
            is_fullscreen: self.is_fullscreen,
            controls_visible: self.controls_visible(),
            active_quality: self.active_source().quality().clone(),
            qualities: self.catalog.labels(),
            last_error: self.last_error.clone(),
        }
    }

    /// Clamp a seek target into `[0, duration]`. With no duration yet the
    /// only valid target is zero.
    pub fn clamp_seek(&self, seconds: f64) -> f64 {
        sanitize(seconds).min(self.duration)
    }

    // Mutators (controller only)

    pub(crate) fn activate(&mut self, index: usize) {
        if index < self.catalog.len() {
            self.active = index;
        }
    }

    /// Record a reported position. Before the duration is known the value
    /// is only floored at zero.
    pub(crate) fn set_current_time(&mut self, seconds: f64) {
        let seconds = sanitize(seconds);
        self.current_time = if self.has_duration() {
            seconds.min(self.duration)
        } else {
            seconds
        };
    }

    /// Non-finite durations (live streams) stay unresolved.
    pub(crate) fn set_duration(&mut self, seconds: f64) {
        self.duration = sanitize(seconds);
        if self.has_duration() && self.current_time > self.duration {
            self.current_time = self.duration;
        }
    }

    pub(crate) fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub(crate) fn set_volume(&mut self, volume: f64) {
        self.volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
    }

    pub(crate) fn set_muted(&mut self, muted: bool) {
        self.is_muted = muted;
    }

    pub(crate) fn set_fullscreen(&mut self, fullscreen: bool) {
        self.is_fullscreen = fullscreen;
    }

    pub(crate) fn set_controls_shown(&mut self, shown: bool) {
        self.controls_shown = shown;
    }

    pub(crate) fn set_phase(&mut self, phase: PlaybackPhase) {
        self.phase = phase;
    }

    /// Enter `Loading` for a stall, remembering where to return. Nested
    /// stalls keep the original return phase.
    pub(crate) fn begin_buffering(&mut self) {
        if self.phase != PlaybackPhase::Loading {
            self.buffering_from = Some(self.phase);
        }
        self.phase = PlaybackPhase::Loading;
        self.is_loading = true;
    }

    pub(crate) fn is_buffering(&self) -> bool {
        self.buffering_from.is_some()
    }

    pub(crate) fn take_buffering_from(&mut self) -> Option<PlaybackPhase> {
        self.buffering_from.take()
    }

    /// Redirect where a running stall returns to (pause/play while stalled).
    pub(crate) fn retarget_buffering(&mut self, phase: PlaybackPhase) -> bool {
        match self.buffering_from.as_mut() {
            Some(from) => {
                *from = phase;
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear_buffering(&mut self) {
        self.buffering_from = None;
    }

    pub(crate) fn set_error(&mut self, message: Option<String>) {
        self.last_error = message;
    }
}

fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    }
}
