//! In-process media backend and line-command parsing for the `vidra-sim`
//! harness.
//!
//! [`SimulatedBackend`] answers commands the way a browser media element
//! does: a load is followed by metadata, data-ready and can-play, a play by
//! a play acknowledgement, and so on. Notifications are queued and the host
//! drains them back into the controller after each update.

use std::collections::VecDeque;

use log::trace;
use thiserror::Error;
use vidra_model::{MediaFormat, Source};

use crate::backend::{FullscreenSurface, MediaBackend};
use crate::error::BackendError;
use crate::keyboard::{Key, Named};
use crate::messages::{MediaEvent, Message, PointerEvent};

pub const DEFAULT_SIM_DURATION: f64 = 600.0;

#[derive(Debug)]
pub struct SimulatedBackend {
    outbox: VecDeque<Message>,
    duration: f64,
    position: f64,
    playing: bool,
    volume: f64,
    muted: bool,
    fullscreen: bool,
    block_play: bool,
    loaded: Option<String>,
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(DEFAULT_SIM_DURATION)
    }
}

impl SimulatedBackend {
    /// Every loaded source reports `duration` seconds.
    pub fn new(duration: f64) -> Self {
        Self {
            outbox: VecDeque::new(),
            duration: duration.max(0.0),
            position: 0.0,
            playing: false,
            volume: 1.0,
            muted: false,
            fullscreen: false,
            block_play: false,
            loaded: None,
        }
    }

    /// Refuse `play()` like a page without a user gesture.
    pub fn block_play(&mut self, blocked: bool) {
        self.block_play = blocked;
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn loaded_url(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    /// Take every notification queued since the last drain.
    pub fn drain(&mut self) -> Vec<Message> {
        self.outbox.drain(..).collect()
    }

    /// Let `seconds` of wall time pass for the decoder.
    pub fn tick(&mut self, seconds: f64) {
        if !self.playing || !seconds.is_finite() || seconds <= 0.0 {
            return;
        }

        self.position = (self.position + seconds).min(self.duration);
        self.post(MediaEvent::TimeUpdate {
            current_time: self.position,
        });

        if self.position >= self.duration {
            self.playing = false;
            self.post(MediaEvent::Paused);
            self.post(MediaEvent::Ended);
        }
    }

    fn post(&mut self, event: impl Into<Message>) {
        let message = event.into();
        trace!("[Sim] Posting {:?}", message);
        self.outbox.push_back(message);
    }
}

impl MediaBackend for SimulatedBackend {
    fn load(&mut self, source: &Source) {
        self.loaded = Some(source.url().to_string());
        self.position = 0.0;
        self.playing = false;
        self.post(MediaEvent::LoadedMetadata {
            duration: self.duration,
        });
        self.post(MediaEvent::LoadedData);
        self.post(MediaEvent::CanPlay);
    }

    fn play(&mut self) -> Result<(), BackendError> {
        if self.block_play {
            return Err(BackendError::PlayRejected(
                "play() requires a user gesture".to_string(),
            ));
        }
        if self.position >= self.duration {
            self.position = 0.0;
        }
        self.playing = true;
        self.post(MediaEvent::Playing);
        Ok(())
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.post(MediaEvent::Paused);
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.position = seconds.clamp(0.0, self.duration);
        self.post(MediaEvent::TimeUpdate {
            current_time: self.position,
        });
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn muted(&self) -> bool {
        self.muted
    }
}

impl FullscreenSurface for SimulatedBackend {
    fn is_fullscreen_target(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), BackendError> {
        self.fullscreen = true;
        self.post(Message::FullscreenChanged(true));
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), BackendError> {
        self.fullscreen = false;
        self.post(Message::FullscreenChanged(false));
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("unknown key: {0}")]
    UnknownKey(String),
    #[error("source must look like LABEL=URL[@FORMAT], got {0:?}")]
    InvalidSource(String),
}

/// One line of harness input.
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    Play,
    Pause,
    Key(Key),
    Quality(String),
    Seek(f64),
    Volume(f64),
    Move,
    Leave,
    Tick(f64),
    State,
    Quit,
}

impl SimCommand {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Err(ParseError::Empty);
        };
        let argument = parts.next();

        let command = match command {
            "play" => SimCommand::Play,
            "pause" => SimCommand::Pause,
            "key" => SimCommand::Key(parse_key(require(argument, "key")?)?),
            "quality" => {
                SimCommand::Quality(require(argument, "quality")?.to_string())
            }
            "seek" => SimCommand::Seek(parse_number(require(argument, "seek")?)?),
            "volume" => {
                SimCommand::Volume(parse_number(require(argument, "volume")?)?)
            }
            "move" => SimCommand::Move,
            "leave" => SimCommand::Leave,
            "tick" => SimCommand::Tick(parse_number(require(argument, "tick")?)?),
            "state" => SimCommand::State,
            "quit" | "exit" => SimCommand::Quit,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }

    /// Controller message for commands that map onto one. Harness-only
    /// commands (`tick`, `state`, `quit`) return `None`.
    pub fn to_message(&self) -> Option<Message> {
        match self {
            SimCommand::Play => Some(Message::Play),
            SimCommand::Pause => Some(Message::Pause),
            SimCommand::Key(key) => Some(Message::Key(key.clone())),
            SimCommand::Quality(label) => {
                Some(Message::SelectQuality(label.as_str().into()))
            }
            SimCommand::Seek(seconds) => Some(Message::Seek(*seconds)),
            SimCommand::Volume(volume) => Some(Message::SetVolume(*volume)),
            SimCommand::Move => Some(PointerEvent::Moved.into()),
            SimCommand::Leave => Some(PointerEvent::Left.into()),
            SimCommand::Tick(_) | SimCommand::State | SimCommand::Quit => None,
        }
    }
}

fn require<'a>(
    argument: Option<&'a str>,
    command: &'static str,
) -> Result<&'a str, ParseError> {
    argument.ok_or(ParseError::MissingArgument(command))
}

fn parse_number(raw: &str) -> Result<f64, ParseError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber(raw.to_string()))
}

fn parse_key(raw: &str) -> Result<Key, ParseError> {
    let key = match raw {
        "space" => Key::Named(Named::Space),
        "left" => Key::Named(Named::ArrowLeft),
        "right" => Key::Named(Named::ArrowRight),
        "up" => Key::Named(Named::ArrowUp),
        "down" => Key::Named(Named::ArrowDown),
        other => Key::from_dom_key(other),
    };

    match key {
        Key::Unidentified => Err(ParseError::UnknownKey(raw.to_string())),
        key => Ok(key),
    }
}

/// Parse a `LABEL=URL[@FORMAT]` source argument. Without a format the URL's
/// extension decides.
pub fn parse_source(raw: &str) -> Result<Source, ParseError> {
    let invalid = || ParseError::InvalidSource(raw.to_string());

    let (label, rest) = raw.split_once('=').ok_or_else(invalid)?;
    let label = label.trim();
    if label.is_empty() {
        return Err(invalid());
    }

    let (url, format) = match rest.rsplit_once('@') {
        Some((url, format)) if !format.trim().is_empty() => {
            (url.trim(), parse_format(format.trim()))
        }
        _ => (rest.trim(), MediaFormat::guess_from_url(rest.trim())),
    };
    if url.is_empty() {
        return Err(invalid());
    }

    Ok(Source::new(url, format, label))
}

fn parse_format(raw: &str) -> MediaFormat {
    if raw.contains('/') {
        return MediaFormat::from_mime(raw);
    }
    match raw.to_ascii_lowercase().as_str() {
        "mp4" => MediaFormat::Mp4,
        "webm" => MediaFormat::WebM,
        "ogg" | "ogv" => MediaFormat::Ogg,
        "hls" | "m3u8" => MediaFormat::Hls,
        "dash" | "mpd" => MediaFormat::Dash,
        _ => MediaFormat::Other(raw.to_string()),
    }
}
