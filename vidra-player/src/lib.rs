//! # Vidra Player
//!
//! Playback controller for the Vidra video front end. A controller owns the
//! live state of one mounted video: transport, position, volume and mute,
//! the selected quality variant, fullscreen, and whether the controls
//! overlay is showing.
//!
//! ## Architecture
//!
//! - [`PlaybackController`]: the single state owner. Hosts feed it
//!   [`Message`]s through [`PlaybackController::update`] and render from
//!   [`PlaybackController::snapshot`].
//! - [`MediaBackend`] / [`FullscreenSurface`]: the decoding and windowing
//!   primitives the controller drives. Injected per controller.
//! - [`Scheduler`]: cancellable timers. [`TokioScheduler`] for real hosts,
//!   [`testing::ManualScheduler`] for virtual-time tests.
//! - [`sim`]: an in-process backend that acknowledges commands the way a
//!   real decoder would, used by the `vidra-sim` harness.
//!
//! ## Example
//!
//! ```
//! use vidra_config::ControllerConfig;
//! use vidra_model::{MediaFormat, PlayerOptions, Source};
//! use vidra_player::testing::{FakeBackend, ManualScheduler};
//! use vidra_player::{MediaEvent, Message, PlaybackController};
//!
//! let sources = vec![
//!     Source::new("/v/720.mp4", MediaFormat::Mp4, "720p"),
//!     Source::new("/v/480.mp4", MediaFormat::Mp4, "480p"),
//! ];
//! let mut player = PlaybackController::mount(
//!     FakeBackend::default(),
//!     ManualScheduler::default(),
//!     sources,
//!     PlayerOptions::default(),
//!     ControllerConfig::default(),
//! )
//! .unwrap();
//!
//! player.update(MediaEvent::LoadedMetadata { duration: 120.0 }.into());
//! player.update(Message::Play);
//! assert!(player.snapshot().is_playing);
//! ```

pub mod backend;
pub mod catalog;
mod controller;
mod controls;
pub mod error;
mod events;
mod fullscreen;
pub mod keyboard;
pub mod messages;
mod quality;
pub mod scheduler;
pub mod session;
pub mod sim;
pub mod testing;
mod volume;

pub use backend::{FullscreenSurface, MediaBackend};
pub use catalog::SourceCatalog;
pub use controller::PlaybackController;
pub use error::{BackendError, PlayerError};
pub use keyboard::{Key, KeyCommand, Named};
pub use messages::{MediaEvent, Message, PointerEvent, Status};
pub use scheduler::{Scheduler, TimerId, TokioScheduler};
pub use session::PlaybackSession;
