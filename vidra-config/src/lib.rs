//! Shared configuration library for Vidra.
//!
//! Centralizes the controller tuning knobs (inactivity window, seek and
//! volume steps, unmute fallback volume), where they are loaded from, and the
//! guard rails applied before a controller is mounted with them.

pub mod controller;
pub mod validation;

pub use controller::{ConfigFormat, ConfigSource, ControllerConfig};
pub use validation::ConfigValidationError;
