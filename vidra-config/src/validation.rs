//! Guard rails applied to a loaded [`ControllerConfig`](crate::ControllerConfig).

/// A configuration value the controller refuses to run with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("controls_hide_delay_ms must be greater than zero")]
    ZeroHideDelay,

    #[error("seek_step_secs must be a positive number of seconds (got {0})")]
    SeekStep(f64),

    #[error("volume_step must be within (0, 1] (got {0})")]
    VolumeStep(f64),

    #[error("unmute_volume must be within (0, 1] (got {0})")]
    UnmuteVolume(f64),
}
