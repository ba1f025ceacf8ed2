use vidra_config::ConfigValidationError;
use vidra_model::QualityLabel;

/// Errors raised while mounting or re-sourcing a player.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlayerError {
    #[error("No video sources provided.")]
    NoSources,

    #[error("Duplicate quality label in source list: {0}")]
    DuplicateQuality(QualityLabel),

    #[error("Invalid controller config: {0}")]
    InvalidConfig(#[from] ConfigValidationError),
}

/// Failures reported synchronously by a media backend or its surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// `play()` was refused, e.g. autoplay blocked by the platform.
    #[error("Playback rejected: {0}")]
    PlayRejected(String),

    /// A fullscreen request or exit was refused, e.g. no user gesture.
    #[error("Fullscreen request rejected: {0}")]
    Fullscreen(String),
}
