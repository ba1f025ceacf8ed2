//! Shared fixtures for controller integration tests.
#![allow(dead_code)]

use vidra_config::ControllerConfig;
use vidra_model::{MediaFormat, PlayerOptions, Source};
use vidra_player::testing::{FakeBackend, ManualScheduler};
use vidra_player::{MediaEvent, Message, PlaybackController};

pub type TestPlayer = PlaybackController<FakeBackend, ManualScheduler>;

pub fn source(label: &str) -> Source {
    Source::new(format!("/videos/demo-{label}.mp4"), MediaFormat::Mp4, label)
}

/// `1080p`, `720p`, `480p`, best first.
pub fn ladder() -> Vec<Source> {
    vec![source("1080p"), source("720p"), source("480p")]
}

pub fn mount(sources: Vec<Source>) -> TestPlayer {
    mount_with(sources, PlayerOptions::default(), FakeBackend::new())
}

pub fn mount_with(
    sources: Vec<Source>,
    options: PlayerOptions,
    backend: FakeBackend,
) -> TestPlayer {
    PlaybackController::mount(
        backend,
        ManualScheduler::new(),
        sources,
        options,
        ControllerConfig::default(),
    )
    .expect("mount")
}

pub fn media(player: &mut TestPlayer, event: MediaEvent) {
    player.update(Message::Media(event));
}

/// Deliver the notifications a backend sends once a source is ready.
pub fn load(player: &mut TestPlayer, duration: f64) {
    media(player, MediaEvent::LoadedMetadata { duration });
    media(player, MediaEvent::LoadedData);
    media(player, MediaEvent::CanPlay);
}

/// Loaded, playing and acknowledged.
pub fn playing(player: &mut TestPlayer, duration: f64) {
    load(player, duration);
    player.update(Message::Play);
    media(player, MediaEvent::Playing);
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
