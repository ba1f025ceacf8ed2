mod common;

use common::*;
use vidra_player::testing::BackendCall;
use vidra_player::{Key, MediaBackend, Message, Status};

fn press(player: &mut TestPlayer, dom_key: &str) -> Status {
    player.update(Message::Key(Key::from_dom_key(dom_key)))
}

#[test]
fn test_space_and_k_toggle_playback() {
    let mut player = mount(ladder());
    load(&mut player, 60.0);
    player.backend_mut().take_calls();

    assert_eq!(press(&mut player, " "), Status::Captured);
    assert!(player.snapshot().is_playing);

    assert_eq!(press(&mut player, "k"), Status::Captured);
    assert!(!player.snapshot().is_playing);

    assert_eq!(
        player.backend().calls(),
        &[BackendCall::Play, BackendCall::Pause]
    );
}

#[test]
fn test_m_toggles_mute() {
    let mut player = mount(ladder());
    load(&mut player, 60.0);

    press(&mut player, "m");
    assert!(player.snapshot().is_muted);
    assert!(player.backend().muted());

    press(&mut player, "m");
    assert!(!player.snapshot().is_muted);
    assert_eq!(
        player.backend().last_call(),
        Some(&BackendCall::SetMuted(false))
    );
}

#[test]
fn test_f_requests_then_exits_fullscreen() {
    let mut player = mount(ladder());
    load(&mut player, 60.0);
    player.backend_mut().take_calls();

    press(&mut player, "f");
    assert_eq!(
        player.backend().last_call(),
        Some(&BackendCall::RequestFullscreen)
    );
    // Only the platform's change notification flips the flag.
    assert!(!player.snapshot().is_fullscreen);

    player.update(Message::FullscreenChanged(true));
    player.backend_mut().set_fullscreen_target(true);
    assert!(player.snapshot().is_fullscreen);

    press(&mut player, "f");
    assert_eq!(
        player.backend().last_call(),
        Some(&BackendCall::ExitFullscreen)
    );
    player.update(Message::FullscreenChanged(false));
    assert!(!player.snapshot().is_fullscreen);
}

#[test]
fn test_arrow_seeks_stay_within_bounds() {
    let mut player = mount(ladder());
    load(&mut player, 12.0);
    player.update(Message::Seek(8.0));

    press(&mut player, "ArrowRight");
    assert_eq!(player.snapshot().current_time, 12.0);
    press(&mut player, "ArrowRight");
    assert_eq!(player.snapshot().current_time, 12.0);

    let mut positions = Vec::new();
    for _ in 0..4 {
        press(&mut player, "ArrowLeft");
        positions.push(player.snapshot().current_time);
    }
    assert_eq!(positions, vec![7.0, 2.0, 0.0, 0.0]);
    assert_eq!(
        player.backend().last_call(),
        Some(&BackendCall::SetCurrentTime(0.0))
    );
}

#[test]
fn test_arrow_seek_before_metadata_stays_at_zero() {
    let mut player = mount(ladder());
    press(&mut player, "ArrowRight");
    assert_eq!(player.snapshot().current_time, 0.0);
}

#[test]
fn test_five_volume_steps_down_land_on_half() {
    let mut player = mount(ladder());
    load(&mut player, 60.0);
    assert_eq!(player.snapshot().volume, 1.0);

    for _ in 0..5 {
        press(&mut player, "ArrowDown");
    }
    assert_eq!(player.snapshot().volume, 0.5);
    assert_eq!(
        player.backend().last_call(),
        Some(&BackendCall::SetVolume(0.5))
    );
}

#[test]
fn test_volume_step_from_slider_level_is_exact() {
    let mut player = mount(ladder());
    load(&mut player, 60.0);
    player.update(Message::SetVolume(0.333));

    press(&mut player, "ArrowUp");
    assert_close(player.snapshot().volume, 0.433, 1e-12);

    press(&mut player, "ArrowDown");
    press(&mut player, "ArrowDown");
    assert_close(player.snapshot().volume, 0.233, 1e-12);
}

#[test]
fn test_volume_steps_at_bounds_are_handled_no_ops() {
    let mut player = mount(ladder());
    load(&mut player, 60.0);
    player.backend_mut().take_calls();

    assert_eq!(press(&mut player, "ArrowUp"), Status::Captured);
    assert_eq!(player.snapshot().volume, 1.0);
    assert!(player.backend().calls().is_empty());

    player.update(Message::SetVolume(0.0));
    player.backend_mut().take_calls();
    assert_eq!(press(&mut player, "ArrowDown"), Status::Captured);
    assert!(player.backend().calls().is_empty());

    press(&mut player, "ArrowUp");
    let snapshot = player.snapshot();
    assert_eq!(snapshot.volume, 0.1);
    assert!(!snapshot.is_muted);
}

#[test]
fn test_uppercase_and_unbound_keys_pass_through() {
    let mut player = mount(ladder());
    load(&mut player, 60.0);
    player.backend_mut().take_calls();
    let scheduled = player.scheduler().scheduled();

    for key in ["K", "M", "F", "j", "Enter", "Escape", "Shift"] {
        assert_eq!(press(&mut player, key), Status::Ignored, "key {key:?}");
    }

    assert!(player.backend().calls().is_empty());
    assert_eq!(player.scheduler().scheduled(), scheduled);
    assert!(!player.snapshot().is_playing);
}

#[test]
fn test_handled_keys_report_captured() {
    let mut player = mount(ladder());
    load(&mut player, 60.0);

    let keys = [
        " ",
        "k",
        "m",
        "f",
        "ArrowLeft",
        "ArrowRight",
        "ArrowUp",
        "ArrowDown",
    ];
    for key in keys {
        assert!(press(&mut player, key).is_captured(), "key {key:?}");
    }
}
