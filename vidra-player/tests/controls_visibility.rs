mod common;

use std::time::Duration;

use common::*;
use tokio::runtime::Handle;
use vidra_config::ControllerConfig;
use vidra_model::PlayerOptions;
use vidra_player::testing::{FakeBackend, advance_time};
use vidra_player::{
    Key, MediaEvent, Message, PlaybackController, PointerEvent, Status,
    TokioScheduler,
};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn test_controls_hide_after_inactivity_while_playing() {
    let mut player = mount(ladder());
    playing(&mut player, 60.0);
    assert!(player.controls_visible());

    advance_time(&mut player, ms(2_999));
    assert!(player.controls_visible());

    advance_time(&mut player, ms(1));
    assert!(!player.controls_visible());
    assert!(!player.snapshot().controls_visible);
}

#[test]
fn test_pointer_activity_resets_countdown() {
    let mut player = mount(ladder());
    playing(&mut player, 60.0);

    advance_time(&mut player, ms(2_000));
    player.update(PointerEvent::Moved.into());
    advance_time(&mut player, ms(2_000));
    assert!(player.controls_visible());

    advance_time(&mut player, ms(1_000));
    assert!(!player.controls_visible());

    player.update(PointerEvent::Entered.into());
    assert!(player.controls_visible());
}

#[test]
fn test_handled_key_resets_but_unbound_key_does_not() {
    let mut player = mount(ladder());
    playing(&mut player, 60.0);
    advance_time(&mut player, ms(2_000));

    let status = player.update(Message::Key(Key::character('x')));
    assert_eq!(status, Status::Ignored);
    advance_time(&mut player, ms(1_000));
    assert!(!player.controls_visible());

    let status = player.update(Message::Key(Key::from_dom_key("ArrowUp")));
    assert_eq!(status, Status::Captured);
    assert!(player.controls_visible());
}

#[test]
fn test_paused_player_keeps_controls_and_reschedules() {
    let mut player = mount(ladder());
    load(&mut player, 60.0);
    player.update(PointerEvent::Moved.into());

    assert_eq!(advance_time(&mut player, ms(3_000)), 1);
    assert!(player.controls_visible());
    assert_eq!(player.scheduler().pending(), 1);
}

#[test]
fn test_buffering_keeps_controls_visible() {
    let mut player = mount(ladder());
    playing(&mut player, 60.0);
    media(&mut player, MediaEvent::Waiting);

    advance_time(&mut player, ms(3_000));
    assert!(player.controls_visible());

    media(&mut player, MediaEvent::CanPlay);
    advance_time(&mut player, ms(3_000));
    assert!(!player.controls_visible());
}

#[test]
fn test_pointer_leave_hides_immediately_while_playing() {
    let mut player = mount(ladder());
    playing(&mut player, 60.0);

    player.update(PointerEvent::Left.into());
    assert!(!player.controls_visible());
    assert_eq!(player.scheduler().pending(), 0);
    assert_eq!(player.pending_controls_timer(), None);
}

#[test]
fn test_pointer_leave_keeps_controls_while_paused() {
    let mut player = mount(ladder());
    load(&mut player, 60.0);
    player.update(PointerEvent::Moved.into());

    player.update(PointerEvent::Left.into());
    assert!(player.controls_visible());
    assert_eq!(player.scheduler().pending(), 0);
}

#[test]
fn test_pause_acknowledgement_pins_controls() {
    let mut player = mount(ladder());
    playing(&mut player, 60.0);
    advance_time(&mut player, ms(3_000));
    assert!(!player.controls_visible());

    media(&mut player, MediaEvent::Paused);
    assert!(player.controls_visible());
    assert_eq!(player.scheduler().pending(), 0);
}

#[test]
fn test_superseded_timer_is_ignored() {
    let mut player = mount(ladder());
    playing(&mut player, 60.0);
    let stale = player.pending_controls_timer().expect("timer armed");

    player.update(PointerEvent::Moved.into());
    let current = player.pending_controls_timer().expect("timer armed");
    assert_ne!(stale, current);

    assert_eq!(player.update(Message::Timer(stale)), Status::Ignored);
    assert!(player.controls_visible());
    assert_eq!(player.pending_controls_timer(), Some(current));
}

#[test]
fn test_timer_after_unmount_is_ignored() {
    let mut player = mount(ladder());
    playing(&mut player, 60.0);
    let id = player.pending_controls_timer().expect("timer armed");

    player.unmount();
    assert!(!player.is_mounted());
    assert_eq!(player.scheduler().pending(), 0);

    assert_eq!(player.update(Message::Timer(id)), Status::Ignored);
    assert!(player.snapshot().controls_visible);
}

#[test]
fn test_timer_from_replaced_session_is_ignored() {
    let mut player = mount(ladder());
    playing(&mut player, 60.0);
    let id = player.pending_controls_timer().expect("timer armed");

    player
        .replace_sources(vec![source("720p")])
        .expect("valid sources");
    assert_eq!(player.scheduler().pending(), 0);
    assert_eq!(player.update(Message::Timer(id)), Status::Ignored);
}

#[test]
fn test_configured_delay_is_honored() {
    let config = ControllerConfig {
        controls_hide_delay_ms: 1_000,
        ..ControllerConfig::default()
    };
    let mut player = PlaybackController::mount(
        FakeBackend::new(),
        vidra_player::testing::ManualScheduler::new(),
        ladder(),
        PlayerOptions::default(),
        config,
    )
    .unwrap();
    playing(&mut player, 60.0);

    advance_time(&mut player, ms(1_000));
    assert!(!player.controls_visible());
}

#[tokio::test(start_paused = true)]
async fn test_tokio_scheduler_drives_hide() {
    let (scheduler, mut fired) = TokioScheduler::new(Handle::current());
    let mut player = PlaybackController::mount(
        FakeBackend::new(),
        scheduler,
        ladder(),
        PlayerOptions::default(),
        ControllerConfig::default(),
    )
    .unwrap();

    player.update(MediaEvent::LoadedMetadata { duration: 60.0 }.into());
    player.update(Message::Play);
    player.update(MediaEvent::Playing.into());

    tokio::time::sleep(ms(3_001)).await;
    let id = fired.recv().await.expect("timer fired");
    // Play and its acknowledgement each armed a timer; only the last counts.
    assert_eq!(Some(id), player.pending_controls_timer());

    player.update(Message::Timer(id));
    assert!(!player.controls_visible());
    assert!(fired.try_recv().is_err());
}
