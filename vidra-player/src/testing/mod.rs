//! Test doubles for driving a controller without a decoder or a clock.
//!
//! - [`FakeBackend`] records every backend call and can be told to refuse
//!   play or fullscreen requests.
//! - [`ManualScheduler`] keeps timers on a virtual clock that only moves
//!   when a test advances it.
//!
//! ```
//! use std::time::Duration;
//! use vidra_player::testing::{advance_time, FakeBackend, ManualScheduler};
//! # use vidra_config::ControllerConfig;
//! # use vidra_model::{MediaFormat, PlayerOptions, Source};
//! # use vidra_player::{MediaEvent, Message, PlaybackController};
//! # let mut player = PlaybackController::mount(
//! #     FakeBackend::default(),
//! #     ManualScheduler::default(),
//! #     vec![Source::new("/v.mp4", MediaFormat::Mp4, "720p")],
//! #     PlayerOptions::default(),
//! #     ControllerConfig::default(),
//! # ).unwrap();
//! # player.update(MediaEvent::LoadedMetadata { duration: 60.0 }.into());
//! player.update(MediaEvent::Playing.into());
//! advance_time(&mut player, Duration::from_millis(3_000));
//! assert!(!player.controls_visible());
//! ```

mod backend;
mod scheduler;

use std::time::Duration;

pub use backend::{BackendCall, FakeBackend};
pub use scheduler::ManualScheduler;

use crate::PlaybackController;
use crate::backend::{FullscreenSurface, MediaBackend};
use crate::messages::Message;

/// Move the virtual clock forward by `by`, delivering every timer that comes
/// due on the way, in deadline order. Timers scheduled while delivering are
/// honored if they also fall inside the window.
pub fn advance_time<B>(
    controller: &mut PlaybackController<B, ManualScheduler>,
    by: Duration,
) -> usize
where
    B: MediaBackend + FullscreenSurface,
{
    let target = controller.scheduler().now() + by;
    let mut delivered = 0;

    while let Some(id) = controller.scheduler_mut().pop_due(target) {
        controller.update(Message::Timer(id));
        delivered += 1;
    }

    controller.scheduler_mut().set_now(target);
    delivered
}
