//! Cancellable timers owned by a player session.
//!
//! The controller never sleeps. It asks a [`Scheduler`] to deliver a
//! [`TimerId`] back after a delay and the host feeds that id into
//! [`Message::Timer`](crate::messages::Message::Timer). Ids carry a
//! generation so a timer that was superseded or outlived its session is
//! recognized as stale and ignored.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identity of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn generation(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Monotonic source of timer ids for a single controller.
#[derive(Debug, Default)]
pub(crate) struct TimerIds {
    next: u64,
}

impl TimerIds {
    pub(crate) fn next(&mut self) -> TimerId {
        self.next += 1;
        TimerId(self.next)
    }
}

pub trait Scheduler {
    /// Deliver `id` once `after` has elapsed. Scheduling an id that is
    /// already pending replaces it.
    fn schedule(&mut self, id: TimerId, after: Duration);

    /// Drop a pending timer. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);

    fn cancel_all(&mut self);
}

/// Tokio-backed scheduler: one sleeping task per timer, posting fired ids on
/// an unbounded channel the host drains alongside its other input.
pub struct TokioScheduler {
    handle: Handle,
    fired_tx: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("pending", &self.tasks.len())
            .finish()
    }
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        (
            Self {
                handle,
                fired_tx,
                tasks: HashMap::new(),
            },
            fired_rx,
        )
    }

    /// Number of timers that have not fired or been cancelled yet.
    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, id: TimerId, after: Duration) {
        self.tasks.retain(|_, task| !task.is_finished());

        let fired_tx = self.fired_tx.clone();
        let task = self.handle.spawn(async move {
            tokio::time::sleep(after).await;
            // Receiver gone means the host is shutting down.
            let _ = fired_tx.send(id);
        });

        if let Some(previous) = self.tasks.insert(id, task) {
            previous.abort();
        }
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
        }
    }

    fn cancel_all(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let (mut scheduler, mut fired) = TokioScheduler::new(Handle::current());
        let mut ids = TimerIds::default();
        let id = ids.next();

        scheduler.schedule(id, Duration::from_millis(3_000));
        tokio::time::sleep(Duration::from_millis(2_999)).await;
        assert!(fired.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.recv().await, Some(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let (mut scheduler, mut fired) = TokioScheduler::new(Handle::current());
        let mut ids = TimerIds::default();
        let cancelled = ids.next();
        let kept = ids.next();

        scheduler.schedule(cancelled, Duration::from_millis(100));
        scheduler.schedule(kept, Duration::from_millis(200));
        scheduler.cancel(cancelled);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.recv().await, Some(kept));
        assert!(fired.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_timers() {
        let (mut scheduler, mut fired) = TokioScheduler::new(Handle::current());
        let mut ids = TimerIds::default();
        scheduler.schedule(ids.next(), Duration::from_millis(100));
        assert_eq!(scheduler.pending(), 1);

        drop(scheduler);
        tokio::time::sleep(Duration::from_millis(500)).await;
        // Sender side is gone and nothing was delivered.
        assert_eq!(fired.recv().await, None);
    }
}
