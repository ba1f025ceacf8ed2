use std::collections::HashMap;
use std::time::Duration;

use crate::scheduler::{Scheduler, TimerId};

/// Virtual-time scheduler. Nothing fires on its own: tests move the clock
/// with [`ManualScheduler::advance`] or [`super::advance_time`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    deadlines: HashMap<TimerId, Duration>,
    scheduled: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Jump the clock without delivering anything. Never moves backwards.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    pub fn pending(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    pub fn deadline(&self, id: TimerId) -> Option<Duration> {
        self.deadlines.get(&id).copied()
    }

    /// Total `schedule` calls so far.
    pub fn scheduled(&self) -> usize {
        self.scheduled
    }

    /// Total effective cancellations so far.
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (id, deadline) = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= until)
            .min_by_key(|(id, deadline)| (**deadline, **id))
            .map(|(id, deadline)| (*id, *deadline))?;

        self.deadlines.remove(&id);
        self.set_now(deadline);
        Some(id)
    }

    /// Advance by `by` and return every timer that came due, in deadline
    /// order. The caller is responsible for delivering them.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        let target = self.now + by;
        let mut due = Vec::new();
        while let Some(id) = self.pop_due(target) {
            due.push(id);
        }
        self.set_now(target);
        due
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, id: TimerId, after: Duration) {
        self.scheduled += 1;
        self.deadlines.insert(id, self.now + after);
    }

    fn cancel(&mut self, id: TimerId) {
        if self.deadlines.remove(&id).is_some() {
            self.cancelled += 1;
        }
    }

    fn cancel_all(&mut self) {
        self.cancelled += self.deadlines.len();
        self.deadlines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TimerIds;

    #[test]
    fn test_advance_returns_due_timers_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        let mut ids = TimerIds::default();
        let late = ids.next();
        let early = ids.next();
        let never = ids.next();

        scheduler.schedule(late, Duration::from_millis(300));
        scheduler.schedule(early, Duration::from_millis(100));
        scheduler.schedule(never, Duration::from_millis(900));

        assert_eq!(
            scheduler.advance(Duration::from_millis(500)),
            vec![early, late]
        );
        assert_eq!(scheduler.now(), Duration::from_millis(500));
        assert!(scheduler.is_pending(never));
    }

    #[test]
    fn test_cancel_counts_only_pending_timers() {
        let mut scheduler = ManualScheduler::new();
        let mut ids = TimerIds::default();
        let id = ids.next();

        scheduler.schedule(id, Duration::from_millis(10));
        scheduler.cancel(id);
        scheduler.cancel(id);
        assert_eq!(scheduler.cancelled(), 1);
        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
    }
}
