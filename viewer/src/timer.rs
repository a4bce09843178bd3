//! One-shot timers for auto-play
//!
//! The session never sleeps. It asks a [`Scheduler`] for a timer and the host event loop
//! reports the fired [`TimerId`] back to it.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub const fn new(id: u64) -> Self {
        TimerId(id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "#{}", self.0)
    }
}

pub trait Scheduler {
    /// Starts a one-shot timer firing after `delay`
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancels a timer; unknown or already fired ids are ignored
    fn cancel(&mut self, id: TimerId);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        (**self).schedule(delay)
    }

    fn cancel(&mut self, id: TimerId) {
        (**self).cancel(id)
    }
}

/// Deterministic scheduler with a virtual clock
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TimerId, Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Moves the clock forward and returns the timers which fired, earliest first
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        let mut due: Vec<(Duration, TimerId)> = self
            .pending
            .iter()
            .filter(|(_, &at)| at <= self.now)
            .map(|(&id, &at)| (at, id))
            .collect();
        due.sort();
        for (_, id) in &due {
            self.pending.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Moves the clock to the earliest pending timer and fires it
    pub fn fire_next(&mut self) -> Option<TimerId> {
        let (&id, &at) = self.pending.iter().min_by_key(|(&id, &at)| (at, id))?;
        self.pending.remove(&id);
        self.now = self.now.max(at);
        Some(id)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, self.now + delay);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_advance() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule(300 * MS);
        let b = sched.schedule(100 * MS);
        let c = sched.schedule(500 * MS);
        assert_ne!(a, b);
        assert_eq!(sched.pending_count(), 3);

        assert_eq!(sched.advance(50 * MS), vec![]);
        assert_eq!(sched.advance(250 * MS), vec![b, a]);
        assert_eq!(sched.now(), 300 * MS);
        assert!(sched.is_pending(c));

        sched.cancel(c);
        sched.cancel(c);
        assert_eq!(sched.advance(1000 * MS), vec![]);
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn test_fire_next() {
        let mut sched = ManualScheduler::new();
        assert_eq!(sched.fire_next(), None);
        let a = sched.schedule(200 * MS);
        let b = sched.schedule(100 * MS);
        assert_eq!(sched.fire_next(), Some(b));
        assert_eq!(sched.now(), 100 * MS);
        assert_eq!(sched.fire_next(), Some(a));
        assert_eq!(sched.now(), 200 * MS);
        assert_eq!(sched.fire_next(), None);
        assert_eq!(a.to_string(), "#0");
    }
}
