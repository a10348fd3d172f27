//! One-shot timer scheduling
//!
//! Every simulated delay in the app (upload progress ticks, the processing
//! delay, the sign-in delay) is a one-shot timer registered through the
//! [`Scheduler`] trait. Flows keep the [`TimerId`] they were handed and react
//! only to their own ids when the timer fires.
//!
//! [`VirtualScheduler`] keeps time manually so tests can fast-forward through
//! seconds of simulated work deterministically.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

/// Identifier of a scheduled timer
///
/// Ids are unique within the scheduler that issued them and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Create a timer id from its raw value
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Schedule and cancel one-shot timers
pub trait Scheduler {
    /// Register a timer that fires once after `delay`
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer
    ///
    /// Returns `true` if the timer was pending. A cancelled timer never fires.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Check whether a timer is still waiting to fire
    fn is_pending(&self, id: TimerId) -> bool;

    /// Number of timers waiting to fire
    fn pending_count(&self) -> usize;
}

/// Scheduler driven by a manually advanced clock
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    /// Current virtual time, measured from creation
    now: Duration,
    /// Next id to hand out
    next_id: u64,
    /// Pending timers ordered by (deadline, id)
    queue: BTreeMap<(Duration, u64), TimerId>,
    /// Deadline lookup for cancellation
    deadlines: HashMap<TimerId, Duration>,
}

impl VirtualScheduler {
    /// Create a scheduler with the clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Remove the earliest timer due at or before `until`
    ///
    /// The clock moves to the timer's deadline. Timers sharing a deadline are
    /// released in the order they were scheduled.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (&(deadline, seq), _) = self.queue.iter().next()?;
        if deadline > until {
            return None;
        }

        let id = self.queue.remove(&(deadline, seq))?;
        self.deadlines.remove(&id);
        if deadline > self.now {
            self.now = deadline;
        }
        Some(id)
    }

    /// Move the clock forward to `t`
    ///
    /// The clock never moves backwards; pending timers are not fired.
    pub fn advance_to(&mut self, t: Duration) {
        if t > self.now {
            self.now = t;
        }
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let seq = self.next_id;
        self.next_id += 1;

        let id = TimerId(seq);
        let deadline = self.now + delay;
        self.queue.insert((deadline, seq), id);
        self.deadlines.insert(id, deadline);
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.queue.remove(&(deadline, id.0)).is_some(),
            None => false,
        }
    }

    fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    fn pending_count(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let mut scheduler = VirtualScheduler::new();
        let slow = scheduler.schedule(Duration::from_millis(500));
        let fast = scheduler.schedule(Duration::from_millis(300));

        let until = Duration::from_secs(1);
        assert_eq!(scheduler.pop_due(until), Some(fast));
        assert_eq!(scheduler.now(), Duration::from_millis(300));
        assert_eq!(scheduler.pop_due(until), Some(slow));
        assert_eq!(scheduler.now(), Duration::from_millis(500));
        assert_eq!(scheduler.pop_due(until), None);
    }

    #[test]
    fn test_same_deadline_keeps_schedule_order() {
        let mut scheduler = VirtualScheduler::new();
        let first = scheduler.schedule(Duration::from_millis(100));
        let second = scheduler.schedule(Duration::from_millis(100));

        let until = Duration::from_millis(100);
        assert_eq!(scheduler.pop_due(until), Some(first));
        assert_eq!(scheduler.pop_due(until), Some(second));
    }

    #[test]
    fn test_timer_not_due_yet() {
        let mut scheduler = VirtualScheduler::new();
        let id = scheduler.schedule(Duration::from_millis(3000));

        assert_eq!(scheduler.pop_due(Duration::from_millis(2999)), None);
        assert!(scheduler.is_pending(id));
        assert_eq!(scheduler.now(), Duration::ZERO);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut scheduler = VirtualScheduler::new();
        let id = scheduler.schedule(Duration::from_millis(10));

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(!scheduler.is_pending(id));
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.pop_due(Duration::from_secs(60)), None);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut scheduler = VirtualScheduler::new();
        let a = scheduler.schedule(Duration::ZERO);
        scheduler.cancel(a);
        let b = scheduler.schedule(Duration::ZERO);
        assert_ne!(a, b);
    }

    #[test]
    fn test_delay_is_relative_to_current_time() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.advance_to(Duration::from_secs(2));
        scheduler.schedule(Duration::from_millis(300));

        assert_eq!(scheduler.next_deadline(), Some(Duration::from_millis(2300)));
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.advance_to(Duration::from_secs(5));
        scheduler.advance_to(Duration::from_secs(1));
        assert_eq!(scheduler.now(), Duration::from_secs(5));
    }
}
