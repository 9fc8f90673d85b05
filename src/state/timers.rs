//! Scheduled one-shot tasks for transient UI.
//!
//! Toast auto-dismiss, debounce, and similar timers live in one owned
//! registry instead of ambient globals. Nothing here waits: the external
//! scheduler calls [`TimerRegistry::fire_due`] whenever it wakes, and a
//! timer cancelled before that moment simply never runs.

use std::time::{Duration, Instant};

/// Token for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Timer {
    id: TimerId,
    deadline: Instant,
    callback: Box<dyn FnOnce()>,
}

/// Owned registry of cancellable one-shot tasks.
#[derive(Default)]
pub struct TimerRegistry {
    timers: Vec<Timer>,
    next_id: u64,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `callback` to fire once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Timer {
            id,
            deadline: Instant::now() + delay,
            callback: Box::new(callback),
        });
        id
    }

    /// Invalidate a pending timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        self.timers.len() != before
    }

    /// Run every callback whose deadline is at or before `now`, in
    /// deadline order. Returns how many fired.
    pub fn fire_due(&mut self, now: Instant) -> usize {
        let mut due: Vec<Timer> = Vec::new();
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].deadline <= now {
                due.push(self.timers.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|timer| timer.deadline);

        let count = due.len();
        for timer in due {
            (timer.callback)();
        }
        count
    }

    /// Earliest pending deadline, for the external scheduler's next wake.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|timer| timer.deadline).min()
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Drop every pending timer without firing. Teardown path.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn fires_only_when_due() {
        let mut timers = TimerRegistry::new();
        let fired = Rc::new(RefCell::new(false));
        let fired_inner = fired.clone();
        timers.schedule(Duration::from_secs(60), move || {
            *fired_inner.borrow_mut() = true;
        });

        assert_eq!(timers.fire_due(Instant::now()), 0);
        assert!(!*fired.borrow());

        assert_eq!(timers.fire_due(Instant::now() + Duration::from_secs(120)), 1);
        assert!(*fired.borrow());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn cancel_before_fire_means_never() {
        let mut timers = TimerRegistry::new();
        let fired = Rc::new(RefCell::new(false));
        let fired_inner = fired.clone();
        let id = timers.schedule(Duration::from_millis(1), move || {
            *fired_inner.borrow_mut() = true;
        });

        assert!(timers.cancel(id));
        assert!(!timers.cancel(id)); // second cancel is a no-op
        assert_eq!(timers.fire_due(Instant::now() + Duration::from_secs(1)), 0);
        assert!(!*fired.borrow());
    }

    #[test]
    fn due_timers_fire_in_deadline_order() {
        let mut timers = TimerRegistry::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (label, ms) in [("slow", 30u64), ("fast", 10), ("mid", 20)] {
            let log = log.clone();
            timers.schedule(Duration::from_millis(ms), move || {
                log.borrow_mut().push(label);
            });
        }

        timers.fire_due(Instant::now() + Duration::from_secs(1));
        assert_eq!(*log.borrow(), vec!["fast", "mid", "slow"]);
    }

    #[test]
    fn clear_drops_everything_silently() {
        let mut timers = TimerRegistry::new();
        timers.schedule(Duration::from_millis(1), || panic!("must not fire"));
        timers.clear();
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.fire_due(Instant::now() + Duration::from_secs(1)), 0);
    }

    #[test]
    fn next_deadline_tracks_earliest() {
        let mut timers = TimerRegistry::new();
        assert!(timers.next_deadline().is_none());
        timers.schedule(Duration::from_secs(50), || {});
        let id = timers.schedule(Duration::from_secs(10), || {});
        let earliest = timers.next_deadline().unwrap();
        assert!(earliest <= Instant::now() + Duration::from_secs(10));
        timers.cancel(id);
        assert!(timers.next_deadline().unwrap() > earliest);
    }
}
