//! Timer scheduling contracts and a virtual-clock scheduler for native tests.

use std::{cell::RefCell, fmt, rc::Rc};

/// One-shot callback run when a scheduled timer elapses.
pub type TimerCallback = Box<dyn FnOnce()>;

/// Host service for one-shot timers (`setTimeout` shaped).
///
/// Scheduled timers cannot be cancelled. Callers that need a timer to become a no-op must check
/// their own state when the callback runs.
pub trait TimerScheduler {
    /// Runs `callback` once after `delay_ms` milliseconds.
    fn schedule(&self, delay_ms: u32, callback: TimerCallback) -> Result<(), String>;
}

struct PendingTimer {
    due_ms: u64,
    seq: u64,
    callback: TimerCallback,
}

#[derive(Default)]
struct VirtualTimersInner {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<PendingTimer>,
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Timers fire in due order; timers due at the same instant fire in scheduling order. Callbacks
/// may schedule further timers, which fire in the same advance when they fall within the target.
#[derive(Clone, Default)]
pub struct VirtualTimers {
    inner: Rc<RefCell<VirtualTimersInner>>,
}

impl fmt::Debug for VirtualTimers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("VirtualTimers")
            .field("now_ms", &inner.now_ms)
            .field("pending", &inner.pending.len())
            .finish()
    }
}

impl VirtualTimers {
    /// Current virtual time in milliseconds since creation.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Number of timers that have not fired yet.
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Advances the clock to `target_ms`, firing every timer due at or before it.
    ///
    /// Moving backwards is a no-op.
    pub fn advance_to(&self, target_ms: u64) {
        while let Some(callback) = self.pop_due(target_ms) {
            callback();
        }
        let mut inner = self.inner.borrow_mut();
        inner.now_ms = inner.now_ms.max(target_ms);
    }

    /// Fires timers until none remain.
    pub fn run_until_idle(&self) {
        loop {
            let next_due = self
                .inner
                .borrow()
                .pending
                .iter()
                .map(|timer| timer.due_ms)
                .min();
            match next_due {
                Some(due) => self.advance_to(due),
                None => break,
            }
        }
    }

    fn pop_due(&self, target_ms: u64) -> Option<TimerCallback> {
        let mut inner = self.inner.borrow_mut();
        let index = inner
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_ms <= target_ms)
            .min_by_key(|(_, timer)| (timer.due_ms, timer.seq))
            .map(|(index, _)| index)?;
        let timer = inner.pending.remove(index);
        inner.now_ms = inner.now_ms.max(timer.due_ms);
        Some(timer.callback)
    }
}

impl TimerScheduler for VirtualTimers {
    fn schedule(&self, delay_ms: u32, callback: TimerCallback) -> Result<(), String> {
        let mut inner = self.inner.borrow_mut();
        let due_ms = inner.now_ms.saturating_add(u64::from(delay_ms));
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.pending.push(PendingTimer {
            due_ms,
            seq,
            callback,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<(&'static str, u64)>>>, VirtualTimers) {
        (Rc::new(RefCell::new(Vec::new())), VirtualTimers::default())
    }

    #[test]
    fn fires_in_due_order_with_ties_in_schedule_order() {
        let (log, timers) = recorder();
        for (label, delay) in [("late", 300), ("tie-a", 100), ("tie-b", 100)] {
            let log = log.clone();
            let clock = timers.clone();
            timers
                .schedule(delay, Box::new(move || log.borrow_mut().push((label, clock.now_ms()))))
                .expect("schedule");
        }

        timers.advance_to(250);
        assert_eq!(*log.borrow(), vec![("tie-a", 100), ("tie-b", 100)]);
        assert_eq!(timers.now_ms(), 250);
        assert_eq!(timers.pending_count(), 1);

        timers.run_until_idle();
        assert_eq!(log.borrow().last(), Some(&("late", 300)));
    }

    #[test]
    fn callbacks_can_schedule_follow_up_timers() {
        let (log, timers) = recorder();
        let nested_log = log.clone();
        let nested_timers = timers.clone();
        timers
            .schedule(
                100,
                Box::new(move || {
                    let log = nested_log.clone();
                    let clock = nested_timers.clone();
                    nested_timers
                        .schedule(
                            50,
                            Box::new(move || log.borrow_mut().push(("nested", clock.now_ms()))),
                        )
                        .expect("schedule nested");
                }),
            )
            .expect("schedule");

        timers.advance_to(200);
        assert_eq!(*log.borrow(), vec![("nested", 150)]);
        assert_eq!(timers.pending_count(), 0);
    }
}
