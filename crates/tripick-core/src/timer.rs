#![forbid(unsafe_code)]

//! Single-shot, cancellable deadlines driven by caller-supplied instants.
//!
//! Pickers never read the wall clock. Every operation that can arm or fire a
//! timer takes `now: Instant`, so hosts pass `Instant::now()` and tests pass a
//! synthetic base instant plus offsets. Firing is polled: the host calls
//! `tick(now)` on its widget, which calls [`Deadline::fire`] on each slot.
//!
//! # Invariants
//! 1. A deadline fires at most once per arming.
//! 2. Re-arming replaces the previous due time (restart, not queue).
//! 3. A cancelled deadline never fires.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tripick_core::timer::Deadline;
//!
//! let t0 = Instant::now();
//! let mut clear = Deadline::new();
//! clear.arm(t0, Duration::from_millis(1000));
//!
//! assert!(!clear.fire(t0 + Duration::from_millis(999)));
//! assert!(clear.fire(t0 + Duration::from_millis(1000)));
//! assert!(!clear.fire(t0 + Duration::from_millis(2000)));
//! ```

use std::time::{Duration, Instant};

/// A single-shot timer slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    due: Option<Instant>,
}

impl Deadline {
    /// An unarmed deadline.
    #[must_use]
    pub const fn new() -> Self {
        Self { due: None }
    }

    /// Arm (or re-arm) the deadline to fire `after` from `now`.
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.due = Some(now + after);
    }

    /// Disarm without firing. Returns whether the deadline was armed.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    /// Whether the deadline is armed and not yet fired.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// Whether the deadline is armed and `now` has reached it. Does not consume.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.due.is_some_and(|due| now >= due)
    }

    /// Fire the deadline if due. Returns `true` exactly once per arming.
    pub fn fire(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.due = None;
            true
        } else {
            false
        }
    }

    /// Time left until the deadline fires, or `None` when unarmed.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    /// The instant at which the deadline fires.
    #[must_use]
    pub const fn due(&self) -> Option<Instant> {
        self.due
    }
}

/// Earliest of several deadlines, for hosts that sleep until the next timer.
#[must_use]
pub fn next_due<'a>(deadlines: impl IntoIterator<Item = &'a Deadline>) -> Option<Instant> {
    deadlines.into_iter().filter_map(Deadline::due).min()
}
