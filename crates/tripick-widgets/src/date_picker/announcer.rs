#![forbid(unsafe_code)]

//! Short-lived screen-reader message.
//!
//! One message is live at a time. Each announcement replaces the previous one
//! and restarts the clear timer; when it fires the message is dropped. Hosts
//! mirror [`LiveAnnouncer::message`] into a polite live region.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tripick_core::timer::Deadline;

/// Default time an announcement stays live.
pub const DEFAULT_CLEAR_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct LiveAnnouncer {
    message: Option<String>,
    clear: Deadline,
    clear_delay: Duration,
}

impl Default for LiveAnnouncer {
    fn default() -> Self {
        Self::new(DEFAULT_CLEAR_DELAY)
    }
}

impl LiveAnnouncer {
    #[must_use]
    pub fn new(clear_delay: Duration) -> Self {
        Self {
            message: None,
            clear: Deadline::new(),
            clear_delay,
        }
    }

    /// Replace the live message and restart the clear timer.
    pub fn announce(&mut self, message: impl Into<String>, now: Instant) {
        self.message = Some(message.into());
        self.clear.arm(now, self.clear_delay);
    }

    /// The current message, if one is live.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Drop the message if its delay has elapsed. Returns `true` if it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.clear.fire(now) {
            self.message = None;
            true
        } else {
            false
        }
    }

    /// Drop the message immediately.
    pub fn clear(&mut self) {
        self.message = None;
        self.clear.cancel();
    }

    /// Pending clear timer.
    #[must_use]
    pub fn deadline(&self) -> &Deadline {
        &self.clear
    }

    pub fn set_clear_delay(&mut self, delay: Duration) {
        self.clear_delay = delay;
    }
}

/// `Tuesday, June 10, 2025`
#[must_use]
pub fn describe_day(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
