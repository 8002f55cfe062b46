#![forbid(unsafe_code)]

//! Numeric type-to-focus buffer for the hour and minute grids.
//!
//! Typing digits on a time grid jumps the focus cursor to the typed value.
//! Keystrokes that arrive within the timeout window accumulate, so `1` then `5`
//! on the hour grid focuses 15, while a pause between them yields two separate
//! jumps (1, then 5).
//!
//! # Automaton
//!
//! ```text
//!            digit k                      digit k, prev+k fits
//!   Empty ───────────────▶ Pending(k) ───────────────────────▶ Pending(prev+k)
//!     ▲                      │   ▲                                  │
//!     │  timeout / non-digit │   └──────── digit k, prev+k doesn't ─┘
//!     └──────────────────────┘                fit: restart at k
//! ```
//!
//! "Fits" means the combined string is within the field's digit width and its
//! value is in range (hours `0..=23`, minutes `0..=59`). Each digit re-arms the
//! timeout. The buffer only ever yields a focus target; selecting remains a
//! separate Enter/Space/click.
//!
//! # Invariants
//! 1. The buffer never holds more than [`JumpField::width`] digits.
//! 2. The buffered value is always within the field's range.
//! 3. Minute focus targets are grid cells (nearest multiple of 5).

use std::time::{Duration, Instant};

use tripick_core::timer::Deadline;

use super::time_grid::{LAST_HOUR, MAX_MINUTE, round_minute};

/// Default window for combining keystrokes.
pub const DEFAULT_JUMP_TIMEOUT: Duration = Duration::from_millis(1000);

/// The grid a buffer serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpField {
    /// Hour grid, `0..=23`.
    Hour,
    /// Minute grid, `0..=59` typed, focus rounded to a 5-minute cell.
    Minute,
}

impl JumpField {
    /// Maximum number of digits accumulated.
    #[must_use]
    pub const fn width(self) -> usize {
        2
    }

    /// Largest typed value accepted.
    #[must_use]
    pub const fn max_value(self) -> u8 {
        match self {
            Self::Hour => LAST_HOUR,
            Self::Minute => MAX_MINUTE,
        }
    }

    /// The grid cell to focus for a typed value.
    #[must_use]
    pub const fn focus_for(self, value: u8) -> u8 {
        match self {
            Self::Hour => value,
            Self::Minute => round_minute(value),
        }
    }
}

/// Digit accumulator for one time grid.
#[derive(Debug, Clone)]
pub struct NumericJumpBuffer {
    field: JumpField,
    digits: String,
    expiry: Deadline,
    timeout: Duration,
}

impl NumericJumpBuffer {
    /// Create an empty buffer for `field`.
    #[must_use]
    pub fn new(field: JumpField, timeout: Duration) -> Self {
        Self {
            field,
            digits: String::with_capacity(field.width()),
            expiry: Deadline::new(),
            timeout,
        }
    }

    #[must_use]
    pub const fn field(&self) -> JumpField {
        self.field
    }

    /// Digits typed so far (empty when idle).
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Whether keystrokes are waiting to be combined.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.digits.is_empty()
    }

    /// Feed one digit (0-9) and return the cell to focus.
    ///
    /// An expired buffer is treated as empty even if [`check_timeout`]
    /// (Self::check_timeout) was not called in between.
    pub fn push_digit(&mut self, digit: u8, now: Instant) -> u8 {
        let digit = digit.min(9);
        if self.expiry.fire(now) {
            self.digits.clear();
        }

        let mut combined = self.digits.clone();
        combined.push(char::from(b'0' + digit));
        if self.digits.is_empty() || !self.accepts(&combined) {
            self.digits.clear();
            self.digits.push(char::from(b'0' + digit));
        } else {
            self.digits = combined;
        }

        self.expiry.arm(now, self.timeout);
        self.field.focus_for(self.value())
    }

    /// Drop any pending digits (non-digit key, grid switch, close).
    pub fn reset(&mut self) {
        self.digits.clear();
        self.expiry.cancel();
    }

    /// Clear the buffer if its window has elapsed. Returns `true` if it did.
    pub fn check_timeout(&mut self, now: Instant) -> bool {
        if self.expiry.fire(now) {
            self.digits.clear();
            true
        } else {
            false
        }
    }

    /// When the pending digits expire.
    #[must_use]
    pub fn deadline(&self) -> &Deadline {
        &self.expiry
    }

    /// Change the combine window. Pending digits keep their current deadline.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn accepts(&self, candidate: &str) -> bool {
        candidate.len() <= self.field.width()
            && candidate
                .parse::<u16>()
                .is_ok_and(|v| v <= u16::from(self.field.max_value()))
    }

    fn value(&self) -> u8 {
        self.digits.parse().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_300: Duration = Duration::from_millis(300);
    const MS_1500: Duration = Duration::from_millis(1500);

    fn hours() -> NumericJumpBuffer {
        NumericJumpBuffer::new(JumpField::Hour, DEFAULT_JUMP_TIMEOUT)
    }

    fn minutes() -> NumericJumpBuffer {
        NumericJumpBuffer::new(JumpField::Minute, DEFAULT_JUMP_TIMEOUT)
    }

    #[test]
    fn two_digits_within_window_combine() {
        let mut buf = hours();
        let t = Instant::now();
        assert_eq!(buf.push_digit(1, t), 1);
        assert_eq!(buf.push_digit(5, t + MS_300), 15);
        assert_eq!(buf.digits(), "15");
    }

    #[test]
    fn out_of_range_combination_restarts() {
        let mut buf = hours();
        let t = Instant::now();
        assert_eq!(buf.push_digit(9, t), 9);
        assert_eq!(buf.push_digit(9, t + MS_300), 9);
        assert_eq!(buf.digits(), "9");
    }

    #[test]
    fn pause_splits_into_separate_jumps() {
        let mut buf = hours();
        let t = Instant::now();
        assert_eq!(buf.push_digit(1, t), 1);
        assert_eq!(buf.push_digit(5, t + MS_1500), 5);
        assert_eq!(buf.digits(), "5");
    }

    #[test]
    fn third_digit_exceeds_width_and_restarts() {
        let mut buf = hours();
        let t = Instant::now();
        buf.push_digit(1, t);
        buf.push_digit(2, t + MS_300);
        assert_eq!(buf.push_digit(3, t + MS_300 * 2), 3);
        assert_eq!(buf.digits(), "3");
    }

    #[test]
    fn each_digit_rearms_the_window() {
        let mut buf = hours();
        let t = Instant::now();
        buf.push_digit(9, t);
        buf.push_digit(9, t + Duration::from_millis(900));
        // 1700ms after the first key but only 800ms after the restart at `9`.
        assert_eq!(buf.push_digit(1, t + Duration::from_millis(1700)), 1);
        assert!(buf.is_pending());
        assert!(!buf.check_timeout(t + Duration::from_millis(2600)));
        assert!(buf.check_timeout(t + Duration::from_millis(2700)));
    }

    #[test]
    fn minute_focus_rounds_to_cell() {
        let mut buf = minutes();
        let t = Instant::now();
        assert_eq!(buf.push_digit(3, t), 5);
        assert_eq!(buf.push_digit(7, t + MS_300), 35);
        assert_eq!(buf.digits(), "37");
    }

    #[test]
    fn minute_sixty_is_rejected() {
        let mut buf = minutes();
        let t = Instant::now();
        buf.push_digit(6, t);
        assert_eq!(buf.push_digit(0, t + MS_300), 0);
        assert_eq!(buf.digits(), "0");
    }

    #[test]
    fn leading_zero_combines() {
        let mut buf = hours();
        let t = Instant::now();
        assert_eq!(buf.push_digit(0, t), 0);
        assert_eq!(buf.push_digit(7, t + MS_300), 7);
        assert_eq!(buf.digits(), "07");
    }

    #[test]
    fn timeout_clears_but_reset_is_immediate() {
        let mut buf = hours();
        let t = Instant::now();
        buf.push_digit(2, t);
        assert!(!buf.check_timeout(t + MS_300));
        assert!(buf.check_timeout(t + DEFAULT_JUMP_TIMEOUT));
        assert!(!buf.is_pending());

        buf.push_digit(2, t);
        buf.reset();
        assert!(!buf.is_pending());
        assert!(!buf.deadline().is_armed());
    }

    #[test]
    fn field_limits() {
        assert_eq!(JumpField::Hour.max_value(), 23);
        assert_eq!(JumpField::Minute.max_value(), 59);
        assert_eq!(JumpField::Minute.focus_for(59), 55);
        assert_eq!(JumpField::Hour.focus_for(7), 7);
    }
}
