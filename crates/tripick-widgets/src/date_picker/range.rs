#![forbid(unsafe_code)]

//! Inclusive range clamping for dates and times.
//!
//! Every focus move in the picker passes through [`clamp`]; day cells outside
//! [`Bounds`] are rendered disabled and ignored on selection via [`in_range`].

use std::fmt;

use chrono::NaiveDate;

/// Bound `value` to the inclusive interval `[min, max]`; either end may be open.
#[must_use]
pub fn clamp<T: Ord + Copy>(value: T, min: Option<T>, max: Option<T>) -> T {
    if let Some(lo) = min
        && value < lo
    {
        return lo;
    }
    if let Some(hi) = max
        && value > hi
    {
        return hi;
    }
    value
}

/// Whether `value` lies within the inclusive interval `[min, max]`.
#[must_use]
pub fn in_range<T: Ord + Copy>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.is_none_or(|lo| value >= lo) && max.is_none_or(|hi| value <= hi)
}

/// Optional inclusive calendar bounds. Guaranteed `min <= max` when both are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
}

impl Bounds {
    /// Bounds with no limit on either side.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Create bounds, rejecting `min > max`.
    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Result<Self, BoundsError> {
        if let (Some(lo), Some(hi)) = (min, max)
            && lo > hi
        {
            return Err(BoundsError { min: lo, max: hi });
        }
        Ok(Self { min, max })
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> Option<NaiveDate> {
        self.min
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> Option<NaiveDate> {
        self.max
    }

    /// Clamp a date into these bounds.
    #[must_use]
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        clamp(date, self.min, self.max)
    }

    /// Whether a date is selectable under these bounds.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        in_range(date, self.min, self.max)
    }
}

/// Error returned by [`Bounds::new`] when the interval is inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsError {
    /// The requested lower bound.
    pub min: NaiveDate,
    /// The requested upper bound.
    pub max: NaiveDate,
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "min date {} is after max date {}", self.min, self.max)
    }
}

impl std::error::Error for BoundsError {}
