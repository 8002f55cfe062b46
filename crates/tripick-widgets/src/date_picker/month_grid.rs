#![forbid(unsafe_code)]

//! Month grid model and calendar arithmetic.
//!
//! [`MonthGrid::build`] derives the renderable shape of one month: seven
//! weekday headers, the number of leading blank cells, and the day count.
//! Weeks start on Monday, so `leading_blank_count` is the ISO weekday of the
//! first of the month minus one.
//!
//! The model knows nothing about bounds, selection, or focus. Consumers
//! decide per-cell state (see [`super::view`]).
//!
//! # Example
//!
//! ```
//! use tripick_widgets::date_picker::month_grid::{MonthGrid, YearMonth};
//!
//! let june = YearMonth::new(2025, 6).unwrap();
//! let grid = MonthGrid::build(june);
//! assert_eq!(grid.leading_blank_count(), 6); // 2025-06-01 is a Sunday
//! assert_eq!(grid.day_count(), 30);
//! assert_eq!(grid.week_count(), 6);
//! ```

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};

/// Two-letter weekday headers, Monday first.
pub const WEEK_HEADER: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Days per grid row.
pub const DAYS_PER_WEEK: u32 = 7;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a year-month. `month` is 1-based; returns `None` outside 1..=12
    /// or outside the representable calendar.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Number of days in the month.
    #[must_use]
    pub fn day_count(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// The month `delta` months away. Saturates at the ends of the calendar.
    #[must_use]
    pub fn add_months(&self, delta: i32) -> Self {
        Self::of(shift_months(self.first_day(), delta))
    }

    /// Whether `date` falls in this month.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

/// One slot of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridCell {
    /// Padding before the first day or after the last.
    Blank,
    /// A real day of the month.
    Day(NaiveDate),
}

impl GridCell {
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Blank => None,
            Self::Day(d) => Some(*d),
        }
    }
}

/// The renderable shape of one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    year_month: YearMonth,
    leading_blanks: u32,
    day_count: u32,
}

impl MonthGrid {
    /// Derive the grid for a month.
    #[must_use]
    pub fn build(year_month: YearMonth) -> Self {
        Self {
            year_month,
            leading_blanks: year_month.first_day().weekday().number_from_monday() - 1,
            day_count: year_month.day_count(),
        }
    }

    #[must_use]
    pub const fn year_month(&self) -> YearMonth {
        self.year_month
    }

    /// Weekday header labels, Monday first.
    #[must_use]
    pub const fn week_header_labels(&self) -> [&'static str; 7] {
        WEEK_HEADER
    }

    /// Blank cells before day 1.
    #[must_use]
    pub const fn leading_blank_count(&self) -> u32 {
        self.leading_blanks
    }

    #[must_use]
    pub const fn day_count(&self) -> u32 {
        self.day_count
    }

    /// Rows needed to show every day.
    #[must_use]
    pub const fn week_count(&self) -> u32 {
        (self.leading_blanks + self.day_count).div_ceil(DAYS_PER_WEEK)
    }

    /// The date of day `day` (1-based) in this month.
    #[must_use]
    pub fn date_at(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.day_count {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year_month.year, self.year_month.month, day)
    }

    /// Row and column (both 0-based) of `date`, if it belongs to this month.
    #[must_use]
    pub fn position_of(&self, date: NaiveDate) -> Option<(u32, u32)> {
        if !self.year_month.contains(date) {
            return None;
        }
        let index = self.leading_blanks + date.day() - 1;
        Some((index / DAYS_PER_WEEK, index % DAYS_PER_WEEK))
    }

    /// Leading blanks followed by each day, without trailing padding.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let blanks = (0..self.leading_blanks).map(|_| GridCell::Blank);
        let days = (1..=self.day_count).filter_map(|d| self.date_at(d).map(GridCell::Day));
        blanks.chain(days)
    }

    /// Full weeks, padded with trailing blanks.
    #[must_use]
    pub fn weeks(&self) -> Vec<[GridCell; 7]> {
        let mut weeks = Vec::with_capacity(self.week_count() as usize);
        let mut row = [GridCell::Blank; 7];
        for (i, cell) in self.cells().enumerate() {
            row[i % 7] = cell;
            if i % 7 == 6 {
                weeks.push(row);
                row = [GridCell::Blank; 7];
            }
        }
        if row.iter().any(|c| matches!(c, GridCell::Day(_))) {
            weeks.push(row);
        }
        weeks
    }
}

// ---------------------------------------------------------------------------
// Calendar arithmetic
// ---------------------------------------------------------------------------

/// Days in a month; 0 for an invalid month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next) => u32::try_from(next.signed_duration_since(first).num_days()).unwrap_or(0),
        // Only December of the last representable year lands here.
        None => 31,
    }
}

/// `date` moved by `delta` days; unchanged if that leaves the calendar.
#[must_use]
pub fn shift_days(date: NaiveDate, delta: i64) -> NaiveDate {
    let moved = if delta >= 0 {
        date.checked_add_days(Days::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(delta.unsigned_abs()))
    };
    moved.unwrap_or(date)
}

/// `date` moved by `delta` months, keeping the day where possible and
/// otherwise snapping to the last day of the target month (Jan 31 + 1 month
/// = Feb 28/29). Unchanged if that leaves the calendar.
#[must_use]
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let moved = if delta >= 0 {
        date.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    moved.unwrap_or(date)
}

/// Monday of the week containing `date`.
#[must_use]
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    shift_days(date, -i64::from(date.weekday().num_days_from_monday()))
}

/// Sunday of the week containing `date`.
#[must_use]
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    shift_days(date, 6 - i64::from(date.weekday().num_days_from_monday()))
}
