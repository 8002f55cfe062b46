#![forbid(unsafe_code)]

//! Picker mode and the value type a picker emits.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Whether a picker collects a date or a date and a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Calendar date only.
    #[default]
    Date,
    /// Calendar date plus hour and minute.
    DateTime,
}

impl Mode {
    /// Whether hour/minute fields exist in this mode.
    #[must_use]
    pub const fn has_time(self) -> bool {
        matches!(self, Self::DateTime)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::DateTime => "datetime",
        }
    }

    /// Parse `date` / `datetime` (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "date" | "d" => Some(Self::Date),
            "datetime" | "date-time" | "dt" => Some(Self::DateTime),
            _ => None,
        }
    }
}

/// A timezone-naive point in time produced by a picker.
///
/// Hosts that work with zoned times convert to local wall time before
/// constructing a picker and back after `on_change`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PickerValue {
    /// A calendar date (Date mode).
    Date(NaiveDate),
    /// A date with hour and minute (DateTime mode). Seconds are always zero.
    DateTime(NaiveDateTime),
}

impl PickerValue {
    /// Build a date-and-time value. Out-of-range parts fall back to midnight.
    #[must_use]
    pub fn at(date: NaiveDate, hour: u8, minute: u8) -> Self {
        let time = NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0)
            .unwrap_or_default();
        Self::DateTime(date.and_time(time))
    }

    /// Combine a selected date with optional time fields for the given mode.
    ///
    /// In DateTime mode absent fields default to zero.
    #[must_use]
    pub fn compose(mode: Mode, date: NaiveDate, hour: Option<u8>, minute: Option<u8>) -> Self {
        match mode {
            Mode::Date => Self::Date(date),
            Mode::DateTime => Self::at(date, hour.unwrap_or(0), minute.unwrap_or(0)),
        }
    }

    /// The calendar date component.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(d) => *d,
            Self::DateTime(dt) => dt.date(),
        }
    }

    /// Hour of day, when the value carries a time.
    #[must_use]
    pub fn hour(&self) -> Option<u8> {
        match self {
            Self::Date(_) => None,
            Self::DateTime(dt) => u8::try_from(dt.hour()).ok(),
        }
    }

    /// Minute of hour, when the value carries a time.
    #[must_use]
    pub fn minute(&self) -> Option<u8> {
        match self {
            Self::Date(_) => None,
            Self::DateTime(dt) => u8::try_from(dt.minute()).ok(),
        }
    }

    /// Human-readable form used in announcements, e.g. `June 10, 2025 14:30`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Date(d) => d.format("%B %-d, %Y").to_string(),
            Self::DateTime(dt) => dt.format("%B %-d, %Y %H:%M").to_string(),
        }
    }
}

impl From<NaiveDate> for PickerValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDateTime> for PickerValue {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl fmt::Display for PickerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{:04}-{:02}-{:02}", d.year(), d.month(), d.day()),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M")),
        }
    }
}

/// Error returned when a value string is neither `YYYY-MM-DD` nor `YYYY-MM-DDTHH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueParseError {
    input: String,
}

impl fmt::Display for ValueParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid value '{}': expected YYYY-MM-DD or YYYY-MM-DDTHH:MM",
            self.input
        )
    }
}

impl std::error::Error for ValueParseError {}

impl FromStr for PickerValue {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M") {
            return Ok(Self::DateTime(dt));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M") {
            return Ok(Self::DateTime(dt));
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self::Date)
            .map_err(|_| ValueParseError {
                input: s.to_string(),
            })
    }
}
