#![forbid(unsafe_code)]

//! Fixed hour and minute grids.
//!
//! Hours are the 24 values `0..=23`. Minutes are 12 cells in steps of
//! [`MINUTE_STEP`], `0..=55`. Selected minutes may be free-form when they come
//! from an external value; the focus cursor always sits on a grid cell.

/// Minutes between adjacent minute cells.
pub const MINUTE_STEP: u8 = 5;

/// Highest hour value.
pub const LAST_HOUR: u8 = 23;

/// Highest minute cell.
pub const LAST_MINUTE_CELL: u8 = 55;

/// Highest valid minute value.
pub const MAX_MINUTE: u8 = 59;

/// Every hour cell.
pub const HOURS: [u8; 24] = build_hours();

/// Every minute cell.
pub const MINUTES: [u8; 12] = build_minutes();

const fn build_hours() -> [u8; 24] {
    let mut out = [0u8; 24];
    let mut i = 0;
    while i < 24 {
        out[i] = i as u8;
        i += 1;
    }
    out
}

const fn build_minutes() -> [u8; 12] {
    let mut out = [0u8; 12];
    let mut i = 0;
    while i < 12 {
        out[i] = i as u8 * MINUTE_STEP;
        i += 1;
    }
    out
}

/// Nearest minute cell to `minute` (37 -> 35, 38 -> 40), capped at 55.
#[must_use]
pub const fn round_minute(minute: u8) -> u8 {
    let rounded = (minute as u16 + 2) / MINUTE_STEP as u16 * MINUTE_STEP as u16;
    if rounded > LAST_MINUTE_CELL as u16 {
        LAST_MINUTE_CELL
    } else {
        rounded as u8
    }
}

/// Minute cell at or below `minute` (07 -> 05), capped at 55.
#[must_use]
pub const fn snap_minute(minute: u8) -> u8 {
    let snapped = minute / MINUTE_STEP * MINUTE_STEP;
    if snapped > LAST_MINUTE_CELL {
        LAST_MINUTE_CELL
    } else {
        snapped
    }
}

/// Hour moved by `delta`, clamped to `0..=23`.
#[must_use]
pub fn step_hour(hour: u8, delta: i16) -> u8 {
    let moved = (i16::from(hour) + delta).clamp(0, i16::from(LAST_HOUR));
    u8::try_from(moved).unwrap_or(0)
}

/// Minute cell moved by `cells` grid steps, clamped to `0..=55`.
#[must_use]
pub fn step_minute(minute: u8, cells: i16) -> u8 {
    let moved = (i16::from(snap_minute(minute)) + cells * i16::from(MINUTE_STEP))
        .clamp(0, i16::from(LAST_MINUTE_CELL));
    u8::try_from(moved).unwrap_or(0)
}
