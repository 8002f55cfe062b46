#![forbid(unsafe_code)]

//! Picker state and its pure transition function.
//!
//! [`reduce`] maps `(context, state, action)` to the next state and never has
//! side effects. The controller in the parent module calls it and derives
//! callbacks, announcements, and timer work by comparing the two states.
//!
//! # Invariants
//!
//! 1. `focused_date` is always inside the context's [`Bounds`].
//! 2. `selected_value` is `Some` exactly when `selected_date` is, and its
//!    components match the selected date, hour, and minute (missing time
//!    fields read as zero).
//! 3. Time fields stay `None` in Date mode, and `active_grid` stays `Grid::Day`.
//! 4. `focused_minute`, when set, is a grid cell (multiple of 5, at most 55).

use chrono::NaiveDate;

use super::range::Bounds;
use super::time_grid::{LAST_HOUR, MAX_MINUTE, snap_minute};
use super::value::{Mode, PickerValue};

/// The grid that owns the keyboard focus cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Grid {
    #[default]
    Day,
    Hour,
    Minute,
}

impl Grid {
    /// Next grid in Tab order for the given mode.
    #[must_use]
    pub const fn next(self, mode: Mode) -> Self {
        if !mode.has_time() {
            return Self::Day;
        }
        match self {
            Self::Day => Self::Hour,
            Self::Hour => Self::Minute,
            Self::Minute => Self::Day,
        }
    }

    /// Previous grid in Tab order for the given mode.
    #[must_use]
    pub const fn prev(self, mode: Mode) -> Self {
        if !mode.has_time() {
            return Self::Day;
        }
        match self {
            Self::Day => Self::Minute,
            Self::Hour => Self::Day,
            Self::Minute => Self::Hour,
        }
    }
}

/// Inputs the reducer reads but never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerContext {
    pub mode: Mode,
    pub bounds: Bounds,
    /// The last value accepted by the caller; rollback target for cancel.
    pub committed: Option<PickerValue>,
    /// Reference date used when no value is committed.
    pub today: NaiveDate,
    pub clearable: bool,
    pub disabled: bool,
}

impl PickerContext {
    /// Context for an empty, enabled, unbounded picker.
    #[must_use]
    pub fn new(mode: Mode, today: NaiveDate) -> Self {
        Self {
            mode,
            bounds: Bounds::unbounded(),
            committed: None,
            today,
            clearable: false,
            disabled: false,
        }
    }
}

/// Selection and focus of one picker instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerState {
    is_open: bool,
    focused_date: NaiveDate,
    selected_date: Option<NaiveDate>,
    focused_hour: Option<u8>,
    focused_minute: Option<u8>,
    selected_hour: Option<u8>,
    selected_minute: Option<u8>,
    selected_value: Option<PickerValue>,
    hovered_date: Option<NaiveDate>,
    active_grid: Grid,
}

impl PickerState {
    /// Closed state mirroring the committed value, focus clamped into bounds.
    #[must_use]
    pub fn seeded(ctx: &PickerContext) -> Self {
        let committed = ctx.committed;
        let anchor = committed.map_or(ctx.today, |v| v.date());
        let (hour, minute) = if ctx.mode.has_time() {
            (
                committed.and_then(|v| v.hour()),
                committed.and_then(|v| v.minute()),
            )
        } else {
            (None, None)
        };

        let mut state = Self {
            is_open: false,
            focused_date: ctx.bounds.clamp(anchor),
            selected_date: committed.map(|v| v.date()),
            focused_hour: hour,
            focused_minute: minute.map(snap_minute),
            selected_hour: hour,
            selected_minute: minute,
            selected_value: None,
            hovered_date: None,
            active_grid: Grid::Day,
        };
        state.recompute(ctx.mode);
        state
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub const fn focused_date(&self) -> NaiveDate {
        self.focused_date
    }

    #[must_use]
    pub const fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    #[must_use]
    pub const fn focused_hour(&self) -> Option<u8> {
        self.focused_hour
    }

    #[must_use]
    pub const fn focused_minute(&self) -> Option<u8> {
        self.focused_minute
    }

    #[must_use]
    pub const fn selected_hour(&self) -> Option<u8> {
        self.selected_hour
    }

    #[must_use]
    pub const fn selected_minute(&self) -> Option<u8> {
        self.selected_minute
    }

    /// The pending value assembled from the selected parts.
    #[must_use]
    pub const fn selected_value(&self) -> Option<PickerValue> {
        self.selected_value
    }

    #[must_use]
    pub const fn hovered_date(&self) -> Option<NaiveDate> {
        self.hovered_date
    }

    #[must_use]
    pub const fn active_grid(&self) -> Grid {
        self.active_grid
    }

    /// The same state with the day cursor pulled back inside `ctx.bounds`.
    ///
    /// Used when a host changes bounds on a live picker. Selection is left alone.
    #[must_use]
    pub fn reclamped(&self, ctx: &PickerContext) -> Self {
        Self {
            focused_date: ctx.bounds.clamp(self.focused_date),
            ..*self
        }
    }

    /// Whether every field the mode requires has been selected.
    #[must_use]
    pub const fn is_complete(&self, mode: Mode) -> bool {
        match mode {
            Mode::Date => self.selected_date.is_some(),
            Mode::DateTime => {
                self.selected_date.is_some()
                    && self.selected_hour.is_some()
                    && self.selected_minute.is_some()
            }
        }
    }

    fn recompute(&mut self, mode: Mode) {
        self.selected_value = self
            .selected_date
            .map(|d| PickerValue::compose(mode, d, self.selected_hour, self.selected_minute));
    }

    fn clear_selection(&mut self) {
        self.selected_date = None;
        self.selected_hour = None;
        self.selected_minute = None;
        self.selected_value = None;
    }

    fn close(&mut self) {
        self.is_open = false;
    }
}

/// Every transition the picker understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    Open,
    Close,
    Toggle,
    /// Move the day cursor; the date is clamped into bounds.
    FocusDate(NaiveDate),
    /// Select a day; out-of-bounds dates are ignored.
    SelectDate(NaiveDate),
    FocusHour(u8),
    FocusMinute(u8),
    SelectHour(u8),
    SelectMinute(u8),
    HoverDate(Option<NaiveDate>),
    /// Drop the pending selection but stay open.
    Clear,
    /// Accept the pending selection (OK).
    Commit,
    /// Roll back to the committed value and close.
    Cancel,
    /// Clear, close, and report an empty value to the caller.
    ClearAndClose,
    /// Hand the keyboard cursor to another grid.
    FocusGrid(Grid),
}

impl PickerAction {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Toggle => "toggle",
            Self::FocusDate(_) => "focus_date",
            Self::SelectDate(_) => "select_date",
            Self::FocusHour(_) => "focus_hour",
            Self::FocusMinute(_) => "focus_minute",
            Self::SelectHour(_) => "select_hour",
            Self::SelectMinute(_) => "select_minute",
            Self::HoverDate(_) => "hover_date",
            Self::Clear => "clear",
            Self::Commit => "commit",
            Self::Cancel => "cancel",
            Self::ClearAndClose => "clear_and_close",
            Self::FocusGrid(_) => "focus_grid",
        }
    }

    /// Actions that stay available on a disabled or closed picker.
    const fn always_available(&self) -> bool {
        matches!(self, Self::Close | Self::Cancel)
    }
}

/// Compute the state after `action`. Total: unusable actions return `state` unchanged.
#[must_use]
pub fn reduce(ctx: &PickerContext, state: &PickerState, action: &PickerAction) -> PickerState {
    let mut next = *state;
    if ctx.disabled && !action.always_available() {
        return next;
    }
    let opens = matches!(action, PickerAction::Open | PickerAction::Toggle);
    if !state.is_open && !opens && !action.always_available() {
        return next;
    }
    let has_time = ctx.mode.has_time();

    match *action {
        PickerAction::Open => open(&mut next),
        PickerAction::Close => next.close(),
        PickerAction::Toggle => {
            if next.is_open {
                next.close();
            } else {
                open(&mut next);
            }
        }
        PickerAction::FocusDate(date) => {
            next.focused_date = ctx.bounds.clamp(date);
            next.active_grid = Grid::Day;
        }
        PickerAction::SelectDate(date) => {
            if ctx.bounds.contains(date) {
                next.selected_date = Some(date);
                next.focused_date = date;
                next.active_grid = Grid::Day;
                next.recompute(ctx.mode);
            }
        }
        PickerAction::FocusHour(hour) if has_time => {
            next.focused_hour = Some(hour.min(LAST_HOUR));
            next.active_grid = Grid::Hour;
        }
        PickerAction::FocusMinute(minute) if has_time => {
            next.focused_minute = Some(snap_minute(minute));
            next.active_grid = Grid::Minute;
        }
        PickerAction::SelectHour(hour) if has_time && hour <= LAST_HOUR => {
            next.selected_hour = Some(hour);
            next.focused_hour = Some(hour);
            next.active_grid = Grid::Hour;
            next.recompute(ctx.mode);
        }
        PickerAction::SelectMinute(minute) if has_time && minute <= MAX_MINUTE => {
            next.selected_minute = Some(minute);
            next.focused_minute = Some(snap_minute(minute));
            next.active_grid = Grid::Minute;
            next.recompute(ctx.mode);
        }
        PickerAction::FocusHour(_)
        | PickerAction::FocusMinute(_)
        | PickerAction::SelectHour(_)
        | PickerAction::SelectMinute(_) => {}
        PickerAction::HoverDate(date) => next.hovered_date = date,
        PickerAction::Clear => next.clear_selection(),
        PickerAction::Commit => next.close(),
        PickerAction::Cancel => {
            next = PickerState::seeded(ctx);
        }
        PickerAction::ClearAndClose => {
            if ctx.clearable {
                next.clear_selection();
                next.close();
            }
        }
        PickerAction::FocusGrid(grid) => match grid {
            Grid::Day => next.active_grid = Grid::Day,
            Grid::Hour if has_time => {
                next.focused_hour.get_or_insert(0);
                next.active_grid = Grid::Hour;
            }
            Grid::Minute if has_time => {
                next.focused_minute.get_or_insert(0);
                next.active_grid = Grid::Minute;
            }
            Grid::Hour | Grid::Minute => {}
        },
    }
    next
}

fn open(state: &mut PickerState) {
    state.is_open = true;
    state.active_grid = Grid::Day;
}
