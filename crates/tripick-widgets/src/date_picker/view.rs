#![forbid(unsafe_code)]

//! Read-only snapshot a host renders.
//!
//! A [`PickerView`] is rebuilt from the context and state after every input; it
//! carries no behavior. Exactly one cell in the whole view has
//! [`CellFlags::FOCUSED`], matching [`PickerView::focus`].

use bitflags::bitflags;
use chrono::NaiveDate;

use super::month_grid::{GridCell, MonthGrid, WEEK_HEADER, YearMonth};
use super::state::{Grid, PickerContext, PickerState};
use super::time_grid::{HOURS, MINUTES};
use super::value::{Mode, PickerValue};

bitflags! {
    /// Per-cell rendering state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Outside the picker's bounds; not selectable.
        const DISABLED = 1 << 0;
        const SELECTED = 1 << 1;
        /// Holds the keyboard focus cursor.
        const FOCUSED  = 1 << 2;
        const TODAY    = 1 << 3;
        const HOVERED  = 1 << 4;
    }
}

/// The single element assistive technology should track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    Day(NaiveDate),
    Hour(u8),
    Minute(u8),
}

impl FocusTarget {
    /// Focus target for `state`; an unset time cursor reads as 0.
    #[must_use]
    pub fn of(state: &PickerState) -> Self {
        match state.active_grid() {
            Grid::Day => Self::Day(state.focused_date()),
            Grid::Hour => Self::Hour(state.focused_hour().unwrap_or(0)),
            Grid::Minute => Self::Minute(state.focused_minute().unwrap_or(0)),
        }
    }

    /// Stable element id, e.g. `day-2025-06-10`, `hour-14`, `minute-30`.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Day(date) => format!("day-{date}"),
            Self::Hour(hour) => format!("hour-{hour}"),
            Self::Minute(minute) => format!("minute-{minute}"),
        }
    }
}

/// One slot in the month grid. Blank slots have no date and no flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub flags: CellFlags,
}

/// One hour or minute cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCell {
    pub value: u8,
    pub flags: CellFlags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView {
    pub is_open: bool,
    pub mode: Mode,
    /// Month containing the focused date.
    pub month: YearMonth,
    pub week_header: [&'static str; 7],
    pub weeks: Vec<[DayCell; 7]>,
    /// Empty in Date mode.
    pub hours: Vec<TimeCell>,
    /// Empty in Date mode.
    pub minutes: Vec<TimeCell>,
    pub focus: FocusTarget,
    pub announcement: Option<String>,
    /// Pending value; what OK would emit when complete.
    pub pending: Option<PickerValue>,
    pub committed: Option<PickerValue>,
    /// OK would emit a value.
    pub can_commit: bool,
    /// The Clear button is shown and usable.
    pub can_clear: bool,
    pub disabled: bool,
}

impl PickerView {
    #[must_use]
    pub fn build(ctx: &PickerContext, state: &PickerState, announcement: Option<&str>) -> Self {
        let focus = FocusTarget::of(state);
        let grid = MonthGrid::build(YearMonth::of(state.focused_date()));
        let weeks = grid
            .weeks()
            .into_iter()
            .map(|week| week.map(|cell| day_cell(ctx, state, focus, cell)))
            .collect();

        let (hours, minutes) = if ctx.mode.has_time() {
            let hours = HOURS
                .iter()
                .map(|&h| TimeCell {
                    value: h,
                    flags: time_flags(
                        state.selected_hour() == Some(h),
                        focus == FocusTarget::Hour(h),
                    ),
                })
                .collect();
            let minutes = MINUTES
                .iter()
                .map(|&m| TimeCell {
                    value: m,
                    flags: time_flags(
                        state.selected_minute() == Some(m),
                        focus == FocusTarget::Minute(m),
                    ),
                })
                .collect();
            (hours, minutes)
        } else {
            (Vec::new(), Vec::new())
        };

        let usable = state.is_open() && !ctx.disabled;
        Self {
            is_open: state.is_open(),
            mode: ctx.mode,
            month: grid.year_month(),
            week_header: WEEK_HEADER,
            weeks,
            hours,
            minutes,
            focus,
            announcement: announcement.map(str::to_owned),
            pending: state.selected_value(),
            committed: ctx.committed,
            can_commit: usable && state.is_complete(ctx.mode),
            can_clear: usable && ctx.clearable,
            disabled: ctx.disabled,
        }
    }

    /// The day cell for `date`, if it is in the rendered month.
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&DayCell> {
        self.weeks
            .iter()
            .flat_map(|week| week.iter())
            .find(|cell| cell.date == Some(date))
    }
}

fn day_cell(
    ctx: &PickerContext,
    state: &PickerState,
    focus: FocusTarget,
    cell: GridCell,
) -> DayCell {
    let Some(date) = cell.date() else {
        return DayCell {
            date: None,
            flags: CellFlags::empty(),
        };
    };
    let mut flags = CellFlags::empty();
    flags.set(CellFlags::DISABLED, !ctx.bounds.contains(date));
    flags.set(CellFlags::SELECTED, state.selected_date() == Some(date));
    flags.set(CellFlags::FOCUSED, focus == FocusTarget::Day(date));
    flags.set(CellFlags::TODAY, ctx.today == date);
    flags.set(CellFlags::HOVERED, state.hovered_date() == Some(date));
    DayCell {
        date: Some(date),
        flags,
    }
}

fn time_flags(selected: bool, focused: bool) -> CellFlags {
    let mut flags = CellFlags::empty();
    flags.set(CellFlags::SELECTED, selected);
    flags.set(CellFlags::FOCUSED, focused);
    flags
}
