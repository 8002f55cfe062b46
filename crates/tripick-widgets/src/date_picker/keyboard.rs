#![forbid(unsafe_code)]

//! Key-to-action routing for the three picker grids.
//!
//! | Grid   | Keys                                                              |
//! |--------|-------------------------------------------------------------------|
//! | Day    | Left/Right ±1 day, Up/Down ±7, PageUp/PageDown ±1 month (Shift: year), Home/End week start/end, Enter/Space select |
//! | Hour   | Up/Down ±1, PageUp/PageDown ±5, Home/End 0/23, Right to minutes, digits jump, Enter/Space select |
//! | Minute | Up/Down ±5 min, PageUp/PageDown ±25 min, Home/End 0/55, Left to hours, digits jump, Enter/Space select |
//!
//! Escape cancels from any grid; Tab and Shift+Tab cycle grids in DateTime
//! mode. While the picker is closed only Enter, Space, and Down (opening it)
//! are routed. The router reads state and returns an action; it never mutates
//! picker state itself.

use std::time::{Duration, Instant};

use tripick_core::event::{KeyCode, KeyEvent};
use tripick_core::timer::next_due;

use super::jump_buffer::{DEFAULT_JUMP_TIMEOUT, JumpField, NumericJumpBuffer};
use super::month_grid::{end_of_week, shift_days, shift_months, start_of_week};
use super::state::{Grid, PickerAction, PickerContext, PickerState};
use super::time_grid::{LAST_HOUR, LAST_MINUTE_CELL, step_hour, step_minute};

const HOUR_PAGE: i16 = 5;
const MINUTE_PAGE: i16 = 5;

/// Routes key events to [`PickerAction`]s and owns the per-grid jump buffers.
#[derive(Debug, Clone)]
pub struct KeyboardRouter {
    hour: NumericJumpBuffer,
    minute: NumericJumpBuffer,
}

impl Default for KeyboardRouter {
    fn default() -> Self {
        Self::new(DEFAULT_JUMP_TIMEOUT)
    }
}

impl KeyboardRouter {
    /// Create a router whose jump buffers combine digits within `jump_timeout`.
    #[must_use]
    pub fn new(jump_timeout: Duration) -> Self {
        Self {
            hour: NumericJumpBuffer::new(JumpField::Hour, jump_timeout),
            minute: NumericJumpBuffer::new(JumpField::Minute, jump_timeout),
        }
    }

    /// Translate one key event into an action, if it means anything here.
    pub fn route(
        &mut self,
        key: &KeyEvent,
        state: &PickerState,
        ctx: &PickerContext,
        now: Instant,
    ) -> Option<PickerAction> {
        if !key.is_press() {
            return None;
        }
        if ctx.disabled {
            return (state.is_open() && key.code == KeyCode::Escape).then_some(PickerAction::Cancel);
        }
        if !state.is_open() {
            let opens = key.is_activate() || key.code == KeyCode::Down;
            return (opens && !key.ctrl() && !key.alt()).then_some(PickerAction::Open);
        }
        if key.ctrl() || key.alt() {
            self.reset();
            return None;
        }

        match key.code {
            KeyCode::Escape => return Some(PickerAction::Cancel),
            KeyCode::BackTab => {
                return self.switch_grid(state.active_grid().prev(ctx.mode), state);
            }
            // Some hosts report Shift+Tab as Tab with SHIFT rather than BackTab.
            KeyCode::Tab if key.shift() => {
                return self.switch_grid(state.active_grid().prev(ctx.mode), state);
            }
            KeyCode::Tab => return self.switch_grid(state.active_grid().next(ctx.mode), state),
            _ => {}
        }

        match state.active_grid() {
            Grid::Day => {
                self.reset();
                route_day(key, state)
            }
            Grid::Hour => self.route_hour(key, state, now),
            Grid::Minute => self.route_minute(key, state, now),
        }
    }

    /// Drop pending digits in both buffers.
    pub fn reset(&mut self) {
        self.hour.reset();
        self.minute.reset();
    }

    /// Expire jump buffers whose window has elapsed. Returns `true` if any did.
    pub fn tick(&mut self, now: Instant) -> bool {
        let hour = self.hour.check_timeout(now);
        let minute = self.minute.check_timeout(now);
        hour || minute
    }

    /// Earliest pending buffer expiry.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        next_due([self.hour.deadline(), self.minute.deadline()])
    }

    /// The buffer serving `field`.
    #[must_use]
    pub fn buffer(&self, field: JumpField) -> &NumericJumpBuffer {
        match field {
            JumpField::Hour => &self.hour,
            JumpField::Minute => &self.minute,
        }
    }

    /// Change the digit-combining window for both buffers.
    pub fn set_jump_timeout(&mut self, timeout: Duration) {
        self.hour.set_timeout(timeout);
        self.minute.set_timeout(timeout);
    }

    fn switch_grid(&mut self, target: Grid, state: &PickerState) -> Option<PickerAction> {
        self.reset();
        (target != state.active_grid()).then_some(PickerAction::FocusGrid(target))
    }

    fn route_hour(
        &mut self,
        key: &KeyEvent,
        state: &PickerState,
        now: Instant,
    ) -> Option<PickerAction> {
        if let Some(digit) = key.digit() {
            self.minute.reset();
            return Some(PickerAction::FocusHour(self.hour.push_digit(digit, now)));
        }
        self.reset();

        let cursor = state.focused_hour().unwrap_or(0);
        let action = match key.code {
            KeyCode::Up => PickerAction::FocusHour(step_hour(cursor, -1)),
            KeyCode::Down => PickerAction::FocusHour(step_hour(cursor, 1)),
            KeyCode::PageUp => PickerAction::FocusHour(step_hour(cursor, -HOUR_PAGE)),
            KeyCode::PageDown => PickerAction::FocusHour(step_hour(cursor, HOUR_PAGE)),
            KeyCode::Home => PickerAction::FocusHour(0),
            KeyCode::End => PickerAction::FocusHour(LAST_HOUR),
            KeyCode::Right => PickerAction::FocusGrid(Grid::Minute),
            _ if key.is_activate() => PickerAction::SelectHour(cursor),
            _ => return None,
        };
        Some(action)
    }

    fn route_minute(
        &mut self,
        key: &KeyEvent,
        state: &PickerState,
        now: Instant,
    ) -> Option<PickerAction> {
        if let Some(digit) = key.digit() {
            self.hour.reset();
            return Some(PickerAction::FocusMinute(self.minute.push_digit(digit, now)));
        }
        self.reset();

        let cursor = state.focused_minute().unwrap_or(0);
        let action = match key.code {
            KeyCode::Up => PickerAction::FocusMinute(step_minute(cursor, -1)),
            KeyCode::Down => PickerAction::FocusMinute(step_minute(cursor, 1)),
            KeyCode::PageUp => PickerAction::FocusMinute(step_minute(cursor, -MINUTE_PAGE)),
            KeyCode::PageDown => PickerAction::FocusMinute(step_minute(cursor, MINUTE_PAGE)),
            KeyCode::Home => PickerAction::FocusMinute(0),
            KeyCode::End => PickerAction::FocusMinute(LAST_MINUTE_CELL),
            KeyCode::Left => PickerAction::FocusGrid(Grid::Hour),
            _ if key.is_activate() => PickerAction::SelectMinute(cursor),
            _ => return None,
        };
        Some(action)
    }
}

fn route_day(key: &KeyEvent, state: &PickerState) -> Option<PickerAction> {
    let focused = state.focused_date();
    let months = if key.shift() { 12 } else { 1 };
    let target = match key.code {
        KeyCode::Right => shift_days(focused, 1),
        KeyCode::Left => shift_days(focused, -1),
        KeyCode::Down => shift_days(focused, 7),
        KeyCode::Up => shift_days(focused, -7),
        KeyCode::PageUp => shift_months(focused, -months),
        KeyCode::PageDown => shift_months(focused, months),
        KeyCode::Home => start_of_week(focused),
        KeyCode::End => end_of_week(focused),
        _ if key.is_activate() => return Some(PickerAction::SelectDate(focused)),
        _ => return None,
    };
    Some(PickerAction::FocusDate(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_picker::range::Bounds;
    use crate::date_picker::state::reduce;
    use crate::date_picker::value::{Mode, PickerValue};
    use chrono::NaiveDate;
    use tripick_core::event::{KeyEventKind, Modifiers};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Rig {
        ctx: PickerContext,
        state: PickerState,
        router: KeyboardRouter,
        t0: Instant,
    }

    impl Rig {
        fn new(ctx: PickerContext) -> Self {
            let state = reduce(&ctx, &PickerState::seeded(&ctx), &PickerAction::Open);
            Self {
                ctx,
                state,
                router: KeyboardRouter::default(),
                t0: Instant::now(),
            }
        }

        fn datetime() -> Self {
            Self::new(PickerContext {
                committed: Some(PickerValue::at(ymd(2025, 6, 10), 9, 10)),
                ..PickerContext::new(Mode::DateTime, ymd(2025, 6, 1))
            })
        }

        fn press_at(&mut self, key: impl Into<KeyEvent>, ms: u64) -> Option<PickerAction> {
            let now = self.t0 + Duration::from_millis(ms);
            let action = self.router.route(&key.into(), &self.state, &self.ctx, now);
            if let Some(action) = action {
                self.state = reduce(&self.ctx, &self.state, &action);
            }
            action
        }

        fn press(&mut self, key: impl Into<KeyEvent>) -> Option<PickerAction> {
            self.press_at(key, 0)
        }
    }

    #[test]
    fn arrows_move_day_cursor() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::Right);
        assert_eq!(rig.state.focused_date(), ymd(2025, 6, 11));
        rig.press(KeyCode::Down);
        assert_eq!(rig.state.focused_date(), ymd(2025, 6, 18));
        rig.press(KeyCode::Up);
        rig.press(KeyCode::Left);
        assert_eq!(rig.state.focused_date(), ymd(2025, 6, 10));
    }

    #[test]
    fn paging_moves_by_month_and_year() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::PageDown);
        assert_eq!(rig.state.focused_date(), ymd(2025, 7, 10));
        rig.press(KeyEvent::new(KeyCode::PageUp).with_modifiers(Modifiers::SHIFT));
        assert_eq!(rig.state.focused_date(), ymd(2024, 7, 10));
    }

    #[test]
    fn home_end_span_the_week() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::Home);
        assert_eq!(rig.state.focused_date(), ymd(2025, 6, 9));
        rig.press(KeyCode::End);
        assert_eq!(rig.state.focused_date(), ymd(2025, 6, 15));
    }

    #[test]
    fn day_navigation_is_clamped() {
        let mut rig = Rig::new(PickerContext {
            bounds: Bounds::new(Some(ymd(2025, 6, 7)), Some(ymd(2025, 6, 12))).unwrap(),
            ..PickerContext::new(Mode::Date, ymd(2025, 6, 10))
        });
        rig.press(KeyCode::PageDown);
        assert_eq!(rig.state.focused_date(), ymd(2025, 6, 12));
        rig.press(KeyCode::Up);
        assert_eq!(rig.state.focused_date(), ymd(2025, 6, 7));
    }

    #[test]
    fn space_selects_focused_day() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::Right);
        assert_eq!(
            rig.press(KeyCode::Char(' ')),
            Some(PickerAction::SelectDate(ymd(2025, 6, 11)))
        );
        assert_eq!(rig.state.selected_date(), Some(ymd(2025, 6, 11)));
    }

    #[test]
    fn hour_jump_combines_digits() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::Tab);
        assert_eq!(rig.state.active_grid(), Grid::Hour);
        rig.press_at(KeyCode::Char('1'), 0);
        assert_eq!(rig.state.focused_hour(), Some(1));
        rig.press_at(KeyCode::Char('5'), 400);
        assert_eq!(rig.state.focused_hour(), Some(15));
        // focus only
        assert_eq!(rig.state.selected_hour(), Some(9));
    }

    #[test]
    fn hour_jump_restarts_on_overflow_and_timeout() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::Tab);
        rig.press_at(KeyCode::Char('9'), 0);
        rig.press_at(KeyCode::Char('9'), 100);
        assert_eq!(rig.state.focused_hour(), Some(9));

        rig.press_at(KeyCode::Char('1'), 3000);
        rig.press_at(KeyCode::Char('5'), 4500);
        assert_eq!(rig.state.focused_hour(), Some(5));
    }

    #[test]
    fn non_digit_key_resets_buffer() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::Tab);
        rig.press_at(KeyCode::Char('1'), 0);
        rig.press_at(KeyCode::Down, 100);
        assert!(!rig.router.buffer(JumpField::Hour).is_pending());
        assert_eq!(rig.state.focused_hour(), Some(2));
        rig.press_at(KeyCode::Char('5'), 200);
        assert_eq!(rig.state.focused_hour(), Some(5));
    }

    #[test]
    fn minute_jump_rounds() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::Tab);
        rig.press(KeyCode::Tab);
        assert_eq!(rig.state.active_grid(), Grid::Minute);
        rig.press_at(KeyCode::Char('3'), 0);
        rig.press_at(KeyCode::Char('7'), 300);
        assert_eq!(rig.state.focused_minute(), Some(35));
    }

    #[test]
    fn hour_keys_step_and_clamp() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::Tab);
        rig.press(KeyCode::PageDown);
        assert_eq!(rig.state.focused_hour(), Some(14));
        rig.press(KeyCode::End);
        rig.press(KeyCode::Down);
        assert_eq!(rig.state.focused_hour(), Some(23));
        rig.press(KeyCode::Home);
        rig.press(KeyCode::Up);
        assert_eq!(rig.state.focused_hour(), Some(0));
        rig.press(KeyCode::Enter);
        assert_eq!(rig.state.selected_hour(), Some(0));
    }

    #[test]
    fn minute_keys_step_on_grid() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::BackTab);
        assert_eq!(rig.state.active_grid(), Grid::Minute);
        rig.press(KeyCode::Down);
        assert_eq!(rig.state.focused_minute(), Some(15));
        rig.press(KeyCode::PageDown);
        assert_eq!(rig.state.focused_minute(), Some(40));
        rig.press(KeyCode::End);
        assert_eq!(rig.state.focused_minute(), Some(55));
        rig.press(KeyCode::Char(' '));
        assert_eq!(rig.state.selected_minute(), Some(55));
    }

    #[test]
    fn shifted_tab_cycles_backwards() {
        let mut rig = Rig::datetime();
        let shift_tab = KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        assert_eq!(rig.press(shift_tab), Some(PickerAction::FocusGrid(Grid::Minute)));
        assert_eq!(rig.state.active_grid(), Grid::Minute);
        rig.press(shift_tab);
        assert_eq!(rig.state.active_grid(), Grid::Hour);
        rig.press(shift_tab);
        assert_eq!(rig.state.active_grid(), Grid::Day);
        rig.press(KeyCode::Tab);
        assert_eq!(rig.state.active_grid(), Grid::Hour);
    }

    #[test]
    fn parsed_shift_tab_matches_back_tab() {
        let mut forward = Rig::datetime();
        let mut parsed = Rig::datetime();
        forward.press(KeyCode::BackTab);
        parsed.press("Shift+Tab".parse::<KeyEvent>().unwrap());
        assert_eq!(parsed.state.active_grid(), forward.state.active_grid());
    }

    #[test]
    fn cross_grid_keeps_cursors() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::Tab);
        rig.press(KeyCode::Down);
        rig.press(KeyCode::Right);
        assert_eq!(rig.state.active_grid(), Grid::Minute);
        assert_eq!(rig.state.focused_minute(), Some(10));
        rig.press(KeyCode::Down);
        rig.press(KeyCode::Left);
        assert_eq!(rig.state.active_grid(), Grid::Hour);
        assert_eq!(rig.state.focused_hour(), Some(10));
        rig.press(KeyCode::Right);
        assert_eq!(rig.state.focused_minute(), Some(15));
    }

    #[test]
    fn right_from_hour_with_no_minute_focuses_first_cell() {
        let mut rig = Rig::new(PickerContext::new(Mode::DateTime, ymd(2025, 6, 1)));
        rig.press(KeyCode::Tab);
        assert_eq!(rig.state.focused_hour(), Some(0));
        rig.press(KeyCode::Right);
        assert_eq!(rig.state.focused_minute(), Some(0));
    }

    #[test]
    fn escape_cancels() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::Right);
        rig.press(KeyCode::Enter);
        assert_eq!(rig.press(KeyCode::Escape), Some(PickerAction::Cancel));
        assert!(!rig.state.is_open());
        assert_eq!(rig.state.selected_date(), Some(ymd(2025, 6, 10)));
    }

    #[test]
    fn closed_picker_only_opens() {
        let ctx = PickerContext::new(Mode::Date, ymd(2025, 6, 1));
        let state = PickerState::seeded(&ctx);
        let mut router = KeyboardRouter::default();
        let now = Instant::now();
        let route = |router: &mut KeyboardRouter, key: KeyEvent| router.route(&key, &state, &ctx, now);

        assert_eq!(route(&mut router, KeyCode::Right.into()), None);
        assert_eq!(route(&mut router, KeyCode::Down.into()), Some(PickerAction::Open));
        assert_eq!(route(&mut router, KeyCode::Enter.into()), Some(PickerAction::Open));
        assert_eq!(
            route(&mut router, KeyCode::Char(' ').into()),
            Some(PickerAction::Open)
        );
    }

    #[test]
    fn releases_and_chords_are_ignored() {
        let mut rig = Rig::datetime();
        let release = KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Release);
        assert_eq!(rig.press(release), None);
        let chord = KeyEvent::new(KeyCode::Right).with_modifiers(Modifiers::CTRL);
        assert_eq!(rig.press(chord), None);
        assert_eq!(rig.state.focused_date(), ymd(2025, 6, 10));
    }

    #[test]
    fn tab_is_inert_in_date_mode() {
        let mut rig = Rig::new(PickerContext::new(Mode::Date, ymd(2025, 6, 1)));
        assert_eq!(rig.press(KeyCode::Tab), None);
        assert_eq!(rig.press(KeyCode::Char('4')), None);
    }

    #[test]
    fn disabled_picker_routes_only_escape() {
        let mut rig = Rig::datetime();
        rig.ctx.disabled = true;
        assert_eq!(rig.press(KeyCode::Right), None);
        assert_eq!(rig.press(KeyCode::Escape), Some(PickerAction::Cancel));
    }

    #[test]
    fn tick_expires_buffers() {
        let mut rig = Rig::datetime();
        rig.press(KeyCode::Tab);
        rig.press_at(KeyCode::Char('2'), 0);
        let due = rig.router.next_deadline().unwrap();
        assert_eq!(due, rig.t0 + DEFAULT_JUMP_TIMEOUT);
        assert!(!rig.router.tick(rig.t0 + Duration::from_millis(999)));
        assert!(rig.router.tick(due));
        assert_eq!(rig.router.next_deadline(), None);
    }
}
