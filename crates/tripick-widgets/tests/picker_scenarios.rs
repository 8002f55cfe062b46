//! End-to-end picker scenarios driven through the public controller.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tripick_core::event::KeyCode;
use tripick_widgets::date_picker::{
    Bounds, CellFlags, DateTimePicker, FocusTarget, Grid, Mode, PickerInput, PickerOptions,
    PickerResponse, PickerValue,
};

type Calls = Rc<RefCell<Vec<Option<PickerValue>>>>;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn build(options: PickerOptions) -> (DateTimePicker, Calls) {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let picker = DateTimePicker::new(options).on_change(move |v| sink.borrow_mut().push(v));
    (picker, calls)
}

fn trip_options() -> PickerOptions {
    PickerOptions::new(Mode::DateTime, ymd(2025, 6, 1))
        .with_bounds(Bounds::new(Some(ymd(2025, 6, 7)), Some(ymd(2025, 8, 7))).unwrap())
        .with_value(Some("2025-06-07T09:10".parse().unwrap()))
}

struct Clock(Instant);

impl Clock {
    fn new() -> Self {
        Self(Instant::now())
    }

    fn at(&self, ms: u64) -> Instant {
        self.0 + Duration::from_millis(ms)
    }
}

// ============================================================================
// Full flow
// ============================================================================

#[test]
fn trip_departure_end_to_end() {
    let (mut picker, calls) = build(trip_options());
    let clock = Clock::new();
    let t = clock.at(0);

    picker.handle_input(&PickerInput::Trigger, t);
    assert!(picker.state().is_open());
    assert_eq!(picker.state().focused_date(), ymd(2025, 6, 7));

    for _ in 0..3 {
        picker.handle_key(&KeyCode::Right.into(), t);
    }
    assert_eq!(picker.state().focused_date(), ymd(2025, 6, 10));
    assert_eq!(picker.announcement(), Some("Tuesday, June 10, 2025"));

    picker.handle_input(&PickerInput::ClickDay(ymd(2025, 6, 10)), t);
    assert_eq!(picker.state().selected_date(), Some(ymd(2025, 6, 10)));
    assert_eq!(
        picker.state().selected_value(),
        Some(PickerValue::at(ymd(2025, 6, 10), 9, 10))
    );

    picker.handle_input(&PickerInput::ClickHour(14), t);
    picker.handle_input(&PickerInput::ClickMinute(30), t);
    let expected = PickerValue::at(ymd(2025, 6, 10), 14, 30);
    assert_eq!(picker.state().selected_value(), Some(expected));

    let response = picker.handle_input(&PickerInput::Ok, t);
    assert_eq!(response, PickerResponse::Changed(Some(expected)));
    assert_eq!(*calls.borrow(), vec![Some(expected)]);
    assert_eq!(picker.committed(), Some(expected));
    assert!(!picker.state().is_open());
    assert_eq!(expected.to_string(), "2025-06-10T14:30");
}

#[test]
fn commit_then_reopen_round_trips() {
    let (mut picker, calls) = build(trip_options());
    let t = Instant::now();
    picker.handle_input(&PickerInput::Trigger, t);
    picker.handle_input(&PickerInput::ClickDay(ymd(2025, 7, 2)), t);
    picker.handle_input(&PickerInput::ClickHour(18), t);
    picker.handle_input(&PickerInput::ClickMinute(45), t);
    picker.handle_input(&PickerInput::Ok, t);

    picker.handle_input(&PickerInput::Trigger, t);
    let s = picker.state();
    assert_eq!(s.selected_date(), Some(ymd(2025, 7, 2)));
    assert_eq!(s.selected_hour(), Some(18));
    assert_eq!(s.selected_minute(), Some(45));

    // A later cancel rolls back to the new committed value, not the original.
    picker.handle_input(&PickerInput::ClickDay(ymd(2025, 7, 20)), t);
    picker.handle_input(&PickerInput::Cancel, t);
    assert_eq!(picker.state().selected_date(), Some(ymd(2025, 7, 2)));
    assert_eq!(calls.borrow().len(), 1);
}

// ============================================================================
// Numeric jump
// ============================================================================

fn on_hour_grid() -> (DateTimePicker, Clock) {
    let (mut picker, _) = build(trip_options());
    let clock = Clock::new();
    picker.handle_input(&PickerInput::Trigger, clock.at(0));
    picker.handle_key(&KeyCode::Tab.into(), clock.at(0));
    assert_eq!(picker.state().active_grid(), Grid::Hour);
    (picker, clock)
}

#[test]
fn hour_jump_one_five() {
    let (mut picker, clock) = on_hour_grid();
    picker.handle_key(&KeyCode::Char('1').into(), clock.at(10));
    picker.handle_key(&KeyCode::Char('5').into(), clock.at(500));
    assert_eq!(picker.focus(), FocusTarget::Hour(15));
    assert_eq!(picker.announcement(), Some("Hour 15"));
    assert_eq!(picker.state().selected_hour(), Some(9));
}

#[test]
fn hour_jump_nine_nine() {
    let (mut picker, clock) = on_hour_grid();
    picker.handle_key(&KeyCode::Char('9').into(), clock.at(10));
    picker.handle_key(&KeyCode::Char('9').into(), clock.at(500));
    assert_eq!(picker.focus(), FocusTarget::Hour(9));
}

#[test]
fn hour_jump_split_by_timeout() {
    let (mut picker, clock) = on_hour_grid();
    picker.handle_key(&KeyCode::Char('1').into(), clock.at(10));
    assert_eq!(picker.focus(), FocusTarget::Hour(1));

    assert!(picker.tick(clock.at(1010)));
    picker.handle_key(&KeyCode::Char('5').into(), clock.at(1200));
    assert_eq!(picker.focus(), FocusTarget::Hour(5));
}

#[test]
fn minute_jump_three_seven_rounds_to_thirty_five() {
    let (mut picker, clock) = on_hour_grid();
    picker.handle_key(&KeyCode::Right.into(), clock.at(10));
    picker.handle_key(&KeyCode::Char('3').into(), clock.at(20));
    picker.handle_key(&KeyCode::Char('7').into(), clock.at(300));
    assert_eq!(picker.focus(), FocusTarget::Minute(35));

    picker.handle_key(&KeyCode::Enter.into(), clock.at(400));
    assert_eq!(picker.state().selected_minute(), Some(35));
}

// ============================================================================
// Cross-grid navigation
// ============================================================================

#[test]
fn right_and_left_remember_cursors() {
    let (mut picker, clock) = on_hour_grid();
    let t = clock.at(0);
    picker.handle_key(&KeyCode::Down.into(), t);
    picker.handle_key(&KeyCode::Down.into(), t);
    assert_eq!(picker.focus(), FocusTarget::Hour(11));

    picker.handle_key(&KeyCode::Right.into(), t);
    assert_eq!(picker.focus(), FocusTarget::Minute(10));
    picker.handle_key(&KeyCode::Up.into(), t);
    assert_eq!(picker.focus(), FocusTarget::Minute(5));

    picker.handle_key(&KeyCode::Left.into(), t);
    assert_eq!(picker.focus(), FocusTarget::Hour(11));
    picker.handle_key(&KeyCode::Right.into(), t);
    assert_eq!(picker.focus(), FocusTarget::Minute(5));
}

#[test]
fn right_without_minute_focuses_first_cell() {
    let (mut picker, _) = build(PickerOptions::new(Mode::DateTime, ymd(2025, 6, 1)));
    let t = Instant::now();
    picker.handle_input(&PickerInput::Trigger, t);
    picker.handle_key(&KeyCode::Tab.into(), t);
    picker.handle_key(&KeyCode::Right.into(), t);
    assert_eq!(picker.focus(), FocusTarget::Minute(0));
}

// ============================================================================
// Clear
// ============================================================================

#[test]
fn clear_keeps_open_and_silent() {
    let (mut picker, calls) = build(trip_options().clearable(true));
    let t = Instant::now();
    picker.handle_input(&PickerInput::Trigger, t);
    assert_eq!(
        picker.dispatch(tripick_widgets::date_picker::PickerAction::Clear, t),
        PickerResponse::Updated
    );
    let s = picker.state();
    assert!(s.is_open());
    assert_eq!(s.selected_date(), None);
    assert_eq!(s.selected_hour(), None);
    assert_eq!(s.selected_minute(), None);
    assert_eq!(s.selected_value(), None);
    assert!(calls.borrow().is_empty());
    assert!(!picker.view().can_commit);
}

#[test]
fn clear_and_close_emits_none_once() {
    let (mut picker, calls) = build(trip_options().clearable(true));
    let t = Instant::now();
    picker.handle_input(&PickerInput::Trigger, t);
    picker.handle_input(&PickerInput::Clear, t);
    picker.handle_input(&PickerInput::Clear, t);
    assert!(!picker.state().is_open());
    assert_eq!(*calls.borrow(), vec![None]);
}

// ============================================================================
// Bounds and view
// ============================================================================

#[test]
fn clicks_outside_bounds_do_nothing() {
    let (mut picker, _) = build(trip_options());
    let t = Instant::now();
    picker.handle_input(&PickerInput::Trigger, t);
    assert!(
        picker
            .handle_input(&PickerInput::ClickDay(ymd(2025, 6, 6)), t)
            .is_ignored()
    );
    let view = picker.view();
    let cell = view.day(ymd(2025, 6, 6)).unwrap();
    assert!(cell.flags.contains(CellFlags::DISABLED));
}

#[test]
fn paging_past_max_stops_at_max() {
    let (mut picker, _) = build(trip_options());
    let t = Instant::now();
    picker.handle_input(&PickerInput::Trigger, t);
    for _ in 0..5 {
        picker.handle_key(&KeyCode::PageDown.into(), t);
    }
    assert_eq!(picker.state().focused_date(), ymd(2025, 8, 7));
    assert_eq!(picker.view().month.to_string(), "August 2025");
}

#[test]
fn hover_marks_cell_without_announcing() {
    let (mut picker, _) = build(trip_options());
    let t = Instant::now();
    picker.handle_input(&PickerInput::Trigger, t);
    picker.handle_input(&PickerInput::HoverDay(Some(ymd(2025, 6, 12))), t);
    assert_eq!(picker.announcement(), None);
    let view = picker.view();
    assert!(
        view.day(ymd(2025, 6, 12))
            .unwrap()
            .flags
            .contains(CellFlags::HOVERED)
    );
}
