#![forbid(unsafe_code)]

//! Calendar-and-clock picker engine.
//!
//! A picker keeps a *pending* selection (what the user is choosing) apart from
//! the *committed* value (what the caller last accepted). OK commits, Cancel
//! rolls back, Clear empties. Everything between is focus movement over three
//! grids: days of the focused month, hours `0..=23`, and minutes in steps of 5.
//!
//! The engine has no UI and no clock of its own. Hosts feed it inputs with an
//! [`Instant`], render [`PickerView`], and call [`DateTimePicker::tick`] until
//! [`DateTimePicker::next_deadline`] passes.
//!
//! # Usage
//!
//! ```
//! use std::time::Instant;
//! use chrono::NaiveDate;
//! use tripick_core::event::KeyCode;
//! use tripick_widgets::date_picker::{
//!     DateTimePicker, Mode, PickerInput, PickerOptions, PickerResponse, PickerValue,
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
//! let mut picker = DateTimePicker::new(PickerOptions::new(Mode::Date, today));
//! let now = Instant::now();
//!
//! picker.handle_input(&PickerInput::Trigger, now);
//! picker.handle_key(&KeyCode::Right.into(), now);
//! picker.handle_key(&KeyCode::Enter.into(), now);
//! let response = picker.handle_input(&PickerInput::Ok, now);
//!
//! let expected = PickerValue::Date(NaiveDate::from_ymd_opt(2025, 6, 11).unwrap());
//! assert_eq!(response, PickerResponse::Changed(Some(expected)));
//! assert_eq!(picker.committed(), Some(expected));
//! ```
//!
//! # Submodules
//!
//! - [`range`]: inclusive clamping and calendar bounds
//! - [`month_grid`]: month shape and calendar arithmetic
//! - [`time_grid`]: hour and minute cells
//! - [`jump_buffer`]: digit accumulator for type-to-focus
//! - [`state`]: pure reducer
//! - [`keyboard`]: key routing per grid
//! - [`announcer`]: live-region message with auto clear
//! - [`view`]: render snapshot

pub mod announcer;
pub mod config;
pub mod jump_buffer;
pub mod keyboard;
pub mod month_grid;
pub mod range;
pub mod state;
pub mod time_grid;
pub mod value;
pub mod view;

pub use announcer::LiveAnnouncer;
pub use config::{ConfigError, PickerConfig, PickerConfigParse, PickerOptions};
pub use jump_buffer::{JumpField, NumericJumpBuffer};
pub use keyboard::KeyboardRouter;
pub use month_grid::{GridCell, MonthGrid, YearMonth};
pub use range::{Bounds, BoundsError};
pub use state::{Grid, PickerAction, PickerContext, PickerState, reduce};
pub use value::{Mode, PickerValue, ValueParseError};
pub use view::{CellFlags, DayCell, FocusTarget, PickerView, TimeCell};

use std::fmt;
use std::time::Instant;

use chrono::NaiveDate;
use tripick_core::event::KeyEvent;

use announcer::describe_day;

// ---------------------------------------------------------------------------
// Inputs and outcomes
// ---------------------------------------------------------------------------

/// Raw interaction a host forwards to the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerInput {
    Key(KeyEvent),
    /// The field's trigger button was activated.
    Trigger,
    /// Pointer moved over a day (or left the grid).
    HoverDay(Option<NaiveDate>),
    ClickDay(NaiveDate),
    ClickHour(u8),
    ClickMinute(u8),
    /// OK button.
    Ok,
    /// Cancel button.
    Cancel,
    /// Clear button.
    Clear,
}

impl From<KeyEvent> for PickerInput {
    fn from(key: KeyEvent) -> Self {
        Self::Key(key)
    }
}

/// What an input did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerResponse {
    /// Nothing changed.
    Ignored,
    /// State changed; re-render.
    Updated,
    /// The caller's value changed; `on_change` was called with this value.
    Changed(Option<PickerValue>),
    /// OK on an incomplete selection. The picker closed and nothing was emitted.
    CommitIncomplete,
}

impl PickerResponse {
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }

    /// Whether the host should re-render.
    #[must_use]
    pub const fn needs_redraw(&self) -> bool {
        !self.is_ignored()
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

type ChangeCallback = Box<dyn FnMut(Option<PickerValue>)>;

/// One picker instance: reducer state plus its timers and caller callback.
pub struct DateTimePicker {
    ctx: PickerContext,
    state: PickerState,
    config: PickerConfig,
    router: KeyboardRouter,
    announcer: LiveAnnouncer,
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for DateTimePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimePicker")
            .field("ctx", &self.ctx)
            .field("state", &self.state)
            .field("config", &self.config)
            .field("announcement", &self.announcer.message())
            .finish_non_exhaustive()
    }
}

impl DateTimePicker {
    #[must_use]
    pub fn new(options: PickerOptions) -> Self {
        let ctx = options.context();
        Self {
            state: PickerState::seeded(&ctx),
            ctx,
            config: options.config,
            router: KeyboardRouter::new(options.config.jump_timeout),
            announcer: LiveAnnouncer::new(options.config.announce_clear_delay),
            on_change: None,
        }
    }

    /// Register the callback invoked on every successful commit or clear.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(Option<PickerValue>) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn set_on_change(&mut self, callback: impl FnMut(Option<PickerValue>) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Process one host input.
    pub fn handle_input(&mut self, input: &PickerInput, now: Instant) -> PickerResponse {
        let action = match *input {
            PickerInput::Key(key) => {
                match self.router.route(&key, &self.state, &self.ctx, now) {
                    Some(action) => action,
                    None => {
                        tripick_core::trace!(key = %key, "key ignored");
                        return PickerResponse::Ignored;
                    }
                }
            }
            PickerInput::Trigger => PickerAction::Toggle,
            PickerInput::HoverDay(date) => PickerAction::HoverDate(date),
            PickerInput::ClickDay(date) => PickerAction::SelectDate(date),
            PickerInput::ClickHour(hour) => PickerAction::SelectHour(hour),
            PickerInput::ClickMinute(minute) => PickerAction::SelectMinute(minute),
            PickerInput::Ok => PickerAction::Commit,
            PickerInput::Cancel => PickerAction::Cancel,
            PickerInput::Clear => PickerAction::ClearAndClose,
        };
        self.dispatch(action, now)
    }

    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> PickerResponse {
        self.handle_input(&PickerInput::Key(*key), now)
    }

    /// Apply one action and run its side effects.
    pub fn dispatch(&mut self, action: PickerAction, now: Instant) -> PickerResponse {
        let span = tripick_core::debug_span!("picker.dispatch", action = action.name());
        let _guard = span.enter();

        let before = self.state;
        let next = reduce(&self.ctx, &before, &action);
        let honored = before.is_open() && !self.ctx.disabled;

        let response = match action {
            PickerAction::Commit if honored => {
                if before.is_complete(self.ctx.mode) {
                    self.ctx.committed = before.selected_value();
                    PickerResponse::Changed(before.selected_value())
                } else {
                    tripick_core::debug!("commit on incomplete selection; closing without value");
                    PickerResponse::CommitIncomplete
                }
            }
            PickerAction::ClearAndClose if honored && self.ctx.clearable => {
                self.ctx.committed = None;
                PickerResponse::Changed(None)
            }
            // At a bound the clamp can leave focus in place; the day is still re-announced.
            PickerAction::FocusDate(_) if honored => PickerResponse::Updated,
            _ if next == before => PickerResponse::Ignored,
            _ => PickerResponse::Updated,
        };
        self.state = next;

        if response.is_ignored() {
            tripick_core::trace!("no state change");
            return response;
        }
        if (before.is_open() && !next.is_open()) || before.active_grid() != next.active_grid() {
            self.router.reset();
        }
        if let Some(message) = announcement(&action, &next, response) {
            self.announcer.announce(message, now);
        }
        tripick_core::debug!(
            open = next.is_open(),
            focus = %FocusTarget::of(&next).id(),
            "transition applied"
        );

        if let PickerResponse::Changed(value) = response {
            tripick_core::debug!(value = ?value, "emitting change");
            if let Some(callback) = self.on_change.as_mut() {
                callback(value);
            }
        }
        response
    }

    /// Fire due timers. Returns `true` when the view changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let buffers = self.router.tick(now);
        let message = self.announcer.tick(now);
        buffers || message
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.router.next_deadline(), self.announcer.deadline().due()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Replace the committed value from outside.
    ///
    /// A closed picker is reseeded from it. An open picker keeps the pending
    /// selection; the new value only becomes the rollback target.
    pub fn set_value(&mut self, value: Option<PickerValue>) {
        self.ctx.committed = value;
        if !self.state.is_open() {
            self.state = PickerState::seeded(&self.ctx);
            self.router.reset();
        }
        tripick_core::debug!(value = ?value, open = self.state.is_open(), "external value");
    }

    /// Change bounds; the day cursor is pulled back inside them.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.ctx.bounds = bounds;
        self.state = self.state.reclamped(&self.ctx);
    }

    /// Move the injected "today", e.g. when the host crosses midnight.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.ctx.today = today;
        if !self.state.is_open() && self.ctx.committed.is_none() {
            self.state = PickerState::seeded(&self.ctx);
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.ctx.disabled = disabled;
        if disabled {
            self.router.reset();
        }
    }

    pub fn set_clearable(&mut self, clearable: bool) {
        self.ctx.clearable = clearable;
    }

    /// Apply new timings. Running timers keep their current deadline.
    pub fn set_config(&mut self, config: PickerConfig) {
        self.config = config;
        self.router.set_jump_timeout(config.jump_timeout);
        self.announcer.set_clear_delay(config.announce_clear_delay);
    }

    /// Cancel every timer and drop the callback. The picker stays readable.
    pub fn dispose(&mut self) {
        self.router.reset();
        self.announcer.clear();
        self.on_change = None;
        tripick_core::debug!("picker disposed");
    }

    #[must_use]
    pub fn view(&self) -> PickerView {
        PickerView::build(&self.ctx, &self.state, self.announcer.message())
    }

    #[must_use]
    pub const fn state(&self) -> &PickerState {
        &self.state
    }

    #[must_use]
    pub const fn context(&self) -> &PickerContext {
        &self.ctx
    }

    #[must_use]
    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    #[must_use]
    pub const fn committed(&self) -> Option<PickerValue> {
        self.ctx.committed
    }

    #[must_use]
    pub fn announcement(&self) -> Option<&str> {
        self.announcer.message()
    }

    #[must_use]
    pub fn focus(&self) -> FocusTarget {
        FocusTarget::of(&self.state)
    }

    #[must_use]
    pub const fn router(&self) -> &KeyboardRouter {
        &self.router
    }
}

fn announcement(
    action: &PickerAction,
    next: &PickerState,
    response: PickerResponse,
) -> Option<String> {
    let message = match action {
        PickerAction::FocusDate(_) => describe_day(next.focused_date()),
        PickerAction::SelectDate(date) => format!("Selected {}", describe_day(*date)),
        PickerAction::FocusHour(_) | PickerAction::FocusMinute(_) | PickerAction::FocusGrid(_) => {
            match FocusTarget::of(next) {
                FocusTarget::Day(date) => describe_day(date),
                FocusTarget::Hour(hour) => format!("Hour {hour}"),
                FocusTarget::Minute(minute) => format!("Minute {minute:02}"),
            }
        }
        PickerAction::SelectHour(hour) => format!("Selected hour {hour}"),
        PickerAction::SelectMinute(minute) => format!("Selected minute {minute:02}"),
        PickerAction::Commit => match response {
            PickerResponse::Changed(Some(value)) => format!("Saved {}", value.describe()),
            _ => return None,
        },
        PickerAction::Clear | PickerAction::ClearAndClose => "Selection cleared".to_owned(),
        PickerAction::Open
        | PickerAction::Close
        | PickerAction::Toggle
        | PickerAction::HoverDate(_)
        | PickerAction::Cancel => return None,
    };
    Some(message)
}
