#![forbid(unsafe_code)]

//! Line-oriented input scripts for replaying picker sessions.
//!
//! One command per line; `#` starts a comment.
//!
//! ```text
//! trigger                   # toggle the picker
//! key Right                 # one key (any name KeyEvent parses)
//! keys 1 5                  # several keys at the same instant
//! wait 1200                 # advance the clock (ms), firing due timers
//! hover 2025-06-10          # pointer over a day; `hover none` leaves the grid
//! click-day 2025-06-10
//! click-hour 14
//! click-minute 30
//! ok | cancel | clear
//! set-value 2025-06-07T09:10   # external value change; `set-value none` clears
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use tripick_core::event::{KeyEvent, KeyParseError};
use tripick_widgets::date_picker::{PickerInput, PickerValue, ValueParseError};

/// One executable script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Forward inputs to the picker at the current instant.
    Input(Vec<PickerInput>),
    /// Advance the clock and tick timers.
    Wait(Duration),
    /// Replace the committed value from outside.
    SetValue(Option<PickerValue>),
}

/// A parsed line, keeping its source for transcripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub source: String,
    pub step: Step,
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub lines: Vec<ScriptLine>,
}

impl Script {
    /// Parse script text, stopping at the first bad line.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut lines = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let source = raw.split('#').next().unwrap_or_default().trim();
            if source.is_empty() {
                continue;
            }
            let step = parse_step(source).map_err(|kind| ScriptError { line, kind })?;
            lines.push(ScriptLine {
                line,
                source: source.to_string(),
                step,
            });
        }
        Ok(Self { lines })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_step(source: &str) -> Result<Step, ScriptErrorKind> {
    let mut words = source.split_whitespace();
    let command = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();
    let one = |name| single_arg(&args, name);
    let none = |name| {
        if args.is_empty() {
            Ok(())
        } else {
            Err(ScriptErrorKind::TooManyArguments(name))
        }
    };

    let step = match command.to_ascii_lowercase().as_str() {
        "trigger" => {
            none("trigger")?;
            Step::Input(vec![PickerInput::Trigger])
        }
        "ok" => {
            none("ok")?;
            Step::Input(vec![PickerInput::Ok])
        }
        "cancel" => {
            none("cancel")?;
            Step::Input(vec![PickerInput::Cancel])
        }
        "clear" => {
            none("clear")?;
            Step::Input(vec![PickerInput::Clear])
        }
        "key" => Step::Input(vec![PickerInput::Key(parse_key(one("key")?)?)]),
        "keys" => {
            if args.is_empty() {
                return Err(ScriptErrorKind::MissingArgument("keys"));
            }
            let keys = args
                .iter()
                .map(|name| parse_key(name).map(PickerInput::Key))
                .collect::<Result<Vec<_>, _>>()?;
            Step::Input(keys)
        }
        "wait" => {
            let ms = one("wait")?;
            let ms = ms
                .parse::<u64>()
                .map_err(|_| ScriptErrorKind::BadNumber(ms.to_string()))?;
            Step::Wait(Duration::from_millis(ms))
        }
        "hover" => {
            let arg = one("hover")?;
            let date = if arg.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_date(arg)?)
            };
            Step::Input(vec![PickerInput::HoverDay(date)])
        }
        "click-day" => Step::Input(vec![PickerInput::ClickDay(parse_date(one("click-day")?)?)]),
        "click-hour" => Step::Input(vec![PickerInput::ClickHour(parse_u8(one("click-hour")?)?)]),
        "click-minute" => Step::Input(vec![PickerInput::ClickMinute(parse_u8(
            one("click-minute")?,
        )?)]),
        "set-value" => {
            let arg = one("set-value")?;
            let value = if arg.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(arg.parse::<PickerValue>().map_err(ScriptErrorKind::BadValue)?)
            };
            Step::SetValue(value)
        }
        other => return Err(ScriptErrorKind::UnknownCommand(other.to_string())),
    };
    Ok(step)
}

fn single_arg<'a>(args: &[&'a str], name: &'static str) -> Result<&'a str, ScriptErrorKind> {
    match args {
        [arg] => Ok(*arg),
        [] => Err(ScriptErrorKind::MissingArgument(name)),
        _ => Err(ScriptErrorKind::TooManyArguments(name)),
    }
}

fn parse_key(name: &str) -> Result<KeyEvent, ScriptErrorKind> {
    name.parse().map_err(ScriptErrorKind::BadKey)
}

fn parse_date(text: &str) -> Result<NaiveDate, ScriptErrorKind> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| ScriptErrorKind::BadDate(text.to_string()))
}

fn parse_u8(text: &str) -> Result<u8, ScriptErrorKind> {
    text.parse()
        .map_err(|_| ScriptErrorKind::BadNumber(text.to_string()))
}

// ============================================================================
// Errors
// ============================================================================

/// A script line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    /// 1-based line number.
    pub line: usize,
    pub kind: ScriptErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptErrorKind {
    UnknownCommand(String),
    MissingArgument(&'static str),
    TooManyArguments(&'static str),
    BadKey(KeyParseError),
    BadDate(String),
    BadNumber(String),
    BadValue(ValueParseError),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            ScriptErrorKind::UnknownCommand(cmd) => write!(f, "unknown command '{cmd}'"),
            ScriptErrorKind::MissingArgument(cmd) => write!(f, "'{cmd}' needs an argument"),
            ScriptErrorKind::TooManyArguments(cmd) => write!(f, "too many arguments for '{cmd}'"),
            ScriptErrorKind::BadKey(err) => write!(f, "{err}"),
            ScriptErrorKind::BadDate(text) => write!(f, "invalid date '{text}', expected YYYY-MM-DD"),
            ScriptErrorKind::BadNumber(text) => write!(f, "invalid number '{text}'"),
            ScriptErrorKind::BadValue(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ScriptErrorKind::BadKey(err) => Some(err),
            ScriptErrorKind::BadValue(err) => Some(err),
            _ => None,
        }
    }
}
