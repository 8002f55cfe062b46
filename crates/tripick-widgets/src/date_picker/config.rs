#![forbid(unsafe_code)]

//! Construction inputs and timing configuration.
//!
//! # Environment Variables
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `TRIPICK_JUMP_TIMEOUT_MS` | [`PickerConfig::jump_timeout`] | 1000 |
//! | `TRIPICK_ANNOUNCE_CLEAR_MS` | [`PickerConfig::announce_clear_delay`] | 1000 |
//!
//! Unparseable or zero values are reported in [`PickerConfigParse::errors`] and
//! the default is kept.

use std::env;
use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;

use super::announcer::DEFAULT_CLEAR_DELAY;
use super::jump_buffer::DEFAULT_JUMP_TIMEOUT;
use super::range::Bounds;
use super::state::PickerContext;
use super::value::{Mode, PickerValue};

pub const ENV_JUMP_TIMEOUT_MS: &str = "TRIPICK_JUMP_TIMEOUT_MS";
pub const ENV_ANNOUNCE_CLEAR_MS: &str = "TRIPICK_ANNOUNCE_CLEAR_MS";

/// Timer settings shared by every picker a host creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerConfig {
    /// Window in which typed digits combine into one jump.
    pub jump_timeout: Duration,
    /// How long an announcement stays live.
    pub announce_clear_delay: Duration,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            jump_timeout: DEFAULT_JUMP_TIMEOUT,
            announce_clear_delay: DEFAULT_CLEAR_DELAY,
        }
    }
}

impl PickerConfig {
    #[must_use]
    pub fn with_jump_timeout(mut self, timeout: Duration) -> Self {
        self.jump_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_announce_clear_delay(mut self, delay: Duration) -> Self {
        self.announce_clear_delay = delay;
        self
    }

    /// Read overrides from the process environment, ignoring invalid ones.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok()).config
    }

    /// Read overrides through `get` and report every rejected value.
    pub fn from_env_with<F>(mut get: F) -> PickerConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(value) = get(ENV_JUMP_TIMEOUT_MS) {
            match parse_millis(&value) {
                Some(parsed) => config.jump_timeout = parsed,
                None => errors.push(ConfigError::new(
                    ENV_JUMP_TIMEOUT_MS,
                    value,
                    "expected positive integer milliseconds",
                )),
            }
        }

        if let Some(value) = get(ENV_ANNOUNCE_CLEAR_MS) {
            match parse_millis(&value) {
                Some(parsed) => config.announce_clear_delay = parsed,
                None => errors.push(ConfigError::new(
                    ENV_ANNOUNCE_CLEAR_MS,
                    value,
                    "expected positive integer milliseconds",
                )),
            }
        }

        #[cfg(feature = "tracing")]
        for error in &errors {
            tripick_core::warn!(%error, "ignoring picker config override");
        }
        PickerConfigParse { config, errors }
    }
}

fn parse_millis(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(ms) => Some(Duration::from_millis(ms)),
    }
}

/// Result of reading the environment: the effective config plus rejected values.
#[derive(Debug, Clone)]
pub struct PickerConfigParse {
    pub config: PickerConfig,
    pub errors: Vec<ConfigError>,
}

/// A rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Everything needed to construct a picker.
///
/// ```
/// use chrono::NaiveDate;
/// use tripick_widgets::date_picker::{Mode, PickerOptions, PickerValue};
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let options = PickerOptions::new(Mode::DateTime, today)
///     .with_value(Some("2025-06-07T09:10".parse::<PickerValue>().unwrap()))
///     .clearable(true);
/// assert!(options.context().clearable);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerOptions {
    pub mode: Mode,
    pub today: NaiveDate,
    pub value: Option<PickerValue>,
    pub bounds: Bounds,
    pub clearable: bool,
    pub disabled: bool,
    pub config: PickerConfig,
}

impl PickerOptions {
    #[must_use]
    pub fn new(mode: Mode, today: NaiveDate) -> Self {
        Self {
            mode,
            today,
            value: None,
            bounds: Bounds::unbounded(),
            clearable: false,
            disabled: false,
            config: PickerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: Option<PickerValue>) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: PickerConfig) -> Self {
        self.config = config;
        self
    }

    /// The reducer context these options describe.
    #[must_use]
    pub fn context(&self) -> PickerContext {
        PickerContext {
            mode: self.mode,
            bounds: self.bounds,
            committed: self.value,
            today: self.today,
            clearable: self.clearable,
            disabled: self.disabled,
        }
    }
}
