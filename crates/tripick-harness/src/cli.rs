#![forbid(unsafe_code)]

//! Command-line argument parsing for the `tripick` replay binary.
//!
//! Parses args manually to keep the binary lean. `TRIPICK_*` environment
//! variables provide defaults that explicit flags override.

use std::env;
use std::fmt;
use std::process;

use chrono::NaiveDate;
use tripick_widgets::date_picker::{Bounds, BoundsError, Mode, PickerValue, ValueParseError};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
tripick: replay an input script against a date/time picker

USAGE:
    tripick [OPTIONS]

OPTIONS:
    --mode=MODE          'date' (default) or 'datetime'
    --value=VALUE        Initial value: YYYY-MM-DD or YYYY-MM-DDTHH:MM
    --min=DATE           Earliest selectable date (YYYY-MM-DD)
    --max=DATE           Latest selectable date (YYYY-MM-DD)
    --today=DATE         Date to treat as today (default: local date)
    --clearable          Show the Clear action
    --disabled           Start disabled
    --script=PATH        Read the script from PATH ('-' or omitted: stdin)
    --json               Print the transcript as JSON
    --no-view            Skip the final rendered view
    --help, -h           Show this help message
    --version, -V        Show version

SCRIPT COMMANDS:
    trigger | ok | cancel | clear
    key NAME             e.g. key Right, key Shift+PageUp, key 7
    keys NAME...         several keys at the same instant
    wait MS              advance the clock and fire due timers
    hover DATE|none      click-day DATE | click-hour H | click-minute M
    set-value VALUE|none

ENVIRONMENT VARIABLES:
    TRIPICK_MODE                Override --mode default
    TRIPICK_TODAY               Override --today default
    TRIPICK_JUMP_TIMEOUT_MS     Digit jump window (default: 1000)
    TRIPICK_ANNOUNCE_CLEAR_MS   Announcement lifetime (default: 1000)
    RUST_LOG                    Log filter (logs go to stderr)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub mode: Mode,
    pub value: Option<PickerValue>,
    pub bounds: Bounds,
    /// `None` means the local date at startup.
    pub today: Option<NaiveDate>,
    pub clearable: bool,
    pub disabled: bool,
    /// `None` reads stdin.
    pub script: Option<String>,
    pub json: bool,
    pub show_view: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            mode: Mode::Date,
            value: None,
            bounds: Bounds::unbounded(),
            today: None,
            clearable: false,
            disabled: false,
            script: None,
            json: false,
            show_view: true,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    UnknownArgument(String),
    BadMode(String),
    BadDate { flag: &'static str, value: String },
    BadValue(ValueParseError),
    Bounds(BoundsError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownArgument(arg) => write!(f, "unknown argument '{arg}'"),
            Self::BadMode(mode) => write!(f, "invalid mode '{mode}', expected date or datetime"),
            Self::BadDate { flag, value } => {
                write!(f, "invalid {flag} '{value}', expected YYYY-MM-DD")
            }
            Self::BadValue(err) => write!(f, "{err}"),
            Self::Bounds(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Parse the process arguments and environment, exiting on help, version,
    /// or bad input.
    #[must_use]
    pub fn parse() -> Self {
        let args = env::args().skip(1);
        match Self::parse_from(args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("tripick {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("tripick: {err}");
                eprintln!("Run with --help for usage.");
                process::exit(2);
            }
        }
    }

    /// Parse `args` with `get` standing in for the environment.
    pub fn parse_from<I, F>(args: I, mut get: F) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = String>,
        F: FnMut(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = get("TRIPICK_MODE") {
            opts.mode = Mode::parse(&val).ok_or(CliError::BadMode(val))?;
        }
        if let Some(val) = get("TRIPICK_TODAY") {
            opts.today = Some(parse_date("TRIPICK_TODAY", &val)?);
        }

        let mut min = None;
        let mut max = None;
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--clearable" => opts.clearable = true,
                "--disabled" => opts.disabled = true,
                "--json" => opts.json = true,
                "--no-view" => opts.show_view = false,
                other => {
                    if let Some(val) = other.strip_prefix("--mode=") {
                        opts.mode = Mode::parse(val).ok_or_else(|| CliError::BadMode(val.into()))?;
                    } else if let Some(val) = other.strip_prefix("--value=") {
                        opts.value = Some(val.parse().map_err(CliError::BadValue)?);
                    } else if let Some(val) = other.strip_prefix("--min=") {
                        min = Some(parse_date("--min", val)?);
                    } else if let Some(val) = other.strip_prefix("--max=") {
                        max = Some(parse_date("--max", val)?);
                    } else if let Some(val) = other.strip_prefix("--today=") {
                        opts.today = Some(parse_date("--today", val)?);
                    } else if let Some(val) = other.strip_prefix("--script=") {
                        opts.script = (val != "-").then(|| val.to_string());
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        opts.bounds = Bounds::new(min, max).map_err(CliError::Bounds)?;
        Ok(Command::Run(opts))
    }
}

fn parse_date(flag: &'static str, value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CliError::BadDate {
        flag,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Command, CliError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Opts::parse_from(args.iter().map(|s| (*s).to_string()), |key| env.get(key).cloned())
    }

    fn run_opts(args: &[&str], env: &[(&str, &str)]) -> Opts {
        match parse(args, env).unwrap() {
            Command::Run(opts) => opts,
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn defaults() {
        let opts = run_opts(&[], &[]);
        assert_eq!(opts, Opts::default());
    }

    #[test]
    fn full_flag_set() {
        let opts = run_opts(
            &[
                "--mode=datetime",
                "--value=2025-06-07T09:10",
                "--min=2025-06-07",
                "--max=2025-08-07",
                "--today=2025-06-01",
                "--clearable",
                "--script=trip.pick",
                "--json",
                "--no-view",
            ],
            &[],
        );
        assert_eq!(opts.mode, Mode::DateTime);
        assert_eq!(opts.value, Some("2025-06-07T09:10".parse().unwrap()));
        assert_eq!(opts.bounds.min(), NaiveDate::from_ymd_opt(2025, 6, 7));
        assert_eq!(opts.today, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert!(opts.clearable && opts.json && !opts.show_view && !opts.disabled);
        assert_eq!(opts.script.as_deref(), Some("trip.pick"));
    }

    #[test]
    fn flags_override_env() {
        let env = [("TRIPICK_MODE", "datetime"), ("TRIPICK_TODAY", "2025-01-01")];
        assert_eq!(run_opts(&[], &env).mode, Mode::DateTime);
        let opts = run_opts(&["--mode=date", "--today=2025-02-02"], &env);
        assert_eq!(opts.mode, Mode::Date);
        assert_eq!(opts.today, NaiveDate::from_ymd_opt(2025, 2, 2));
    }

    #[test]
    fn stdin_script_marker() {
        assert_eq!(run_opts(&["--script=-"], &[]).script, None);
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse(&["--help", "--bogus"], &[]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"], &[]).unwrap(), Command::Version);
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse(&["--frobnicate"], &[]).unwrap_err(),
            CliError::UnknownArgument("--frobnicate".into())
        );
        assert_eq!(
            parse(&["--mode=week"], &[]).unwrap_err(),
            CliError::BadMode("week".into())
        );
        assert!(matches!(
            parse(&["--min=06/07"], &[]).unwrap_err(),
            CliError::BadDate { flag: "--min", .. }
        ));
        assert!(matches!(
            parse(&["--min=2025-08-01", "--max=2025-07-01"], &[]).unwrap_err(),
            CliError::Bounds(_)
        ));
        assert!(matches!(
            parse(&["--value=soon"], &[]).unwrap_err(),
            CliError::BadValue(_)
        ));
    }
}
