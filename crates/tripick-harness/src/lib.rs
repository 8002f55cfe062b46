#![forbid(unsafe_code)]

//! Headless host and golden testing for tripick pickers.
//!
//! - **Scripts** ([`script`]): line-oriented input sessions.
//! - **Host** ([`host`]): replays a script on a virtual clock and records a transcript.
//! - **Rendering** ([`render`]): a [`PickerView`](tripick_widgets::date_picker::PickerView) as plain text.
//! - **CLI** ([`cli`]): options for the `tripick` replay binary.
//! - **Snapshots**: compare text against stored `.snap` files and show diffs on mismatch.
//!
//! # Quick Start
//!
//! ```ignore
//! use tripick_harness::{assert_snapshot, host::ScriptedHost, script::Script};
//!
//! #[test]
//! fn hour_jump() {
//!     let mut host = ScriptedHost::new(options());
//!     host.run(&Script::parse("trigger\nkey Tab\nkeys 1 5\n").unwrap());
//!     assert_snapshot!("hour_jump", &host.view_text());
//! }
//! ```
//!
//! # Updating Snapshots
//!
//! Run tests with `BLESS=1` to create or update snapshot files:
//!
//! ```sh
//! BLESS=1 cargo test -p tripick-harness
//! ```

pub mod cli;
pub mod host;
pub mod render;
pub mod script;

pub use host::{ScriptedHost, Transcript, TranscriptEntry};
pub use render::render_view;
pub use script::{Script, ScriptError};

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

// ============================================================================
// Match Modes & Normalization
// ============================================================================

/// Comparison mode for snapshot testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Byte-exact string comparison.
    Exact,
    /// Trim trailing whitespace on each line before comparing.
    TrimTrailing,
    /// Collapse all whitespace runs to single spaces and trim each line.
    Fuzzy,
}

fn normalize(text: &str, mode: MatchMode) -> String {
    match mode {
        MatchMode::Exact => text.to_string(),
        MatchMode::TrimTrailing => text
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n"),
        MatchMode::Fuzzy => text
            .lines()
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

// ============================================================================
// Diff
// ============================================================================

/// Line-by-line diff: ` ` common, `-` only in `expected`, `+` only in `actual`.
///
/// Empty when the inputs are identical.
#[must_use]
pub fn diff_text(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    let max_lines = expected_lines.len().max(actual_lines.len());
    let mut out = String::new();
    let mut has_diff = false;

    for i in 0..max_lines {
        match (expected_lines.get(i), actual_lines.get(i)) {
            (Some(e), Some(a)) if e == a => {
                let _ = writeln!(out, " {e}");
            }
            (Some(e), Some(a)) => {
                let _ = writeln!(out, "-{e}");
                let _ = writeln!(out, "+{a}");
                has_diff = true;
            }
            (Some(e), None) => {
                let _ = writeln!(out, "-{e}");
                has_diff = true;
            }
            (None, Some(a)) => {
                let _ = writeln!(out, "+{a}");
                has_diff = true;
            }
            (None, None) => {}
        }
    }

    if has_diff { out } else { String::new() }
}

// ============================================================================
// Snapshot Assertion
// ============================================================================

fn snapshot_path(base_dir: &Path, name: &str) -> PathBuf {
    base_dir
        .join("tests")
        .join("snapshots")
        .join(format!("{name}.snap"))
}

fn is_bless() -> bool {
    std::env::var("BLESS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Assert that `actual` matches the stored snapshot `name`.
///
/// `base_dir` is the crate root (use `env!("CARGO_MANIFEST_DIR")`); snapshots
/// live under `tests/snapshots/{name}.snap`.
///
/// # Panics
///
/// * If the snapshot file does not exist and `BLESS=1` is **not** set.
/// * If the text does not match the stored snapshot.
pub fn assert_text_snapshot(name: &str, actual: &str, base_dir: &str, mode: MatchMode) {
    let path = snapshot_path(Path::new(base_dir), name);

    if is_bless() {
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            panic!("failed to create snapshot directory {}: {e}", parent.display());
        }
        if let Err(e) = std::fs::write(&path, actual) {
            panic!("failed to write snapshot {}: {e}", path.display());
        }
        return;
    }

    match std::fs::read_to_string(&path) {
        Ok(expected) => {
            let norm_expected = normalize(&expected, mode);
            let norm_actual = normalize(actual, mode);
            if norm_expected != norm_actual {
                let diff = diff_text(&norm_expected, &norm_actual);
                panic!(
                    "\n\
                     === Snapshot mismatch: '{name}' ===\n\
                     File: {}\n\
                     Mode: {mode:?}\n\
                     Set BLESS=1 to update.\n\n\
                     Diff (- expected, + actual):\n{diff}",
                    path.display()
                );
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            panic!(
                "\n\
                 === No snapshot found: '{name}' ===\n\
                 Expected at: {}\n\
                 Run with BLESS=1 to create it.\n\n\
                 Actual output:\n{actual}",
                path.display(),
            );
        }
        Err(e) => panic!("Failed to read snapshot '{}': {e}", path.display()),
    }
}

/// Assert that text matches a stored snapshot under this crate's `tests/snapshots`.
///
/// ```ignore
/// assert_snapshot!("open_initial", &text);
/// assert_snapshot!("open_initial", &text, MatchMode::Exact);
/// ```
#[macro_export]
macro_rules! assert_snapshot {
    ($name:expr, $text:expr) => {
        $crate::assert_text_snapshot(
            $name,
            $text,
            env!("CARGO_MANIFEST_DIR"),
            $crate::MatchMode::TrimTrailing,
        )
    };
    ($name:expr, $text:expr, $mode:expr) => {
        $crate::assert_text_snapshot($name, $text, env!("CARGO_MANIFEST_DIR"), $mode)
    };
}
