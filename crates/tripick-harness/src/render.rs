#![forbid(unsafe_code)]

//! Plain-text rendering of a [`PickerView`].
//!
//! Each cell is four columns wide. Brackets mark the keyboard cursor and the
//! selection; a trailing mark flags the rest:
//!
//! | Cell   | Meaning              |
//! |--------|----------------------|
//! | `[10]` | focused              |
//! | `(10)` | selected             |
//! | `{10}` | focused and selected |
//! | ` 10-` | outside bounds       |
//! | ` 10*` | today                |
//! | ` 10^` | hovered              |

use std::fmt::Write as FmtWrite;

use chrono::Datelike;
use tripick_widgets::date_picker::{CellFlags, PickerView, TimeCell};

const HOURS_PER_ROW: usize = 12;

/// Render a view as text, one line per grid row.
#[must_use]
pub fn render_view(view: &PickerView) -> String {
    let mut out = String::new();
    let status = if view.disabled {
        "disabled"
    } else if view.is_open {
        "open"
    } else {
        "closed"
    };
    push_line(&mut out, &format!("{} ({status})", view.month));

    let header: String = view.week_header.iter().map(|label| format!(" {label} ")).collect();
    push_line(&mut out, &header);
    for week in &view.weeks {
        let row: String = week
            .iter()
            .map(|cell| match cell.date {
                Some(date) => render_cell(&format!("{:02}", date.day()), cell.flags),
                None => "    ".to_string(),
            })
            .collect();
        push_line(&mut out, &row);
    }

    if !view.hours.is_empty() {
        push_line(&mut out, "hours");
        for chunk in view.hours.chunks(HOURS_PER_ROW) {
            push_line(&mut out, &time_row(chunk));
        }
        push_line(&mut out, "minutes");
        push_line(&mut out, &time_row(&view.minutes));
    }

    let mut actions = Vec::new();
    if view.can_commit {
        actions.push("ok");
    }
    if view.can_clear {
        actions.push("clear");
    }

    push_line(&mut out, &format!("focus: {}", view.focus.id()));
    push_line(&mut out, &format!("pending: {}", display_or_dash(view.pending)));
    push_line(&mut out, &format!("committed: {}", display_or_dash(view.committed)));
    push_line(
        &mut out,
        &format!("announce: {}", view.announcement.as_deref().unwrap_or("-")),
    );
    let actions = if actions.is_empty() {
        "-".to_string()
    } else {
        actions.join(" ")
    };
    push_line(&mut out, &format!("actions: {actions}"));
    out
}

fn time_row(cells: &[TimeCell]) -> String {
    cells
        .iter()
        .map(|cell| render_cell(&format!("{:02}", cell.value), cell.flags))
        .collect()
}

/// Four-column cell for `label` (always two characters).
#[must_use]
pub fn render_cell(label: &str, flags: CellFlags) -> String {
    let focused = flags.contains(CellFlags::FOCUSED);
    let selected = flags.contains(CellFlags::SELECTED);
    let (open, close) = match (focused, selected) {
        (true, true) => ('{', '}'),
        (true, false) => ('[', ']'),
        (false, true) => ('(', ')'),
        (false, false) => (' ', trailing_mark(flags)),
    };
    format!("{open}{label}{close}")
}

fn trailing_mark(flags: CellFlags) -> char {
    if flags.contains(CellFlags::DISABLED) {
        '-'
    } else if flags.contains(CellFlags::TODAY) {
        '*'
    } else if flags.contains(CellFlags::HOVERED) {
        '^'
    } else {
        ' '
    }
}

fn display_or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn push_line(out: &mut String, line: &str) {
    let _ = writeln!(out, "{}", line.trim_end());
}
