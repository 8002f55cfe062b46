#![forbid(unsafe_code)]

//! Headless host that replays scripts against a picker on a virtual clock.
//!
//! The host owns the only clock: it starts at an arbitrary [`Instant`] and only
//! moves on `wait` steps, so transcripts are deterministic.

use std::cell::RefCell;
use std::fmt::Write as FmtWrite;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde_json::{Value, json};
use tripick_widgets::date_picker::{DateTimePicker, PickerOptions, PickerResponse, PickerValue};

use crate::render::render_view;
use crate::script::{Script, ScriptLine, Step};

type ChangeLog = Rc<RefCell<Vec<Option<PickerValue>>>>;

/// A picker plus a virtual clock and a record of every `on_change` call.
#[derive(Debug)]
pub struct ScriptedHost {
    picker: DateTimePicker,
    start: Instant,
    elapsed: Duration,
    changes: ChangeLog,
}

impl ScriptedHost {
    #[must_use]
    pub fn new(options: PickerOptions) -> Self {
        let changes: ChangeLog = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let picker = DateTimePicker::new(options).on_change(move |value| {
            sink.borrow_mut().push(value);
        });
        Self {
            picker,
            start: Instant::now(),
            elapsed: Duration::ZERO,
            changes,
        }
    }

    /// Current virtual instant.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn picker(&self) -> &DateTimePicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut DateTimePicker {
        &mut self.picker
    }

    /// Every value passed to `on_change`, in order.
    #[must_use]
    pub fn changes(&self) -> Vec<Option<PickerValue>> {
        self.changes.borrow().clone()
    }

    /// The current view as text.
    #[must_use]
    pub fn view_text(&self) -> String {
        render_view(&self.picker.view())
    }

    /// Advance the clock, firing every timer that falls due.
    pub fn advance(&mut self, by: Duration) -> bool {
        self.elapsed += by;
        self.picker.tick(self.now())
    }

    /// Execute one script line and describe the result.
    pub fn run_line(&mut self, line: &ScriptLine) -> TranscriptEntry {
        let outcome = match &line.step {
            Step::Input(inputs) => {
                let now = self.now();
                inputs
                    .iter()
                    .map(|input| outcome_label(self.picker.handle_input(input, now)))
                    .collect::<Vec<_>>()
                    .join(",")
            }
            Step::Wait(by) => {
                if self.advance(*by) {
                    "fired".to_string()
                } else {
                    "idle".to_string()
                }
            }
            Step::SetValue(value) => {
                self.picker.set_value(*value);
                "set".to_string()
            }
        };
        tracing::debug!(line = line.line, source = %line.source, %outcome, "script step");
        self.entry(&line.source, outcome)
    }

    /// Run a whole script.
    pub fn run(&mut self, script: &Script) -> Transcript {
        let entries = script.lines.iter().map(|line| self.run_line(line)).collect();
        Transcript {
            entries,
            changes: self.changes(),
        }
    }

    fn entry(&self, source: &str, outcome: String) -> TranscriptEntry {
        let view = self.picker.view();
        TranscriptEntry {
            at_ms: self.elapsed_ms(),
            source: source.to_string(),
            outcome,
            open: view.is_open,
            focus: view.focus.id(),
            pending: view.pending.map(|v| v.to_string()),
            committed: view.committed.map(|v| v.to_string()),
            announcement: view.announcement,
        }
    }
}

fn outcome_label(response: PickerResponse) -> String {
    match response {
        PickerResponse::Ignored => "ignored".to_string(),
        PickerResponse::Updated => "updated".to_string(),
        PickerResponse::Changed(Some(value)) => format!("changed:{value}"),
        PickerResponse::Changed(None) => "changed:none".to_string(),
        PickerResponse::CommitIncomplete => "incomplete".to_string(),
    }
}

// ============================================================================
// Transcript
// ============================================================================

/// State after one script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub at_ms: u64,
    pub source: String,
    pub outcome: String,
    pub open: bool,
    pub focus: String,
    pub pending: Option<String>,
    pub committed: Option<String>,
    pub announcement: Option<String>,
}

impl TranscriptEntry {
    #[must_use]
    pub fn to_text(&self) -> String {
        format!(
            "{}ms {} -> {} | focus {} | pending {} | announce {}",
            self.at_ms,
            self.source,
            self.outcome,
            self.focus,
            self.pending.as_deref().unwrap_or("-"),
            self.announcement.as_deref().unwrap_or("-"),
        )
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "at_ms": self.at_ms,
            "step": self.source,
            "outcome": self.outcome,
            "open": self.open,
            "focus": self.focus,
            "pending": self.pending,
            "committed": self.committed,
            "announcement": self.announcement,
        })
    }
}

/// Result of a script run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub entries: Vec<TranscriptEntry>,
    /// Values passed to `on_change`.
    pub changes: Vec<Option<PickerValue>>,
}

impl Transcript {
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(out, "{}", entry.to_text());
        }
        let changes: Vec<String> = self
            .changes
            .iter()
            .map(|c| c.map_or_else(|| "none".to_string(), |v| v.to_string()))
            .collect();
        let _ = writeln!(out, "on_change: [{}]", changes.join(", "));
        out
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "steps": self.entries.iter().map(TranscriptEntry::to_json).collect::<Vec<_>>(),
            "changes": self
                .changes
                .iter()
                .map(|c| c.map(|v| v.to_string()))
                .collect::<Vec<_>>(),
        })
    }
}
