//! In-memory sink for testing.
//!
//! `MemorySink` implements [`OutputSink`] and records every event for later
//! assertion. It also tracks how many checks were in flight at once.
//!
//! # Example
//!
//! ```
//! use doctor::checks::{Check, CheckKind, CheckOutcome};
//! use doctor::ui::{MemorySink, OutputSink};
//!
//! let sink = MemorySink::new();
//! let check = Check {
//!     description: "Readme".into(),
//!     fix: String::new(),
//!     kind: CheckKind::FileExists { path: "README.md".into() },
//! };
//!
//! sink.check_started(&check);
//! sink.check_finished(&CheckOutcome::passed(&check, "found"));
//!
//! assert_eq!(sink.started(), vec!["Readme".to_string()]);
//! assert_eq!(sink.max_in_flight(), 1);
//! ```

use std::sync::{Mutex, PoisonError};

use crate::checks::{Check, CheckOutcome};
use crate::runner::RunResult;

use super::OutputSink;

#[derive(Debug, Default)]
struct Recorded {
    started: Vec<String>,
    finished: Vec<CheckOutcome>,
    notes: Vec<String>,
    in_flight: usize,
    max_in_flight: usize,
    runs_finished: usize,
}

/// Sink that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: Mutex<Recorded>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut Recorded) -> T) -> T {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut inner)
    }

    /// Descriptions of started checks, in start order.
    pub fn started(&self) -> Vec<String> {
        self.with(|r| r.started.clone())
    }

    /// Outcomes in finish order.
    pub fn finished(&self) -> Vec<CheckOutcome> {
        self.with(|r| r.finished.clone())
    }

    pub fn notes(&self) -> Vec<String> {
        self.with(|r| r.notes.clone())
    }

    /// Highest number of checks observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.with(|r| r.max_in_flight)
    }

    /// How many times `run_finished` was called.
    pub fn runs_finished(&self) -> usize {
        self.with(|r| r.runs_finished)
    }
}

impl OutputSink for MemorySink {
    fn check_started(&self, check: &Check) {
        self.with(|r| {
            r.started.push(check.description.clone());
            r.in_flight += 1;
            r.max_in_flight = r.max_in_flight.max(r.in_flight);
        });
    }

    fn check_finished(&self, outcome: &CheckOutcome) {
        self.with(|r| {
            r.in_flight = r.in_flight.saturating_sub(1);
            r.finished.push(outcome.clone());
        });
    }

    fn note(&self, message: &str) {
        self.with(|r| r.notes.push(message.to_string()));
    }

    fn run_finished(&self, _result: &RunResult) {
        self.with(|r| r.runs_finished += 1);
    }
}
