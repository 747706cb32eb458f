//! Aggregated result of a run.

use std::time::Duration;

use crate::checks::{CheckOutcome, OutcomeKind};
use crate::error::{DoctorError, Result};

/// Everything a run produced.
///
/// Outcomes are kept in list order regardless of how the checks were
/// scheduled. Ordinary failures are counted but never become the run's error.
#[derive(Debug, Default)]
pub struct RunResult {
    outcomes: Vec<CheckOutcome>,

    /// Checks that passed.
    pub passed: usize,

    /// Checks whose expectation did not hold.
    pub failed: usize,

    /// Checks that hit an infrastructure fault, timeouts included.
    pub errored: usize,

    /// Subset of `errored` that ran past the deadline.
    pub timed_out: usize,

    /// Checks skipped because the run was cancelled first.
    pub not_started: usize,

    /// Wall-clock time of the whole run.
    pub duration: Duration,

    error: Option<DoctorError>,
}

impl RunResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one outcome. The first infrastructure fault becomes the run error.
    pub fn record(&mut self, outcome: CheckOutcome) {
        match outcome.kind {
            OutcomeKind::Passed => self.passed += 1,
            OutcomeKind::Failed => self.failed += 1,
            OutcomeKind::Error => self.errored += 1,
            OutcomeKind::Timeout => {
                self.errored += 1;
                self.timed_out += 1;
            }
        }

        if self.error.is_none() {
            if let Some(source) = outcome.error.clone() {
                self.error = Some(DoctorError::Check {
                    description: outcome.description.clone(),
                    check_type: outcome.check_type.clone(),
                    source,
                });
            }
        }

        self.outcomes.push(outcome);
    }

    /// Count checks that never started.
    pub fn record_not_started(&mut self, count: usize) {
        self.not_started += count;
    }

    /// Set the run error if none was recorded yet.
    pub(crate) fn set_first_error(&mut self, error: DoctorError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Mark the run as cancelled. Cancellation takes precedence over any
    /// check error.
    pub fn mark_cancelled(&mut self) {
        self.error = Some(DoctorError::Cancelled);
    }

    /// Per-check outcomes in list order.
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    /// The error the run hands back to the caller, if any.
    pub fn error(&self) -> Option<&DoctorError> {
        self.error.as_ref()
    }

    /// Whether the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.error, Some(DoctorError::Cancelled))
    }

    /// True when the run returns no error. Ordinary failures still count as success.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Checks that produced an outcome.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Convert to a `Result`, discarding outcomes if the run errored.
    pub fn into_result(mut self) -> Result<Self> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}
