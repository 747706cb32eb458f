//! Single-check execution.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::checks::{self, Check, CheckOutcome, OutcomeKind};
use crate::runner::RunSettings;
use crate::ui::OutputSink;

/// Runs one check under the run's settings and reports it.
///
/// This is the only place that talks to the sink and emits per-check
/// tracing events.
#[derive(Clone)]
pub struct CheckExecutor {
    settings: RunSettings,
    sink: Arc<dyn OutputSink>,
}

impl CheckExecutor {
    pub fn new(settings: RunSettings, sink: Arc<dyn OutputSink>) -> Self {
        Self { settings, sink }
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Run `check` to completion. Never fails: faults become `Error` or
    /// `Timeout` outcomes.
    pub fn execute(&self, check: &Check) -> CheckOutcome {
        let ctx = self.settings.exec_context();
        let check_type = check.type_name();

        info!(check_type, description = %check.description, "check started");
        self.sink.check_started(check);

        let start = Instant::now();
        let outcome = match checks::execute(check, &ctx) {
            Ok(outcome) => outcome,
            Err(err) => CheckOutcome::from_error(check, err),
        }
        .with_duration(start.elapsed());

        match outcome.kind {
            OutcomeKind::Passed => {
                info!(check_type, description = %check.description, result = "passed", "check passed");
            }
            OutcomeKind::Failed => {
                warn!(
                    check_type,
                    description = %check.description,
                    result = "failed",
                    fix = outcome.fix.as_deref().unwrap_or_default(),
                    "check failed"
                );
            }
            OutcomeKind::Error | OutcomeKind::Timeout => {
                let message = outcome
                    .error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                error!(
                    check_type,
                    description = %check.description,
                    result = %outcome.kind,
                    error = %message,
                    "check error"
                );
            }
        }

        self.sink.check_finished(&outcome);
        outcome
    }
}
