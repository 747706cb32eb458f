//! Runs a whole check list under a concurrency policy.
//!
//! - Sequential runs go in list order and stop before the next check once
//!   the run is cancelled.
//! - Parallel runs use a rayon pool sized by [`Parallelism`]. Checks that
//!   have not started when the run is cancelled are skipped; running ones
//!   finish.
//!
//! A fault in one check never stops its siblings. The first fault is
//! returned after every check has been given its chance.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::checks::{Check, CheckOutcome};
use crate::error::DoctorError;
use crate::runner::{CancelToken, CheckExecutor, Parallelism, RunResult, RunSettings};
use crate::ui::OutputSink;

/// Lifecycle of an [`Orchestrator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
}

/// Owns the check list and drives a run.
pub struct Orchestrator {
    checks: Vec<Check>,
    executor: CheckExecutor,
    sink: Arc<dyn OutputSink>,
    cancel: CancelToken,
    state: RunState,
}

impl Orchestrator {
    pub fn new(
        checks: Vec<Check>,
        settings: RunSettings,
        sink: Arc<dyn OutputSink>,
        cancel: CancelToken,
    ) -> Self {
        Self {
            checks,
            executor: CheckExecutor::new(settings, Arc::clone(&sink)),
            sink,
            cancel,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn settings(&self) -> &RunSettings {
        self.executor.settings()
    }

    /// The token that cancels this run.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Run every check and aggregate the outcomes.
    ///
    /// The returned [`RunResult`] carries the run's error, if any:
    /// [`DoctorError::Cancelled`] when checks were skipped because of
    /// cancellation, otherwise the first infrastructure fault.
    pub fn run(&mut self) -> RunResult {
        self.state = RunState::Running;
        let start = Instant::now();
        let parallelism = self.settings().parallelism;

        let mut result = match parallelism.workers(self.checks.len()) {
            None => self.run_sequential(),
            Some(workers) => self.run_parallel(parallelism, workers),
        };

        result.duration = start.elapsed();
        self.state = RunState::Completed;

        debug!(
            passed = result.passed,
            failed = result.failed,
            errored = result.errored,
            not_started = result.not_started,
            "run completed"
        );
        self.sink.run_finished(&result);
        result
    }

    fn run_sequential(&self) -> RunResult {
        let mut result = RunResult::new();

        for (index, check) in self.checks.iter().enumerate() {
            if self.cancel.is_cancelled() {
                let remaining = self.checks.len() - index;
                info!(remaining, "run cancelled");
                result.record_not_started(remaining);
                result.mark_cancelled();
                break;
            }
            result.record(self.executor.execute(check));
        }

        result
    }

    fn run_parallel(&self, parallelism: Parallelism, workers: usize) -> RunResult {
        info!(
            total = self.checks.len(),
            limit = parallelism.level(),
            "running checks in parallel"
        );

        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("doctor-check-{}", i))
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, "could not start worker pool, running sequentially");
                return self.run_sequential();
            }
        };

        let slots: Mutex<Vec<Option<CheckOutcome>>> = Mutex::new(vec![None; self.checks.len()]);
        let first_error: Mutex<Option<DoctorError>> = Mutex::new(None);

        pool.scope_fifo(|scope| {
            for (index, check) in self.checks.iter().enumerate() {
                let check = check.clone();
                let executor = &self.executor;
                let cancel = &self.cancel;
                let slots = &slots;
                let first_error = &first_error;

                scope.spawn_fifo(move |_| {
                    if cancel.is_cancelled() {
                        debug!(description = %check.description, "skipping check, run cancelled");
                        return;
                    }

                    let outcome = executor.execute(&check);

                    if let Some(source) = &outcome.error {
                        let mut first = first_error.lock().unwrap_or_else(PoisonError::into_inner);
                        if first.is_none() {
                            *first = Some(DoctorError::Check {
                                description: outcome.description.clone(),
                                check_type: outcome.check_type.clone(),
                                source: source.clone(),
                            });
                        }
                    }

                    slots.lock().unwrap_or_else(PoisonError::into_inner)[index] = Some(outcome);
                });
            }
        });

        let mut result = RunResult::new();
        // Completion order decides which fault is reported; outcomes stay in list order.
        if let Some(err) = first_error
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
        {
            result.set_first_error(err);
        }

        let mut skipped = 0;
        for slot in slots.into_inner().unwrap_or_else(PoisonError::into_inner) {
            match slot {
                Some(outcome) => result.record(outcome),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            info!(skipped, "run cancelled");
            result.record_not_started(skipped);
            result.mark_cancelled();
        }

        result
    }
}
