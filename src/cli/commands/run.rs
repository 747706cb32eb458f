//! Run command implementation.
//!
//! The `doctor run` command (also the default) loads the config, runs every
//! check and reports the results.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::checks::Check;
use crate::cli::args::Cli;
use crate::config::{load_config, DoctorConfig};
use crate::error::Result;
use crate::runner::{CancelToken, Orchestrator, Parallelism, RunSettings};
use crate::ui::{ConsoleSink, DoctorTheme, OutputSink};

use super::dispatcher::{Command, CommandResult};

/// Run options taken from the command line. Unset values fall back to the
/// config document.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub verbose: bool,
    pub timeout: Option<Duration>,
    pub parallel: Option<i64>,
}

impl From<&Cli> for RunOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            config: cli.config.clone(),
            verbose: cli.verbose,
            timeout: cli.timeout,
            parallel: cli.parallel,
        }
    }
}

impl RunOptions {
    /// Merge with config defaults. Flags win; `verbose` is on if either asks.
    pub fn resolve(&self, config: &DoctorConfig) -> RunSettings {
        let level = self.parallel.or(config.parallelism).unwrap_or(0);
        RunSettings::new()
            .with_verbose(self.verbose || config.verbose.unwrap_or(false))
            .with_timeout(self.timeout.or(config.timeout))
            .with_parallelism(Parallelism::from_level(level))
    }
}

/// The run command implementation.
pub struct RunCommand {
    working_dir: PathBuf,
    options: RunOptions,
    cancel: CancelToken,
    sink: Option<Arc<dyn OutputSink>>,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(working_dir: &Path, options: RunOptions, cancel: CancelToken) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            options,
            cancel,
            sink: None,
        }
    }

    /// Report through `sink` instead of the console.
    pub fn with_sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }
}

impl Command for RunCommand {
    fn execute(&self) -> Result<CommandResult> {
        let loaded = load_config(
            &self.working_dir,
            self.options.config.as_deref(),
            &self.cancel,
        )?;
        let settings = self.options.resolve(&loaded.config);

        if let Some(timeout) = settings.timeout {
            tracing::info!(duration = ?timeout, "timeout configured");
        }

        let sink: Arc<dyn OutputSink> = match &self.sink {
            Some(sink) => Arc::clone(sink),
            None => Arc::new(
                ConsoleSink::stdout(DoctorTheme::detect(), settings.verbose)
                    .with_inline_progress(settings.parallelism.is_sequential()),
            ),
        };
        sink.note(&format!("Found config at: {}", loaded.path.display()));

        let checks: Vec<Check> = loaded.config.checks.iter().map(Check::from_config).collect();
        let mut orchestrator = Orchestrator::new(checks, settings, sink, self.cancel.clone());

        orchestrator.run().into_result()?;
        Ok(CommandResult::success())
    }
}
