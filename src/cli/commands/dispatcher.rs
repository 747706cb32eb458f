//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::runner::CancelToken;

use super::completions::CompletionsCommand;
use super::list::ListCommand;
use super::run::{RunCommand, RunOptions};

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
    cancel: CancelToken,
}

impl CommandDispatcher {
    /// Create a new dispatcher rooted at `working_dir`.
    pub fn new(working_dir: PathBuf, cancel: CancelToken) -> Self {
        Self {
            working_dir,
            cancel,
        }
    }

    /// Directory config discovery starts from.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. No subcommand means `run`.
    pub fn dispatch(&self, cli: &Cli) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run) | None => {
                let cmd = RunCommand::new(
                    &self.working_dir,
                    RunOptions::from(cli),
                    self.cancel.clone(),
                );
                cmd.execute()
            }
            Some(Commands::List(args)) => {
                let cmd = ListCommand::new(
                    &self.working_dir,
                    cli.config.clone(),
                    args.clone(),
                    self.cancel.clone(),
                );
                cmd.execute()
            }
            Some(Commands::Completions(args)) => {
                let cmd = CompletionsCommand::new(args.clone());
                cmd.execute()
            }
        }
    }
}
