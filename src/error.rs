//! Error types for doctor operations.
//!
//! This module defines [`DoctorError`], the error returned to the caller of a
//! run, and [`CheckError`], the infrastructure fault a single check can hit.
//!
//! # Error Handling Strategy
//!
//! - An ordinary failed check is an outcome, never an error
//! - `CheckError` describes why a check could not be evaluated at all
//! - `DoctorError` is what the orchestrator or the config loader hands back
//! - Use `anyhow::Error` (via `DoctorError::Other`) for unexpected errors

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::duration::format_duration;

/// Core error type for doctor operations.
#[derive(Debug, Error)]
pub enum DoctorError {
    /// No config file was found walking up from the start directory.
    #[error("Configuration not found: no {file_name} in {} or any parent directory", .start.display())]
    ConfigNotFound {
        start: PathBuf,
        file_name: &'static str,
    },

    /// The config file exists but could not be read.
    #[error("Failed to read config at {}: {source}", .path.display())]
    ConfigReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {}: {message}", .path.display())]
    ConfigParseError { path: PathBuf, message: String },

    /// A duration flag or config value could not be parsed.
    #[error("Invalid duration '{input}': {message}")]
    InvalidDuration { input: String, message: String },

    /// A check hit an infrastructure fault.
    #[error("Check '{description}' ({check_type}) failed: {source}")]
    Check {
        description: String,
        check_type: String,
        #[source]
        source: CheckError,
    },

    /// The run was interrupted before every check could start.
    #[error("Check execution cancelled")]
    Cancelled,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a single check could not be evaluated.
///
/// Cloneable so the same fault can be shown in the report and returned
/// from the run.
#[derive(Debug, Clone, Error)]
pub enum CheckError {
    /// `~` appeared in a path but the home directory is unknown.
    #[error("Could not resolve home directory to expand '{path}'")]
    HomeDirUnavailable { path: String },

    #[error("Failed to stat file '{}': {source}", .path.display())]
    Stat {
        path: PathBuf,
        source: Arc<std::io::Error>,
    },

    #[error("Failed to read file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: Arc<std::io::Error>,
    },

    #[error("Failed to spawn command '{command}': {source}")]
    Spawn {
        command: String,
        source: Arc<std::io::Error>,
    },

    #[error("Failed waiting for command '{command}': {source}")]
    Wait {
        command: String,
        source: Arc<std::io::Error>,
    },

    /// The command ran but exited non-zero or was killed by a signal.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The per-check deadline elapsed.
    #[error("Command timed out after {}", format_timeout(.after))]
    Timeout { after: Duration },
}

impl CheckError {
    /// Whether this fault is the timeout sub-case.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

fn format_timeout(after: &Duration) -> String {
    format_duration(*after)
}

/// Result type alias for doctor operations.
pub type Result<T> = std::result::Result<T, DoctorError>;
