//! Doctor - checks your system for issues and suggests fixes.
//!
//! Doctor reads a declarative list of environment checks from a
//! `.doctor.yml` file (is a command on `PATH`? does a file exist or contain
//! some text? does a command print something?) and reports each one as
//! passed or failed, with a remediation hint for failures.
//!
//! # Modules
//!
//! - [`checks`] - Check definitions, outcomes and per-type handlers
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Config discovery, parsing and duration strings
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Deadlines, the check executor and the run orchestrator
//! - [`shell`] - Subprocesses, `PATH` lookup and signal handling
//! - [`ui`] - Output sinks and styling
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use doctor::checks::{Check, CheckKind};
//! use doctor::runner::{CancelToken, Orchestrator, RunSettings};
//! use doctor::ui::MemorySink;
//!
//! let checks = vec![Check {
//!     description: "Root directory".into(),
//!     fix: String::new(),
//!     kind: CheckKind::FileExists { path: "/".into() },
//! }];
//!
//! let sink = Arc::new(MemorySink::new());
//! let mut orchestrator =
//!     Orchestrator::new(checks, RunSettings::new(), sink.clone(), CancelToken::new());
//! let result = orchestrator.run();
//!
//! assert_eq!(result.passed, 1);
//! assert!(result.is_success());
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{CheckError, DoctorError, Result};
