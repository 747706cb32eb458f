//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::parse_duration_arg;
use crate::runner::Parallelism;

/// Doctor - checks your system for issues and suggests fixes.
#[derive(Debug, Parser)]
#[command(name = "doctor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides discovery of .doctor.yml)
    #[arg(short, long, global = true, env = "DOCTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show what each check found
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Timeout for each check (e.g., 500ms, 30s, 1m; 0 disables)
    #[arg(short, long, global = true, value_parser = parse_duration_arg)]
    pub timeout: Option<Duration>,

    /// Run checks in parallel (0=sequential, -1=unlimited, N=limit to N concurrent)
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    pub parallel: Option<i64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parallelism requested on the command line, if any.
    pub fn parallelism(&self) -> Option<Parallelism> {
        self.parallel.map(Parallelism::from_level)
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run all checks (default if no command specified)
    Run,

    /// List configured checks without running them
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    pub format: ListFormat,
}

/// Output formats for `doctor list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ListFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
