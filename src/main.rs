//! Doctor CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use doctor::cli::{Cli, CommandDispatcher};
use doctor::runner::CancelToken;
use doctor::shell::install_interrupt_handler;
use doctor::ui::DoctorTheme;
use doctor::DoctorError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so the report on stdout stays clean. Level is
/// controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `--json` raises the default to INFO so check events are emitted
/// 3. `RUST_LOG` environment variable (if set)
/// 4. Default is WARN
fn init_tracing(debug: bool, json: bool) {
    let filter = if debug {
        EnvFilter::new("doctor=debug")
    } else {
        let default = if json { "doctor=info" } else { "doctor=warn" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.json);

    tracing::debug!("doctor starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let cancel = CancelToken::new();
    install_interrupt_handler(cancel.clone());

    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: failed to get working directory: {}", e);
            return ExitCode::from(1);
        }
    };

    let dispatcher = CommandDispatcher::new(working_dir, cancel);

    match dispatcher.dispatch(&cli) {
        Ok(result) => ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1)),
        Err(e) => {
            let theme = DoctorTheme::detect();
            eprintln!("\n{}", theme.format_error(&e.to_string()));
            if matches!(e, DoctorError::Cancelled) {
                ExitCode::from(130)
            } else {
                ExitCode::from(1)
            }
        }
    }
}
