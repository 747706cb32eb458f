//! List command implementation.
//!
//! The `doctor list` command prints the configured checks without running them.

use std::path::{Path, PathBuf};

use crate::checks::Check;
use crate::cli::args::{ListArgs, ListFormat};
use crate::config::{load_config, CheckConfig};
use crate::error::{DoctorError, Result};
use crate::runner::CancelToken;
use crate::ui::DoctorTheme;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    working_dir: PathBuf,
    config: Option<PathBuf>,
    args: ListArgs,
    cancel: CancelToken,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(
        working_dir: &Path,
        config: Option<PathBuf>,
        args: ListArgs,
        cancel: CancelToken,
    ) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config,
            args,
            cancel,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

/// Render checks as one line each: `description (type)`.
pub fn render_text(checks: &[CheckConfig], theme: &DoctorTheme) -> String {
    let mut out = String::new();
    for config in checks {
        let check = Check::from_config(config);
        let label = if check.kind.is_unknown() {
            format!("{} (unknown type '{}')", check.description, check.type_name())
        } else {
            format!("{} ({})", check.description, check.type_name())
        };
        out.push_str(&format!("{}\n", theme.description.apply_to(label)));
        if !check.fix.is_empty() {
            out.push_str(&format!("  {}\n", theme.dim.apply_to(&check.fix)));
        }
    }
    out
}

/// Render checks as a JSON array.
pub fn render_json(checks: &[CheckConfig]) -> Result<String> {
    serde_json::to_string_pretty(checks).map_err(|e| DoctorError::Other(e.into()))
}

impl Command for ListCommand {
    fn execute(&self) -> Result<CommandResult> {
        let loaded = match load_config(&self.working_dir, self.config.as_deref(), &self.cancel) {
            Ok(loaded) => loaded,
            Err(e @ DoctorError::ConfigNotFound { .. }) => {
                eprintln!("{}", DoctorTheme::detect().format_error(&e.to_string()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let checks = &loaded.config.checks;
        match self.args.format {
            ListFormat::Json => println!("{}", render_json(checks)?),
            ListFormat::Text => {
                if checks.is_empty() {
                    println!("No checks configured in {}", loaded.path.display());
                } else {
                    print!("{}", render_text(checks, &DoctorTheme::detect()));
                }
            }
        }

        Ok(CommandResult::success())
    }
}
