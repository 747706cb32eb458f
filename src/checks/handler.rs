//! Type-specific check predicates.
//!
//! [`execute`] runs exactly one check and classifies it. Ordinary failures
//! are `Ok` outcomes; only infrastructure faults come back as `Err`.

use std::fs;
use std::io;
use std::sync::Arc;

use crate::checks::{Check, CheckKind, CheckOutcome};
use crate::error::CheckError;
use crate::runner::ExecContext;
use crate::shell;

/// Run one check.
///
/// # Errors
///
/// Returns a [`CheckError`] when the check could not be evaluated: the home
/// directory is unknown, a file cannot be read, a command cannot be spawned
/// or exits non-zero, or the deadline expires.
pub fn execute(check: &Check, ctx: &ExecContext) -> Result<CheckOutcome, CheckError> {
    match &check.kind {
        CheckKind::CommandInPath { command } => command_in_path(check, command, ctx),
        CheckKind::FileExists { path } => file_exists(check, path, ctx),
        CheckKind::FileContains { path, content } => file_contains(check, path, content, ctx),
        CheckKind::OutputContains { command, content } => {
            output_contains(check, command, content, ctx)
        }
        CheckKind::Unknown { type_name } => Ok(unknown_type(check, type_name)),
    }
}

/// Fix hint for a check whose type is not recognized.
pub fn unknown_type_fix(type_name: &str) -> String {
    format!(
        "Check config file and update type '{}' to a valid type.",
        type_name
    )
}

fn command_in_path(
    check: &Check,
    command: &str,
    ctx: &ExecContext,
) -> Result<CheckOutcome, CheckError> {
    ctx.deadline.check()?;

    match shell::find_in_path(command) {
        Some(found) => Ok(CheckOutcome::passed(
            check,
            format!("Found {} at: {}", command, found.display()),
        )),
        None => Ok(CheckOutcome::failed(
            check,
            format!("Error: executable '{}' not found in PATH", command),
        )),
    }
}

fn file_exists(check: &Check, path: &str, ctx: &ExecContext) -> Result<CheckOutcome, CheckError> {
    let path = shell::clean_home(path)?;
    ctx.deadline.check()?;

    match fs::metadata(&path) {
        Ok(_) => Ok(CheckOutcome::passed(
            check,
            format!("Found {}!", path.display()),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(CheckOutcome::failed(
            check,
            format!("File not found: {}", path.display()),
        )),
        Err(e) => Err(CheckError::Stat {
            path,
            source: Arc::new(e),
        }),
    }
}

fn file_contains(
    check: &Check,
    path: &str,
    content: &str,
    ctx: &ExecContext,
) -> Result<CheckOutcome, CheckError> {
    let path = shell::clean_home(path)?;
    ctx.deadline.check()?;

    let bytes = fs::read(&path).map_err(|e| CheckError::Read {
        path: path.clone(),
        source: Arc::new(e),
    })?;
    let text = String::from_utf8_lossy(&bytes);

    if text.contains(content) {
        Ok(CheckOutcome::passed(
            check,
            format!("Found '{}' in {}!", content, path.display()),
        ))
    } else {
        Ok(CheckOutcome::failed(
            check,
            format!("Could not find '{}' in {}!", content, path.display()),
        ))
    }
}

fn output_contains(
    check: &Check,
    command: &str,
    content: &str,
    ctx: &ExecContext,
) -> Result<CheckOutcome, CheckError> {
    let output = shell::run_captured(command, &ctx.deadline)?;
    let found = output.contains(content);

    let mut detail = if found {
        format!("Found '{}' in '{}' output!", content, command)
    } else {
        format!("Could not find '{}' in '{}' output!", content, command)
    };
    // Captured output is only ever shown in verbose mode.
    if ctx.verbose {
        detail.push('\n');
        detail.push_str(&output);
    }

    if found {
        Ok(CheckOutcome::passed(check, detail))
    } else {
        Ok(CheckOutcome::failed(check, detail))
    }
}

fn unknown_type(check: &Check, type_name: &str) -> CheckOutcome {
    CheckOutcome::failed_with_fix(
        check,
        format!("unknown check type: '{}'", type_name),
        unknown_type_fix(type_name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::OutcomeKind;
    use crate::runner::Deadline;
    use std::time::Duration;
    use tempfile::TempDir;

    fn check(kind: CheckKind) -> Check {
        Check {
            description: "test check".into(),
            fix: "apply the fix".into(),
            kind,
        }
    }

    fn ctx() -> ExecContext {
        ExecContext::unbounded()
    }

    #[test]
    fn file_exists_passes_for_existing_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("present.txt");
        fs::write(&file, "x").unwrap();

        let outcome = execute(
            &check(CheckKind::FileExists {
                path: file.to_string_lossy().into_owned(),
            }),
            &ctx(),
        )
        .unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Passed);
    }

    #[test]
    fn file_exists_fails_after_delete() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("gone.txt");
        fs::write(&file, "x").unwrap();
        fs::remove_file(&file).unwrap();

        let outcome = execute(
            &check(CheckKind::FileExists {
                path: file.to_string_lossy().into_owned(),
            }),
            &ctx(),
        )
        .unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Failed);
        assert_eq!(outcome.fix.as_deref(), Some("apply the fix"));
    }

    #[test]
    fn file_exists_accepts_directories() {
        let temp = TempDir::new().unwrap();
        let outcome = execute(
            &check(CheckKind::FileExists {
                path: temp.path().to_string_lossy().into_owned(),
            }),
            &ctx(),
        )
        .unwrap();
        assert!(outcome.is_passed());
    }

    fn contains_check(temp: &TempDir, text: &str, content: &str) -> Check {
        let file = temp.path().join("data.txt");
        fs::write(&file, text).unwrap();
        check(CheckKind::FileContains {
            path: file.to_string_lossy().into_owned(),
            content: content.into(),
        })
    }

    #[test]
    fn file_contains_finds_literal_substring() {
        let temp = TempDir::new().unwrap();
        let outcome = execute(&contains_check(&temp, "hello world", "lo wo"), &ctx()).unwrap();
        assert!(outcome.is_passed());
    }

    #[test]
    fn file_contains_is_case_sensitive() {
        let temp = TempDir::new().unwrap();
        let outcome = execute(&contains_check(&temp, "hello world", "World"), &ctx()).unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Failed);
    }

    #[test]
    fn file_contains_treats_pattern_literally() {
        let temp = TempDir::new().unwrap();
        let outcome = execute(&contains_check(&temp, "abc", "a.c"), &ctx()).unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Failed);
    }

    #[test]
    fn file_contains_empty_content_passes() {
        let temp = TempDir::new().unwrap();
        let outcome = execute(&contains_check(&temp, "", ""), &ctx()).unwrap();
        assert!(outcome.is_passed());
    }

    #[test]
    fn file_contains_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = execute(
            &check(CheckKind::FileContains {
                path: temp.path().join("nope").to_string_lossy().into_owned(),
                content: "x".into(),
            }),
            &ctx(),
        )
        .unwrap_err();
        assert!(matches!(err, CheckError::Read { .. }));
    }

    #[test]
    fn command_in_path_finds_sh() {
        if cfg!(windows) {
            return;
        }
        let outcome = execute(
            &check(CheckKind::CommandInPath {
                command: "sh".into(),
            }),
            &ctx(),
        )
        .unwrap();
        assert!(outcome.is_passed());
        assert!(outcome.detail.unwrap().contains("Found sh at:"));
    }

    #[test]
    fn command_in_path_fails_for_missing_command() {
        let outcome = execute(
            &check(CheckKind::CommandInPath {
                command: "doctor-definitely-not-a-real-command".into(),
            }),
            &ctx(),
        )
        .unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Failed);
    }

    #[cfg(unix)]
    #[test]
    fn output_contains_matches_stdout() {
        let outcome = execute(
            &check(CheckKind::OutputContains {
                command: "echo version 1.2.3".into(),
                content: "1.2".into(),
            }),
            &ctx(),
        )
        .unwrap();
        assert!(outcome.is_passed());
    }

    #[cfg(unix)]
    #[test]
    fn output_contains_misses() {
        let outcome = execute(
            &check(CheckKind::OutputContains {
                command: "echo version 1.2.3".into(),
                content: "2.0".into(),
            }),
            &ctx(),
        )
        .unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Failed);
    }

    #[cfg(unix)]
    #[test]
    fn output_contains_keeps_output_only_when_verbose() {
        let check = check(CheckKind::OutputContains {
            command: "echo version 1.2.3".into(),
            content: "1.2".into(),
        });

        let quiet = execute(&check, &ctx()).unwrap();
        assert!(!quiet.detail.unwrap().contains("version 1.2.3"));

        let verbose = ExecContext {
            verbose: true,
            deadline: Deadline::none(),
        };
        let loud = execute(&check, &verbose).unwrap();
        assert!(loud.detail.unwrap().contains("version 1.2.3"));
    }

    #[cfg(unix)]
    #[test]
    fn output_contains_non_zero_exit_is_error() {
        let err = execute(
            &check(CheckKind::OutputContains {
                command: "echo found; exit 1".into(),
                content: "found".into(),
            }),
            &ctx(),
        )
        .unwrap_err();
        assert!(matches!(err, CheckError::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn output_contains_times_out() {
        let ctx = ExecContext {
            verbose: false,
            deadline: Deadline::after(Duration::from_millis(200)),
        };
        let err = execute(
            &check(CheckKind::OutputContains {
                command: "sleep 5".into(),
                content: "x".into(),
            }),
            &ctx,
        )
        .unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn unknown_type_fails_with_fix_hint() {
        let outcome = execute(
            &check(CheckKind::Unknown {
                type_name: "port-open".into(),
            }),
            &ctx(),
        )
        .unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Failed);
        assert_eq!(
            outcome.fix.as_deref(),
            Some("Check config file and update type 'port-open' to a valid type.")
        );
    }
}
