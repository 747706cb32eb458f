//! Check outcomes.

use std::fmt;
use std::time::Duration;

use crate::checks::Check;
use crate::error::CheckError;

/// How a check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeKind {
    /// The expectation held.
    Passed,

    /// The expectation did not hold. An ordinary, reported result.
    Failed,

    /// The check could not be evaluated.
    Error,

    /// The check ran past its deadline. A sub-case of [`OutcomeKind::Error`].
    Timeout,
}

impl OutcomeKind {
    /// Whether this counts as an infrastructure error.
    pub fn is_error(&self) -> bool {
        matches!(self, OutcomeKind::Error | OutcomeKind::Timeout)
    }

    /// Get a display character for this outcome.
    pub fn display_char(&self) -> char {
        match self {
            OutcomeKind::Passed => '✓',
            OutcomeKind::Failed => '✗',
            OutcomeKind::Error => '!',
            OutcomeKind::Timeout => '⧗',
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutcomeKind::Passed => "passed",
            OutcomeKind::Failed => "failed",
            OutcomeKind::Error => "error",
            OutcomeKind::Timeout => "timeout",
        };
        write!(f, "{}", s)
    }
}

/// Result of running one check. Built once, never mutated after reporting.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Description of the check that produced this outcome.
    pub description: String,

    /// Config-file type name of the check.
    pub check_type: String,

    /// How the check ended.
    pub kind: OutcomeKind,

    /// What was found, for verbose output.
    pub detail: Option<String>,

    /// Hint shown to the user when the check did not pass.
    pub fix: Option<String>,

    /// Underlying fault for `Error` and `Timeout`.
    pub error: Option<CheckError>,

    /// Wall-clock time spent in the handler.
    pub duration: Duration,
}

impl CheckOutcome {
    fn new(check: &Check, kind: OutcomeKind) -> Self {
        Self {
            description: check.description.clone(),
            check_type: check.type_name().to_string(),
            kind,
            detail: None,
            fix: None,
            error: None,
            duration: Duration::ZERO,
        }
    }

    /// Create a passed outcome.
    pub fn passed(check: &Check, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::new(check, OutcomeKind::Passed)
        }
    }

    /// Create a failed outcome carrying the check's configured fix.
    pub fn failed(check: &Check, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            fix: non_empty(&check.fix),
            ..Self::new(check, OutcomeKind::Failed)
        }
    }

    /// Create a failed outcome with a fix that overrides the configured one.
    pub fn failed_with_fix(check: &Check, detail: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            fix: Some(fix.into()),
            ..Self::new(check, OutcomeKind::Failed)
        }
    }

    /// Create an error outcome. Timeouts get their own kind and fix hint.
    pub fn from_error(check: &Check, error: CheckError) -> Self {
        let (kind, fix) = if error.is_timeout() {
            (OutcomeKind::Timeout, Some(error.to_string()))
        } else {
            (OutcomeKind::Error, None)
        };

        Self {
            fix,
            error: Some(error),
            ..Self::new(check, kind)
        }
    }

    /// Attach the elapsed time.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the check passed.
    pub fn is_passed(&self) -> bool {
        self.kind == OutcomeKind::Passed
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckKind;

    fn check(fix: &str) -> Check {
        Check {
            description: "Git installed".into(),
            fix: fix.into(),
            kind: CheckKind::CommandInPath {
                command: "git".into(),
            },
        }
    }

    #[test]
    fn error_kinds_are_errors() {
        assert!(OutcomeKind::Error.is_error());
        assert!(OutcomeKind::Timeout.is_error());
        assert!(!OutcomeKind::Failed.is_error());
        assert!(!OutcomeKind::Passed.is_error());
    }

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(OutcomeKind::Passed.to_string(), "passed");
        assert_eq!(OutcomeKind::Timeout.to_string(), "timeout");
    }

    #[test]
    fn failed_carries_configured_fix() {
        let outcome = CheckOutcome::failed(&check("brew install git"), "not found");
        assert_eq!(outcome.kind, OutcomeKind::Failed);
        assert_eq!(outcome.fix.as_deref(), Some("brew install git"));
        assert_eq!(outcome.check_type, "command-in-path");
    }

    #[test]
    fn failed_without_fix_has_no_hint() {
        let outcome = CheckOutcome::failed(&check(""), "not found");
        assert!(outcome.fix.is_none());
    }

    #[test]
    fn timeout_error_becomes_timeout_kind() {
        let outcome = CheckOutcome::from_error(
            &check("x"),
            CheckError::Timeout {
                after: Duration::from_secs(3),
            },
        );
        assert_eq!(outcome.kind, OutcomeKind::Timeout);
        assert_eq!(outcome.fix.as_deref(), Some("Command timed out after 3s"));
    }

    #[test]
    fn other_errors_become_error_kind() {
        let outcome = CheckOutcome::from_error(
            &check("x"),
            CheckError::CommandFailed {
                command: "false".into(),
                code: Some(1),
            },
        );
        assert_eq!(outcome.kind, OutcomeKind::Error);
        assert!(outcome.error.is_some());
        assert!(outcome.fix.is_none());
    }

    #[test]
    fn with_duration_sets_elapsed() {
        let outcome =
            CheckOutcome::passed(&check(""), "ok").with_duration(Duration::from_millis(40));
        assert_eq!(outcome.duration, Duration::from_millis(40));
        assert!(outcome.is_passed());
    }
}
