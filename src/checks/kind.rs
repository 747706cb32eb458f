//! Typed check definitions.
//!
//! A [`CheckConfig`] carries every field as a string; [`Check`] keeps only
//! the fields its kind needs, so the handler can match exhaustively.

use std::fmt;

use crate::config::CheckConfig;

pub const COMMAND_IN_PATH: &str = "command-in-path";
pub const FILE_EXISTS: &str = "file-exists";
pub const FILE_CONTAINS: &str = "file-contains";
pub const OUTPUT_CONTAINS: &str = "output-contains";

/// Every type name the handler understands.
pub const KNOWN_TYPES: &[&str] = &[COMMAND_IN_PATH, FILE_EXISTS, FILE_CONTAINS, OUTPUT_CONTAINS];

/// What a check asserts about the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckKind {
    /// `command` resolves on `PATH`.
    CommandInPath { command: String },

    /// `path` exists.
    FileExists { path: String },

    /// `path` contains `content` as a literal substring.
    FileContains { path: String, content: String },

    /// Standard output of `command` contains `content`.
    OutputContains { command: String, content: String },

    /// The config named a type nobody implements.
    Unknown { type_name: String },
}

impl CheckKind {
    /// The config-file spelling of this kind.
    pub fn type_name(&self) -> &str {
        match self {
            CheckKind::CommandInPath { .. } => COMMAND_IN_PATH,
            CheckKind::FileExists { .. } => FILE_EXISTS,
            CheckKind::FileContains { .. } => FILE_CONTAINS,
            CheckKind::OutputContains { .. } => OUTPUT_CONTAINS,
            CheckKind::Unknown { type_name } => type_name,
        }
    }

    /// Whether this kind came from a type name that is not recognized.
    pub fn is_unknown(&self) -> bool {
        matches!(self, CheckKind::Unknown { .. })
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// One check, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// Shown to the user.
    pub description: String,

    /// Remediation text shown on failure.
    pub fix: String,

    /// The assertion itself.
    pub kind: CheckKind,
}

impl Check {
    /// Build a check from its config entry.
    ///
    /// Never fails: an unrecognized `type` becomes [`CheckKind::Unknown`]
    /// and is reported when the check runs.
    pub fn from_config(config: &CheckConfig) -> Self {
        let kind = match config.check_type.as_str() {
            COMMAND_IN_PATH => CheckKind::CommandInPath {
                command: config.command.clone(),
            },
            FILE_EXISTS => CheckKind::FileExists {
                path: config.path.clone(),
            },
            FILE_CONTAINS => CheckKind::FileContains {
                path: config.path.clone(),
                content: config.content.clone(),
            },
            OUTPUT_CONTAINS => CheckKind::OutputContains {
                command: config.command.clone(),
                content: config.content.clone(),
            },
            other => CheckKind::Unknown {
                type_name: other.to_string(),
            },
        };

        Self {
            description: config.description.clone(),
            fix: config.fix.clone(),
            kind,
        }
    }

    /// The config-file spelling of this check's type.
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

impl From<&CheckConfig> for Check {
    fn from(config: &CheckConfig) -> Self {
        Self::from_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(check_type: &str) -> CheckConfig {
        CheckConfig {
            description: "desc".into(),
            check_type: check_type.into(),
            command: "cmd".into(),
            path: "/some/path".into(),
            content: "needle".into(),
            fix: "do the thing".into(),
        }
    }

    #[test]
    fn command_in_path_keeps_command_only() {
        let check = Check::from_config(&config(COMMAND_IN_PATH));
        assert_eq!(
            check.kind,
            CheckKind::CommandInPath {
                command: "cmd".into()
            }
        );
        assert_eq!(check.fix, "do the thing");
    }

    #[test]
    fn file_contains_keeps_path_and_content() {
        let check = Check::from_config(&config(FILE_CONTAINS));
        assert_eq!(
            check.kind,
            CheckKind::FileContains {
                path: "/some/path".into(),
                content: "needle".into()
            }
        );
    }

    #[test]
    fn output_contains_keeps_command_and_content() {
        let check = Check::from_config(&config(OUTPUT_CONTAINS));
        assert!(matches!(check.kind, CheckKind::OutputContains { .. }));
        assert_eq!(check.type_name(), OUTPUT_CONTAINS);
    }

    #[test]
    fn unknown_type_is_preserved() {
        let check = Check::from_config(&config("port-open"));
        assert!(check.kind.is_unknown());
        assert_eq!(check.type_name(), "port-open");
    }

    #[test]
    fn type_names_match_config_spelling() {
        for name in KNOWN_TYPES {
            let check = Check::from_config(&config(name));
            assert_eq!(check.type_name(), *name);
            assert!(!check.kind.is_unknown());
        }
    }

    #[test]
    fn type_matching_is_case_sensitive() {
        let check = Check::from_config(&config("File-Exists"));
        assert!(check.kind.is_unknown());
    }
}
