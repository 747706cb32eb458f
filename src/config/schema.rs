//! Configuration schema definitions for doctor.
//!
//! These structs map one-to-one onto the `.doctor.yml` document.

use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Root configuration structure for `.doctor.yml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DoctorConfig {
    /// Default for `--verbose`.
    pub verbose: Option<bool>,

    /// Default per-check timeout (`--timeout`).
    #[serde(deserialize_with = "super::duration::deserialize_optional")]
    pub timeout: Option<Duration>,

    /// Default for `--parallel` (0 = sequential, -1 = unlimited, N = limit).
    pub parallelism: Option<i64>,

    /// Checks in the order they were declared.
    pub checks: Vec<CheckConfig>,
}

/// A single check as written in the config file.
///
/// Every field is optional and defaults to the empty string. Which fields
/// matter depends on `type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Shown to the user while the check runs.
    #[serde(deserialize_with = "empty_if_null")]
    pub description: String,

    /// One of `command-in-path`, `file-exists`, `file-contains`,
    /// `output-contains`.
    #[serde(rename = "type", deserialize_with = "empty_if_null")]
    pub check_type: String,

    /// Command to look up or to run, depending on the type.
    #[serde(deserialize_with = "empty_if_null", skip_serializing_if = "String::is_empty")]
    pub command: String,

    /// File path; `~` expands to the home directory.
    #[serde(deserialize_with = "empty_if_null", skip_serializing_if = "String::is_empty")]
    pub path: String,

    /// Text that must appear in the file or command output.
    #[serde(deserialize_with = "empty_if_null", skip_serializing_if = "String::is_empty")]
    pub content: String,

    /// Instructions shown when the check fails.
    #[serde(deserialize_with = "empty_if_null", skip_serializing_if = "String::is_empty")]
    pub fix: String,
}

/// `description:` with no value is an empty string, not an error.
fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
