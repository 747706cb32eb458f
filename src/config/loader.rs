//! Configuration file discovery and loading.
//!
//! The config file is found by walking up from the working directory until
//! a `.doctor.yml` turns up or the filesystem root is passed.

use crate::config::schema::DoctorConfig;
use crate::error::{DoctorError, Result};
use crate::runner::CancelToken;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for in each directory.
pub const CONFIG_FILE_NAME: &str = ".doctor.yml";

/// A parsed config together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Path of the config file that was read.
    pub path: PathBuf,

    /// Parsed document.
    pub config: DoctorConfig,
}

/// Find the config file by walking up from `start`.
///
/// The walk stops early with [`DoctorError::Cancelled`] if `cancel` fires.
///
/// # Errors
///
/// Returns `ConfigNotFound` if no directory up to the root contains
/// [`CONFIG_FILE_NAME`].
pub fn find_config(start: &Path, cancel: &CancelToken) -> Result<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if cancel.is_cancelled() {
            return Err(DoctorError::Cancelled);
        }

        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "found config");
            return Ok(candidate);
        }

        if !current.pop() {
            return Err(DoctorError::ConfigNotFound {
                start: start.to_path_buf(),
                file_name: CONFIG_FILE_NAME,
            });
        }
    }
}

/// Load a single config file and parse it into [`DoctorConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigReadError` if it exists but can't be read.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DoctorConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DoctorError::ConfigNotFound {
                start: path.to_path_buf(),
                file_name: CONFIG_FILE_NAME,
            }
        } else {
            DoctorError::ConfigReadError {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let config = parse_config(&content, path)?;
    tracing::debug!(checks = config.checks.len(), "parsed config");
    Ok(config)
}

/// Parse YAML content into [`DoctorConfig`].
///
/// An empty document yields an empty check list.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<DoctorConfig> {
    if content.trim().is_empty() {
        return Ok(DoctorConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| DoctorError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, that file is loaded directly.
/// Otherwise the file is discovered from `start`.
pub fn load_config(
    start: &Path,
    config_override: Option<&Path>,
    cancel: &CancelToken,
) -> Result<LoadedConfig> {
    let path = match config_override {
        Some(path) => path.to_path_buf(),
        None => find_config(start, cancel)?,
    };

    let config = load_config_file(&path)?;
    Ok(LoadedConfig { path, config })
}
