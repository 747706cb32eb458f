//! Configuration loading and parsing for doctor.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Duration strings in [`duration`]
//!
//! # Example
//!
//! ```
//! use doctor::config::{load_config, CONFIG_FILE_NAME};
//! use doctor::runner::CancelToken;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join(CONFIG_FILE_NAME),
//!     "checks:\n  - description: sh\n    type: command-in-path\n    command: sh\n",
//! )
//! .unwrap();
//!
//! let loaded = load_config(temp.path(), None, &CancelToken::new()).unwrap();
//! assert_eq!(loaded.config.checks.len(), 1);
//! ```

pub mod duration;
pub mod loader;
pub mod schema;

pub use duration::{format_duration, parse_duration, parse_duration_arg};
pub use loader::{
    find_config, load_config, load_config_file, parse_config, LoadedConfig, CONFIG_FILE_NAME,
};
pub use schema::{CheckConfig, DoctorConfig};
