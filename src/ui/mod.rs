//! Reporting check results to the user.
//!
//! This module provides:
//! - [`OutputSink`] trait the executor reports through
//! - [`ConsoleSink`] for colored terminal output
//! - [`MemorySink`] for tests
//! - [`DoctorTheme`] for styling

pub mod mock;
pub mod sink;
pub mod theme;

pub use mock::MemorySink;
pub use sink::{ConsoleSink, OutputSink};
pub use theme::{should_use_colors, DoctorTheme};
