//! Process, path and signal plumbing used by the check handlers.

pub mod command;
pub mod path;
pub mod signal;

pub use command::run_captured;
pub use path::{
    clean_home, clean_home_with, find_in_path, is_executable, parse_system_path, resolve_command,
};
pub use signal::{install_interrupt_handler, interrupted, INTERRUPT_MESSAGE};
