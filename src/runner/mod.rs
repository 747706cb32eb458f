//! Check execution: deadlines, the per-check executor and the run orchestrator.

pub mod cancel;
pub mod executor;
pub mod orchestrator;
pub mod result;
pub mod settings;

pub use cancel::{CancelToken, Deadline};
pub use executor::CheckExecutor;
pub use orchestrator::{Orchestrator, RunState};
pub use result::RunResult;
pub use settings::{ExecContext, Parallelism, RunSettings};
