//! Check definitions, outcomes and the per-type handlers.

pub mod handler;
pub mod kind;
pub mod outcome;

pub use handler::{execute, unknown_type_fix};
pub use kind::{
    Check, CheckKind, COMMAND_IN_PATH, FILE_CONTAINS, FILE_EXISTS, KNOWN_TYPES, OUTPUT_CONTAINS,
};
pub use outcome::{CheckOutcome, OutcomeKind};
