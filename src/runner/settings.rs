//! Run settings and the concurrency policy.

use std::fmt;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::runner::Deadline;

/// How many checks may be in flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// One at a time, in list order.
    #[default]
    Sequential,

    /// Every check starts immediately.
    Unbounded,

    /// At most N checks in flight.
    Bounded(NonZeroUsize),
}

impl Parallelism {
    /// Build from the signed level used on the command line and in config:
    /// `0` is sequential, negative is unbounded, `N > 0` bounds to N.
    pub fn from_level(level: i64) -> Self {
        match level {
            0 => Parallelism::Sequential,
            n if n < 0 => Parallelism::Unbounded,
            n => usize::try_from(n)
                .ok()
                .and_then(NonZeroUsize::new)
                .map(Parallelism::Bounded)
                .unwrap_or(Parallelism::Unbounded),
        }
    }

    /// The signed level this policy corresponds to.
    pub fn level(&self) -> i64 {
        match self {
            Parallelism::Sequential => 0,
            Parallelism::Unbounded => -1,
            Parallelism::Bounded(n) => i64::try_from(n.get()).unwrap_or(i64::MAX),
        }
    }

    /// Worker count for `check_count` checks, or `None` when sequential.
    pub fn workers(&self, check_count: usize) -> Option<usize> {
        match self {
            Parallelism::Sequential => None,
            Parallelism::Unbounded => Some(check_count.max(1)),
            Parallelism::Bounded(n) => Some(n.get().min(check_count.max(1))),
        }
    }

    /// Whether checks run one at a time.
    pub fn is_sequential(&self) -> bool {
        matches!(self, Parallelism::Sequential)
    }
}

impl fmt::Display for Parallelism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parallelism::Sequential => write!(f, "sequential"),
            Parallelism::Unbounded => write!(f, "unbounded"),
            Parallelism::Bounded(n) => write!(f, "bounded({})", n),
        }
    }
}

/// Settings shared by every check of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSettings {
    /// Show what each check found.
    pub verbose: bool,

    /// Per-check timeout. `None` or zero disables it.
    pub timeout: Option<Duration>,

    /// Concurrency policy.
    pub parallelism: Parallelism,
}

impl RunSettings {
    /// Create settings with defaults (quiet, no timeout, sequential).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Per-check execution context, starting the deadline clock now.
    pub fn exec_context(&self) -> ExecContext {
        ExecContext {
            verbose: self.verbose,
            deadline: Deadline::from_timeout(self.timeout),
        }
    }
}

/// What a single check sees of the run: its own deadline and the verbosity.
#[derive(Debug, Clone, Copy)]
pub struct ExecContext {
    pub verbose: bool,
    pub deadline: Deadline,
}

impl ExecContext {
    /// A context with no deadline.
    pub fn unbounded() -> Self {
        Self {
            verbose: false,
            deadline: Deadline::none(),
        }
    }
}

impl Default for ExecContext {
    fn default() -> Self {
        Self::unbounded()
    }
}
