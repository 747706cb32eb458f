//! Cancellation and deadlines.
//!
//! A [`CancelToken`] is shared by every task of a run and flipped on user
//! interrupt. A [`Deadline`] belongs to a single check and bounds its
//! blocking calls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::CheckError;

/// Cooperative cancellation flag shared across tasks.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Point in time after which a check must give up.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    /// A deadline that never expires.
    pub fn none() -> Self {
        Self {
            started: Instant::now(),
            budget: None,
        }
    }

    /// A deadline `budget` from now. A zero budget means no deadline.
    pub fn after(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget: (!budget.is_zero()).then_some(budget),
        }
    }

    /// Build from an optional timeout setting.
    pub fn from_timeout(timeout: Option<Duration>) -> Self {
        timeout.map(Self::after).unwrap_or_else(Self::none)
    }

    /// The configured budget, if any.
    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    /// Time left before expiry. `None` means unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.budget
            .map(|budget| budget.saturating_sub(self.started.elapsed()))
    }

    /// Whether the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }

    /// Fail with [`CheckError::Timeout`] if the deadline has passed.
    pub fn check(&self) -> Result<(), CheckError> {
        match self.budget {
            Some(after) if self.is_expired() => Err(CheckError::Timeout { after }),
            _ => Ok(()),
        }
    }

    /// The timeout error for this deadline.
    pub fn timeout_error(&self) -> CheckError {
        CheckError::Timeout {
            after: self.budget.unwrap_or_default(),
        }
    }
}
