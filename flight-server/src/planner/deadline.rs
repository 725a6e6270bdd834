//! Per-request search deadline.

use std::time::{Duration, Instant};

/// Point in time after which a search must give up.
///
/// Passed explicitly into the enumerator rather than read from ambient
/// state, so each request carries its own budget.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// A deadline `budget` from now.
    ///
    /// A budget too large to represent never expires.
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now().checked_add(budget),
        }
    }

    /// A deadline at a fixed instant.
    pub fn at(instant: Instant) -> Self {
        Self {
            expires_at: Some(instant),
        }
    }

    /// A deadline that never expires.
    pub fn never() -> Self {
        Self { expires_at: None }
    }

    /// Returns true once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}
