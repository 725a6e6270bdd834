//! Search configuration for the itinerary planner.

use chrono::Duration;

/// Longest wait allowed between landing and the next take-off (seconds).
///
/// This is booking policy, not a tunable: a connection more than a day
/// later is treated as two separate trips.
pub const MAX_LAYOVER_SECS: i64 = 24 * 60 * 60;

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Wall-clock budget for one search (seconds).
    /// Searches running longer than this fail with a timeout.
    pub deadline_secs: u64,

    /// How many candidates to pop between deadline checks.
    pub deadline_check_interval: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(deadline_secs: u64, deadline_check_interval: usize) -> Self {
        Self {
            deadline_secs,
            deadline_check_interval,
        }
    }

    /// Returns the search deadline as a std Duration.
    pub fn deadline(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.deadline_secs)
    }

    /// Returns the check interval, never less than one.
    pub fn check_interval(&self) -> usize {
        self.deadline_check_interval.max(1)
    }

    /// Returns the maximum layover as a Duration.
    pub fn max_layover(&self) -> Duration {
        Duration::seconds(MAX_LAYOVER_SECS)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            deadline_secs: 30,
            deadline_check_interval: 64,
        }
    }
}
