//! Pool statistics types

use serde::{Deserialize, Serialize};

/// Snapshot of a connection pool's current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolStats {
    /// Total number of connections the pool owns (idle + borrowed)
    total: usize,
    /// Number of idle connections available for reuse
    idle: usize,
    /// Number of connections currently borrowed
    active: usize,
    /// Number of callers currently inside an acquisition
    waiting: usize,
}

impl PoolStats {
    /// Create new pool statistics
    pub fn new(total: usize, idle: usize, active: usize, waiting: usize) -> Self {
        Self {
            total,
            idle,
            active,
            waiting,
        }
    }

    /// Get the total number of owned connections
    pub fn total(&self) -> usize {
        self.total
    }

    /// Get the number of idle connections
    pub fn idle(&self) -> usize {
        self.idle
    }

    /// Get the number of borrowed connections
    pub fn active(&self) -> usize {
        self.active
    }

    /// Get the number of callers waiting on an acquisition
    pub fn waiting(&self) -> usize {
        self.waiting
    }

    /// Fraction of owned connections currently borrowed (0.0 to 1.0)
    ///
    /// Returns 0.0 for a pool that owns nothing.
    pub fn utilization(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.active as f64 / self.total as f64
        }
    }

    /// Check if every owned connection is borrowed
    pub fn is_full(&self) -> bool {
        self.total > 0 && self.active == self.total
    }
}
