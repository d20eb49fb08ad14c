//! Pool configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sluice_core::{Result, SluiceError};

/// Configuration for a connection pool
///
/// Controls how many connections the pool may own and how long an
/// unborrowed connection may sit idle before the sweeper closes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum number of connections the pool may own
    max_connections: usize,
    /// Seconds an unborrowed connection may sit idle before eviction
    idle_timeout_secs: u64,
}

impl PoolConfig {
    /// Create a new pool configuration
    pub fn new(max_connections: usize, idle_timeout_secs: u64) -> Self {
        Self {
            max_connections,
            idle_timeout_secs,
        }
    }

    /// Set the maximum connection count
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Set the idle timeout in seconds
    pub fn with_idle_timeout_secs(mut self, idle_timeout_secs: u64) -> Self {
        self.idle_timeout_secs = idle_timeout_secs;
        self
    }

    /// Check the configuration for fatal errors
    pub fn validate(&self) -> Result<()> {
        if self.max_connections < 1 {
            return Err(SluiceError::Configuration(format!(
                "max_connections must be at least 1, got {}",
                self.max_connections
            )));
        }
        if self.idle_timeout_secs < 1 {
            return Err(SluiceError::Configuration(format!(
                "idle_timeout_secs must be at least 1, got {}",
                self.idle_timeout_secs
            )));
        }
        Ok(())
    }

    /// Get the maximum connection count
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// Get the idle timeout in whole seconds
    pub fn idle_timeout_secs(&self) -> u64 {
        self.idle_timeout_secs
    }

    /// Get the idle timeout as a Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for PoolConfig {
    /// Create a default pool configuration
    ///
    /// Defaults:
    /// - max_connections: 100
    /// - idle_timeout: 60 seconds
    fn default() -> Self {
        Self::new(100, 60)
    }
}
