//! Connection pooling for database connections
//!
//! This module provides the pool itself: bounded admission, serialized
//! acquisition, idle-connection reuse, and a background sweeper that closes
//! connections unused past the configured idle timeout.
//!
//! # Example
//!
//! ```ignore
//! use sluice_pool::{ConnectionPool, PoolConfig};
//!
//! let config = PoolConfig::new(20, 300);
//!
//! let pool = ConnectionPool::new(config, connector)?;
//! let rows = pool.query("SELECT * FROM users", &[]).await?;
//! ```

mod config;
mod pool;
mod stats;


pub use config::PoolConfig;
pub use pool::ConnectionPool;
pub use stats::PoolStats;

pub(crate) use pool::PoolInner;
