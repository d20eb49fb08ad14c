//! Sluice Pool - Driver-agnostic async connection pooling
//!
//! This crate multiplexes many logical requests over a bounded set of live
//! database connections. It handles acquisition, release, and time-based
//! eviction; the concrete connections come from a [`sluice_core::Connector`]
//! supplied at construction.

pub mod handle;
pub mod pool;

pub use handle::{PooledStatement, PooledTransaction};
pub use pool::{ConnectionPool, PoolConfig, PoolStats};
