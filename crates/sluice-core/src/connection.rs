//! Connection, transaction, and prepared statement traits

use crate::{IsolationLevel, QueryResult, Result, StatementResult, Value};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A live database connection.
///
/// Implementations are provided by drivers. A connection created for a pool
/// is owned by that pool for its whole life; callers only ever borrow it.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "sqlite", "postgresql", "mysql")
    fn driver_name(&self) -> &str;

    /// Execute a query that returns rows (SELECT)
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Execute a statement that modifies data (INSERT/UPDATE/DELETE)
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<StatementResult>;

    /// Prepare a statement on this connection
    async fn prepare(&self, sql: &str) -> Result<Box<dyn PreparedStatement>>;

    /// Begin a transaction at the given isolation level
    async fn begin_transaction(&self, isolation: IsolationLevel) -> Result<Box<dyn Transaction>>;

    /// Close the connection
    async fn close(&self) -> Result<()>;

    /// Whether the connection is still usable.
    ///
    /// A connection that reports `false` is dropped by the pool instead of
    /// being handed out again.
    fn is_alive(&self) -> bool;

    /// When this connection last ran an operation.
    ///
    /// Updated by the connection itself on use; the idle sweeper compares
    /// this against the configured idle timeout.
    fn last_used_at(&self) -> DateTime<Utc>;
}

/// A database transaction
#[async_trait]
pub trait Transaction: Send + Sync {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;

    /// Execute a query within the transaction
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Execute a statement within the transaction
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<StatementResult>;
}

/// A prepared statement
#[async_trait]
pub trait PreparedStatement: Send + Sync {
    /// Query the prepared statement with parameters
    async fn query(&self, params: &[Value]) -> Result<QueryResult>;

    /// Execute the prepared statement with parameters
    async fn execute(&self, params: &[Value]) -> Result<StatementResult>;

    /// Close/deallocate the prepared statement
    async fn close(self: Box<Self>) -> Result<()>;
}
