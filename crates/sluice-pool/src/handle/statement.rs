//! Pool-lifetime prepared statement handle

use sluice_core::{QueryResult, Result, StatementResult, Value};

use crate::pool::ConnectionPool;

/// A prepared statement that outlives any single connection.
///
/// Each invocation borrows whichever connection the pool hands out next,
/// prepares the statement there, runs it, and returns the connection.
/// Construction never fails; connection problems surface on first use.
pub struct PooledStatement {
    pool: ConnectionPool,
    sql: String,
}

impl PooledStatement {
    pub(crate) fn new(pool: ConnectionPool, sql: &str) -> Self {
        Self {
            pool,
            sql: sql.to_string(),
        }
    }

    /// The SQL text this statement was created with
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Run the statement as a query
    pub async fn query(&self, params: &[Value]) -> Result<QueryResult> {
        let lease = self.pool.lease().await?;
        let stmt = lease.conn().prepare(&self.sql).await?;
        let result = stmt.query(params).await;
        let _ = stmt.close().await;
        result
    }

    /// Run the statement as a command
    pub async fn execute(&self, params: &[Value]) -> Result<StatementResult> {
        let lease = self.pool.lease().await?;
        let stmt = lease.conn().prepare(&self.sql).await?;
        let result = stmt.execute(params).await;
        let _ = stmt.close().await;
        result
    }
}
