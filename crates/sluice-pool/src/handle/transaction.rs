//! Transaction handle that returns its connection on conclusion

use sluice_core::{QueryResult, Result, StatementResult, Transaction, Value};

use super::lease::ConnectionLease;

/// A transaction running on a borrowed connection.
///
/// The connection goes back to the pool exactly once: after `commit`,
/// after `rollback`, or when the handle is dropped unconcluded (the
/// driver-side transaction then rolls back on its own drop).
pub struct PooledTransaction {
    tx: Option<Box<dyn Transaction>>,
    _lease: ConnectionLease,
}

impl std::fmt::Debug for PooledTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledTransaction")
            .field("concluded", &self.tx.is_none())
            .finish()
    }
}

impl PooledTransaction {
    pub(crate) fn new(tx: Box<dyn Transaction>, lease: ConnectionLease) -> Self {
        Self {
            tx: Some(tx),
            _lease: lease,
        }
    }

    fn tx(&self) -> &dyn Transaction {
        self.tx.as_deref().expect("transaction concluded")
    }

    /// Execute a query within the transaction
    pub async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        self.tx().query(sql, params).await
    }

    /// Execute a statement within the transaction
    pub async fn execute(&self, sql: &str, params: &[Value]) -> Result<StatementResult> {
        self.tx().execute(sql, params).await
    }

    /// Commit and return the connection to the pool
    pub async fn commit(mut self) -> Result<()> {
        let tx = self.tx.take().expect("transaction concluded");
        tx.commit().await
    }

    /// Roll back and return the connection to the pool
    pub async fn rollback(mut self) -> Result<()> {
        let tx = self.tx.take().expect("transaction concluded");
        tx.rollback().await
    }
}
