//! Release-once lease around a borrowed connection

use std::sync::Arc;

use sluice_core::Connection;

use crate::pool::PoolInner;

/// Exclusive borrow of one pool-owned connection.
///
/// The connection is released back to the pool exactly once, when the
/// lease is dropped. `detach` takes the connection out instead, for callers
/// that are removing it from pool ownership.
pub(crate) struct ConnectionLease {
    conn: Option<Arc<dyn Connection>>,
    pool: Arc<PoolInner>,
}

impl ConnectionLease {
    pub(crate) fn new(pool: Arc<PoolInner>, conn: Arc<dyn Connection>) -> Self {
        Self {
            conn: Some(conn),
            pool,
        }
    }

    pub(crate) fn conn(&self) -> &Arc<dyn Connection> {
        self.conn.as_ref().expect("connection taken")
    }

    /// Take the connection out without releasing it back to the pool
    pub(crate) fn detach(mut self) -> Arc<dyn Connection> {
        self.conn.take().expect("connection taken")
    }
}

impl Drop for ConnectionLease {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.pool.release(conn);
        }
    }
}
