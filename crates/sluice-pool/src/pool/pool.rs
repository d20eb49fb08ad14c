//! Connection pool implementation

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use sluice_core::{
    Connection, ConnectionConfig, Connector, DriverConnector, DriverRegistry, IsolationLevel,
    QueryResult, Result, SluiceError, StatementResult, Value,
};
use tokio::sync::Notify;

use super::config::PoolConfig;
use super::stats::PoolStats;
use crate::handle::{ConnectionLease, PooledStatement, PooledTransaction};

/// How often the idle sweeper wakes up
const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Pool-private mutable state, guarded by one mutex.
///
/// Invariants: `owned.len()` never exceeds the configured maximum, every
/// idle connection is a member of `owned`, and a borrowed connection is in
/// `owned` but not in `idle`.
struct PoolState {
    /// Every connection the pool currently owns
    owned: Vec<Arc<dyn Connection>>,
    /// Unborrowed connections; releases push to the back, reuse pops the front
    idle: VecDeque<Arc<dyn Connection>>,
    /// Whether an acquisition is suspended waiting for a release
    waiter: bool,
}

impl PoolState {
    fn disown(&mut self, conn: &Arc<dyn Connection>) {
        self.owned.retain(|c| !Arc::ptr_eq(c, conn));
    }

    fn owns(&self, conn: &Arc<dyn Connection>) -> bool {
        self.owned.iter().any(|c| Arc::ptr_eq(c, conn))
    }
}

/// What the coordinator decided to do for one pass of the acquire loop
enum Step {
    Reuse(Arc<dyn Connection>),
    Connect,
    Wait,
}

pub(crate) struct PoolInner {
    config: PoolConfig,
    connector: Arc<dyn Connector>,
    state: Mutex<PoolState>,
    /// Holding this lock is the single in-flight acquisition slot; everyone
    /// else queues behind it and re-evaluates from scratch on their turn.
    acquire_gate: tokio::sync::Mutex<()>,
    /// Signals "idle registry changed" to the pending waiter
    released: Notify,
    closed: AtomicBool,
    /// Callers currently inside `acquire`
    waiting: AtomicUsize,
}

impl PoolInner {
    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Borrow one live connection.
    ///
    /// Acquisitions are serialized pool-wide: the gate holder is the one
    /// in-flight acquisition, whether it is contacting the database or
    /// waiting for capacity.
    pub(crate) async fn acquire(&self) -> Result<Arc<dyn Connection>> {
        if self.is_closed() {
            return Err(SluiceError::Closed);
        }

        self.waiting.fetch_add(1, Ordering::SeqCst);
        let result = self.acquire_serialized().await;
        self.waiting.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn acquire_serialized(&self) -> Result<Arc<dyn Connection>> {
        let _turn = self.acquire_gate.lock().await;
        if self.is_closed() {
            return Err(SluiceError::Closed);
        }

        loop {
            let mut dead: Vec<Arc<dyn Connection>> = Vec::new();
            let step = {
                let mut state = self.state.lock();
                state.waiter = false;
                loop {
                    match state.idle.pop_front() {
                        Some(conn) => {
                            if conn.is_alive() {
                                break Step::Reuse(conn);
                            }
                            state.disown(&conn);
                            dead.push(conn);
                        }
                        None => {
                            if state.owned.len() < self.config.max_connections() {
                                break Step::Connect;
                            }
                            state.waiter = true;
                            break Step::Wait;
                        }
                    }
                }
            };

            for conn in dead {
                tracing::debug!(driver = %conn.driver_name(), "dropping dead idle connection");
                let _ = conn.close().await;
            }

            match step {
                Step::Reuse(conn) => return Ok(conn),
                Step::Connect => {
                    let conn = self.connector.connect().await?;
                    if self.is_closed() {
                        // The pool closed underneath us while connecting.
                        let _ = conn.close().await;
                        return Err(SluiceError::Closed);
                    }
                    let mut state = self.state.lock();
                    state.owned.push(conn.clone());
                    tracing::debug!(
                        driver = %conn.driver_name(),
                        total = state.owned.len(),
                        "connection created"
                    );
                    return Ok(conn);
                }
                Step::Wait => {
                    self.released.notified().await;
                    if self.is_closed() {
                        return Err(SluiceError::Closed);
                    }
                }
            }
        }
    }

    /// Return a borrowed connection.
    ///
    /// Synchronous, never blocks, never fails. After close this is a no-op:
    /// the pool has already force-closed and disowned everything it held.
    /// While the pool is open, releasing a connection it does not own is an
    /// invariant violation and panics.
    pub(crate) fn release(&self, conn: Arc<dyn Connection>) {
        let mut state = self.state.lock();
        if self.is_closed() {
            return;
        }
        assert!(
            state.owns(&conn),
            "released a connection the pool does not own"
        );
        if conn.is_alive() {
            state.idle.push_back(conn);
        } else {
            tracing::debug!(driver = %conn.driver_name(), "discarding dead connection on release");
            state.disown(&conn);
        }
        if state.waiter {
            self.released.notify_one();
        }
    }

    /// Permanently remove a borrowed connection from pool ownership
    pub(crate) fn forget(&self, conn: &Arc<dyn Connection>) {
        let mut state = self.state.lock();
        state.disown(conn);
    }

    async fn close(&self) {
        let conns = {
            let mut state = self.state.lock();
            if self.closed.swap(true, Ordering::SeqCst) {
                return;
            }
            state.idle.clear();
            std::mem::take(&mut state.owned)
        };
        // Resolve the pending waiter, if any, into a pool-closed error.
        self.released.notify_one();
        tracing::info!(count = conns.len(), "closing connection pool");
        for conn in conns {
            let _ = conn.close().await;
        }
    }

    /// Evict idle connections unused past the idle timeout.
    ///
    /// Scans from the release-insertion end and stops at the first
    /// connection still within the timeout, so a longer-idle connection
    /// further along the list survives until the ones released after it
    /// expire too.
    async fn sweep_idle(&self) {
        let now = Utc::now();
        let timeout = chrono::Duration::seconds(self.config.idle_timeout_secs() as i64);
        let expired = {
            let mut state = self.state.lock();
            let mut expired = Vec::new();
            loop {
                let past_timeout = match state.idle.back() {
                    Some(conn) => now.signed_duration_since(conn.last_used_at()) > timeout,
                    None => false,
                };
                if !past_timeout {
                    break;
                }
                if let Some(conn) = state.idle.pop_back() {
                    state.disown(&conn);
                    expired.push(conn);
                }
            }
            expired
        };
        for conn in expired {
            tracing::debug!(driver = %conn.driver_name(), "evicting idle connection past timeout");
            let _ = conn.close().await;
        }
    }

    fn stats(&self) -> PoolStats {
        let (total, idle) = {
            let state = self.state.lock();
            (state.owned.len(), state.idle.len())
        };
        let waiting = self.waiting.load(Ordering::SeqCst);
        PoolStats::new(total, idle, total - idle, waiting)
    }
}

fn spawn_sweeper(inner: &Arc<PoolInner>) {
    let weak = Arc::downgrade(inner);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let Some(pool) = weak.upgrade() else { break };
            if pool.is_closed() {
                break;
            }
            pool.sweep_idle().await;
        }
    });
}

/// A connection pool that manages a set of database connections
///
/// The pool owns every connection it creates; callers borrow one around
/// each operation and the pool takes it back when the operation's result,
/// statement, or transaction is done. Cloning the pool is cheap and clones
/// share the same connections.
#[derive(Clone)]
pub struct ConnectionPool {
    inner: Arc<PoolInner>,
}

impl ConnectionPool {
    /// Create a new pool with the given configuration and connector
    ///
    /// Must be called from within a Tokio runtime; the pool spawns its idle
    /// sweeper on creation. Fails with a configuration error if the
    /// configuration is invalid.
    pub fn new<C: Connector>(config: PoolConfig, connector: C) -> Result<Self> {
        config.validate()?;
        let inner = Arc::new(PoolInner {
            connector: Arc::new(connector),
            state: Mutex::new(PoolState {
                owned: Vec::new(),
                idle: VecDeque::new(),
                waiter: false,
            }),
            acquire_gate: tokio::sync::Mutex::new(()),
            released: Notify::new(),
            closed: AtomicBool::new(false),
            waiting: AtomicUsize::new(0),
            config,
        });
        spawn_sweeper(&inner);
        tracing::info!(
            max_connections = inner.config.max_connections(),
            idle_timeout_secs = inner.config.idle_timeout_secs(),
            "connection pool created"
        );
        Ok(Self { inner })
    }

    /// Create a pool whose connections come from a registered driver
    pub fn for_driver(
        registry: &DriverRegistry,
        conn_config: ConnectionConfig,
        pool_config: PoolConfig,
    ) -> Result<Self> {
        let driver = registry
            .get(&conn_config.driver)
            .ok_or_else(|| SluiceError::Driver(format!("Unknown driver: {}", conn_config.driver)))?;
        Self::new(pool_config, DriverConnector::new(driver, conn_config))
    }

    /// Borrow a connection wrapped in a release-once lease
    pub(crate) async fn lease(&self) -> Result<ConnectionLease> {
        let conn = self.inner.acquire().await?;
        Ok(ConnectionLease::new(self.inner.clone(), conn))
    }

    /// Run a query on the next available connection
    pub async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let lease = self.lease().await?;
        lease.conn().query(sql, params).await
    }

    /// Run a statement on the next available connection
    pub async fn execute(&self, sql: &str, params: &[Value]) -> Result<StatementResult> {
        let lease = self.lease().await?;
        lease.conn().execute(sql, params).await
    }

    /// Prepare a statement valid for the lifetime of the pool
    ///
    /// Never fails synchronously; each invocation of the returned handle
    /// borrows whichever connection is next available and prepares there,
    /// so connection problems surface on first use.
    pub fn prepare(&self, sql: &str) -> PooledStatement {
        PooledStatement::new(self.clone(), sql)
    }

    /// Begin a transaction on a borrowed connection
    ///
    /// The connection goes back to the pool when the transaction is
    /// committed, rolled back, or dropped.
    pub async fn begin_transaction(&self, isolation: IsolationLevel) -> Result<PooledTransaction> {
        let lease = self.lease().await?;
        let tx = lease.conn().begin_transaction(isolation).await?;
        Ok(PooledTransaction::new(tx, lease))
    }

    /// Permanently remove one connection from pool ownership
    ///
    /// The connection is borrowed through the normal acquisition path and
    /// then handed to the caller outright; the pool forgets it and will not
    /// count, sweep, or close it again.
    pub async fn extract_connection(&self) -> Result<Arc<dyn Connection>> {
        let lease = self.lease().await?;
        let conn = lease.detach();
        self.inner.forget(&conn);
        tracing::debug!(driver = %conn.driver_name(), "connection extracted from pool");
        Ok(conn)
    }

    /// Number of connections the pool currently owns
    pub fn connection_count(&self) -> usize {
        self.inner.state.lock().owned.len()
    }

    /// Number of idle connections available for reuse
    pub fn idle_connection_count(&self) -> usize {
        self.inner.state.lock().idle.len()
    }

    /// Configured maximum connection count
    pub fn connection_limit(&self) -> usize {
        self.inner.config.max_connections()
    }

    /// Configured idle timeout
    pub fn idle_timeout(&self) -> Duration {
        self.inner.config.idle_timeout()
    }

    /// Most recent activity timestamp across all owned connections
    pub fn last_used_at(&self) -> Option<DateTime<Utc>> {
        let state = self.inner.state.lock();
        state.owned.iter().map(|c| c.last_used_at()).max()
    }

    /// Whether the pool is still open for borrowing
    pub fn is_alive(&self) -> bool {
        !self.inner.is_closed()
    }

    /// Get current pool statistics
    pub fn stats(&self) -> PoolStats {
        self.inner.stats()
    }

    /// Close the pool
    ///
    /// Idempotent. Marks the pool closed, force-closes every owned
    /// connection (borrowed ones are closed out from under their callers),
    /// and resolves a pending waiter into a pool-closed error. All
    /// subsequent borrows fail.
    pub async fn close(&self) {
        self.inner.close().await;
    }
}
