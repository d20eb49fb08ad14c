//! Database driver trait and registry

use crate::{Connection, ConnectionConfig, Connector, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Core driver trait that all database drivers must implement
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Unique identifier for this driver (e.g., "postgres", "mysql", "sqlite")
    fn id(&self) -> &'static str {
        self.name()
    }

    /// Human-readable name (e.g., "PostgreSQL", "MySQL", "SQLite")
    fn name(&self) -> &'static str;

    /// Default connection port (None for file-based databases like SQLite)
    fn default_port(&self) -> Option<u16> {
        None
    }

    /// Create a new connection
    async fn connect(&self, config: &ConnectionConfig) -> Result<Arc<dyn Connection>>;

    /// Test connectivity without keeping the connection
    async fn test_connection(&self, config: &ConnectionConfig) -> Result<()> {
        let conn = self.connect(config).await?;
        conn.close().await
    }
}

/// Registry of available database drivers
pub struct DriverRegistry {
    drivers: HashMap<String, Arc<dyn DatabaseDriver>>,
}

impl DriverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// Register a new driver
    pub fn register(&mut self, driver: Arc<dyn DatabaseDriver>) {
        let id = driver.id().to_string();
        tracing::info!(driver = %id, "registering database driver");
        self.drivers.insert(id, driver);
    }

    /// Get a driver by id
    pub fn get(&self, id: &str) -> Option<Arc<dyn DatabaseDriver>> {
        let driver = self.drivers.get(id).cloned();
        if driver.is_none() {
            tracing::warn!(driver = %id, "driver not found in registry");
        }
        driver
    }

    /// List all registered driver ids
    pub fn list(&self) -> Vec<&str> {
        self.drivers.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a driver is registered
    pub fn has(&self, id: &str) -> bool {
        self.drivers.contains_key(id)
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Connector backed by a registered driver and a connection configuration.
///
/// This is the default connector a pool uses when constructed from a driver
/// registry instead of an explicit connector.
pub struct DriverConnector {
    driver: Arc<dyn DatabaseDriver>,
    config: ConnectionConfig,
}

impl DriverConnector {
    /// Create a connector that connects through `driver` with `config`
    pub fn new(driver: Arc<dyn DatabaseDriver>, config: ConnectionConfig) -> Self {
        Self { driver, config }
    }

    /// The connection configuration this connector uses
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

#[async_trait]
impl Connector for DriverConnector {
    async fn connect(&self) -> Result<Arc<dyn Connection>> {
        self.driver.connect(&self.config).await
    }
}
