//! Connector trait and connection configuration

use crate::{Connection, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Factory trait for creating new connections
///
/// The pool calls this whenever it decides to grow; each call must produce
/// one live connection or fail.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Create a new connection
    async fn connect(&self) -> Result<Arc<dyn Connection>>;
}

#[async_trait]
impl<T: Connector> Connector for Arc<T> {
    async fn connect(&self) -> Result<Arc<dyn Connection>> {
        (**self).connect().await
    }
}

/// Connection configuration
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Unique identifier
    pub id: uuid::Uuid,
    /// Display name
    pub name: String,
    /// Driver ID (e.g., "postgres", "mysql", "sqlite")
    pub driver: String,
    /// Host address (empty for file-based databases)
    pub host: String,
    /// Port number (0 for default or file-based)
    pub port: u16,
    /// Database name or file path
    pub database: Option<String>,
    /// Username
    pub username: Option<String>,
    /// Password (should be encrypted in storage)
    pub password: Option<String>,
    /// Additional connection parameters
    pub params: HashMap<String, String>,
}

impl ConnectionConfig {
    /// Create a new configuration with default values
    pub fn new(driver: &str, name: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            driver: driver.to_string(),
            host: String::new(),
            port: 0,
            database: None,
            username: None,
            password: None,
            params: HashMap::new(),
        }
    }

    /// Set the host and port
    pub fn with_endpoint(mut self, host: &str, port: u16) -> Self {
        self.host = host.to_string();
        self.port = port;
        self
    }

    /// Set the database name or file path
    pub fn with_database(mut self, database: &str) -> Self {
        self.database = Some(database.to_string());
        self
    }

    /// Set the credentials
    pub fn with_credentials(mut self, username: &str, password: Option<&str>) -> Self {
        self.username = Some(username.to_string());
        self.password = password.map(str::to_string);
        self
    }

    /// Set a connection parameter
    pub fn with_param(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        let val = value.into();
        let str_val = match val {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        self.params.insert(key.to_string(), str_val);
        self
    }

    /// Get a string parameter
    pub fn get_string(&self, key: &str) -> Option<String> {
        if let Some(val) = self.params.get(key) {
            return Some(val.clone());
        }
        match key {
            "host" => Some(self.host.clone()),
            "database" | "path" => self.database.clone(),
            "username" | "user" => self.username.clone(),
            "password" => self.password.clone(),
            _ => None,
        }
    }
}
