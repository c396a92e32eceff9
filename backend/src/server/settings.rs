//! Server settings loaded via OrthoConfig.
//!
//! Layers merge defaults, an optional config file, `SNIPPETBOX_*` environment
//! variables and command-line flags, later layers winning.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DEFAULT_CHECKOUT_TIMEOUT, DEFAULT_MAX_SIZE};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was configured.
    #[error("SNIPPETBOX_DATABASE_URL (or --database-url) must be set")]
    MissingDatabaseUrl,
    /// The bind address does not parse.
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Listener, database and startup settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SNIPPETBOX")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Seconds a request may wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving; on unless set to `false`.
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    /// Configured bind address, defaulting to `0.0.0.0:4000`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Configured database URL; there is no default.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Pool size, never below one.
    pub fn pool_max_size(&self) -> u32 {
        if self.pool_max_size == 0 {
            DEFAULT_MAX_SIZE
        } else {
            self.pool_max_size
        }
    }

    /// Pool checkout timeout.
    pub fn pool_timeout(&self) -> Duration {
        self.pool_timeout_secs
            .map_or(DEFAULT_CHECKOUT_TIMEOUT, Duration::from_secs)
    }

    /// Whether embedded migrations run at startup, defaulting to `true`.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}
