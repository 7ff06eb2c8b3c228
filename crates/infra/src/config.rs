//! Configuration loading and representation.
//!
//! Everything comes from environment variables; unset keys fall back to dev
//! defaults. [`GateConfig::from_lookup`] takes any key lookup so tests don't
//! have to touch the process environment.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "TIERGATE_BIND_ADDR";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const LOOKUP_TIMEOUT_VAR: &str = "TIERGATE_LOOKUP_TIMEOUT_MS";
pub const DB_MAX_CONNECTIONS_VAR: &str = "TIERGATE_DB_MAX_CONNECTIONS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration for the stock gate and its HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Address the API binds to.
    pub bind_addr: SocketAddr,
    /// Inventory database. `None` means serve from an in-memory store.
    pub database_url: Option<String>,
    /// Default deadline for one stock lookup.
    pub lookup_timeout: Duration,
    pub db_max_connections: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: None,
            lookup_timeout: Duration::from_millis(2000),
            db_max_connections: 5,
        }
    }
}

impl GateConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_empty(lookup(BIND_ADDR_VAR)) {
            config.bind_addr = parse(BIND_ADDR_VAR, &raw)?;
        }

        config.database_url = non_empty(lookup(DATABASE_URL_VAR));

        if let Some(raw) = non_empty(lookup(LOOKUP_TIMEOUT_VAR)) {
            let millis: u64 = parse(LOOKUP_TIMEOUT_VAR, &raw)?;
            if millis == 0 {
                return Err(invalid(LOOKUP_TIMEOUT_VAR, &raw, "must be greater than zero"));
            }
            config.lookup_timeout = Duration::from_millis(millis);
        }

        if let Some(raw) = non_empty(lookup(DB_MAX_CONNECTIONS_VAR)) {
            let max: u32 = parse(DB_MAX_CONNECTIONS_VAR, &raw)?;
            if max == 0 {
                return Err(invalid(DB_MAX_CONNECTIONS_VAR, &raw, "must be greater than zero"));
            }
            config.db_max_connections = max;
        }

        Ok(config)
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| invalid(key, raw, &e.to_string()))
}

fn invalid(key: &'static str, raw: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}
