//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::db::PoolSettings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub http_port: u16,
    pub grpc_port: u16,
    pub catalog_service_url: String,
    pub customer_service_url: String,
    /// Connect and per-call timeout for the catalog and customer services.
    pub remote_timeout: Duration,
    pub pool: PoolSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let string_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        Ok(Self {
            database_url,
            host: string_or("HOST", "0.0.0.0"),
            http_port: parse_or(&lookup, "HTTP_PORT", 8080)?,
            grpc_port: parse_or(&lookup, "GRPC_PORT", 8083)?,
            catalog_service_url: string_or("CATALOG_SERVICE_URL", "http://localhost:8081"),
            customer_service_url: string_or("CUSTOMER_SERVICE_URL", "http://localhost:8082"),
            remote_timeout: Duration::from_millis(positive_or(&lookup, "REMOTE_TIMEOUT_MS", 3000)?),
            pool: PoolSettings {
                max_size: positive_or(&lookup, "DB_POOL_SIZE", 10)?,
                statement_timeout: Duration::from_millis(positive_or(
                    &lookup,
                    "DB_STATEMENT_TIMEOUT_MS",
                    5000,
                )?),
            },
        })
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn grpc_addr(&self) -> String {
        format!("{}:{}", self.host, self.grpc_port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

/// Like `parse_or`, but zero is rejected.
fn positive_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialEq + Default,
{
    let value = parse_or(lookup, name, default)?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            name,
            value: lookup(name).unwrap_or_default(),
        });
    }
    Ok(value)
}
