use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub mod store;
pub use store::StoreBackend;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Store used by the test harness; falls back to `database_url` when unset
    pub test_database_url: Option<String>,
    pub max_connections: u32,
    /// Request timeout in seconds
    pub request_timeout: u64,
    pub log_format: LogFormat,
    pub metrics_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("Invalid LOG_FORMAT: {}", other)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "memory://".to_string(),
            test_database_url: None,
            max_connections: 10,
            request_timeout: 30,
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            test_database_url: lookup("TEST_DATABASE_URL").filter(|url| !url.is_empty()),
            max_connections: parse_or(&lookup, "MAX_CONNECTIONS", defaults.max_connections)?,
            request_timeout: parse_or(&lookup, "REQUEST_TIMEOUT", defaults.request_timeout)?,
            log_format: parse_or(&lookup, "LOG_FORMAT", defaults.log_format)?,
            metrics_enabled: parse_or(&lookup, "METRICS_ENABLED", defaults.metrics_enabled)?,
        })
    }

    /// Config for an in-process test server: ephemeral port, no metrics recorder.
    pub fn for_tests() -> Self {
        let test_database_url = env::var("TEST_DATABASE_URL").ok().filter(|url| !url.is_empty());
        Self {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: test_database_url
                .clone()
                .unwrap_or_else(|| "memory://".to_string()),
            test_database_url,
            metrics_enabled: false,
            ..Default::default()
        }
    }

    pub fn store_backend(&self) -> Result<StoreBackend> {
        self.database_url.parse()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}
