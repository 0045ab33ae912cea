use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// Which post store the service runs against, derived from `DATABASE_URL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres(String),
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() || url == "memory" || url.starts_with("memory://") {
            return Ok(StoreBackend::Memory);
        }
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            return Ok(StoreBackend::Postgres(url.to_string()));
        }
        Err(anyhow!(
            "Unsupported DATABASE_URL scheme (expected memory:// or postgres://): {}",
            url
        ))
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Postgres(_) => write!(f, "postgres"),
        }
    }
}
