//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BOOKSHELF_*` environment variables and an
//! optional configuration file, in increasing order of precedence.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::outbound::hashing::Argon2Config;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Settings errors surfaced before the server starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("database_url is required (set BOOKSHELF_DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("host '{value}' is not a valid IP address")]
    InvalidHost { value: String },
}

/// Runtime configuration for the bookshelf server.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKSHELF")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Listen address.
    pub host: Option<String>,
    /// Listen port.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Username of the account provisioned on first run.
    pub admin_username: Option<String>,
    /// Password for the provisioned account. Provisioning is skipped when unset.
    pub admin_password: Option<String>,
    /// Argon2 memory cost in KiB.
    pub hash_memory_kib: Option<u32>,
    /// Argon2 iteration count.
    pub hash_iterations: Option<u32>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("pool_max_size", &self.pool_max_size)
            .field("admin_username", &self.admin_username)
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "<redacted>"),
            )
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("hash_iterations", &self.hash_iterations)
            .finish()
    }
}

impl AppSettings {
    /// Return the database URL or fail when it was not configured.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Resolve the socket address to bind, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = match self.host.as_deref() {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| SettingsError::InvalidHost {
                    value: raw.to_owned(),
                })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn admin_username(&self) -> &str {
        self.admin_username
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_USERNAME)
    }

    pub fn admin_password(&self) -> Option<&str> {
        self.admin_password.as_deref()
    }

    /// Pool settings for `database_url`.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)))
    }

    /// Argon2 cost parameters, falling back to the library defaults.
    pub fn argon2_config(&self) -> Argon2Config {
        let mut config = Argon2Config::default();
        if let Some(memory_kib) = self.hash_memory_kib {
            config = config.with_memory_kib(memory_kib);
        }
        if let Some(iterations) = self.hash_iterations {
            config = config.with_iterations(iterations);
        }
        config
    }
}
