//! Configuration loading and management
//!
//! The service carries no on-disk configuration; the only tunable is the
//! network bind address, taken from the environment at startup.

use std::net::SocketAddr;

use crate::core::error::ConfigError;

/// Environment variable naming the bind address.
pub const BIND_ADDR_VAR: &str = "MICROBLOG_ADDR";

/// Default bind address when the environment does not override it.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4000";

/// Runtime configuration for the server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_bind_addr(std::env::var(BIND_ADDR_VAR).ok())
    }

    /// Build configuration from an optional bind address override.
    pub fn from_bind_addr(addr: Option<String>) -> Result<Self, ConfigError> {
        let value = addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = value
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBindAddr {
                value,
                message: e.to_string(),
            })?;

        Ok(Self { bind_addr })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .expect("default bind address is valid"),
        }
    }
}
