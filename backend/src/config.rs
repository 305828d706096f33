//! Service settings loaded via OrthoConfig.
//!
//! Values come from `API_*` environment variables, matching CLI flags, or a
//! configuration file, layered by `ortho_config`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 6778);
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;

/// Runtime settings for the user registry service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "API")]
pub struct ServiceSettings {
    /// Connection string for the primary (write) database.
    pub db_primary_url: String,
    /// Connection string for reads; reads share the primary when absent.
    pub db_replica_url: Option<String>,
    /// Socket address the HTTP listener binds.
    pub bind_addr: Option<SocketAddr>,
    /// Upper bound on pooled connections per database target.
    pub pool_max_size: Option<u32>,
    /// Per-call registry deadline in milliseconds.
    pub query_timeout_ms: Option<u64>,
    /// Leave the schema untouched at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
    /// Raise the default log level to `debug`.
    #[ortho_config(default = false)]
    pub debug: bool,
}

impl ServiceSettings {
    /// Return the listener address, falling back to `0.0.0.0:6778`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the pool size, falling back to 10.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Return the per-call registry deadline, falling back to five seconds.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms.unwrap_or(DEFAULT_QUERY_TIMEOUT_MS))
    }

    /// Pool configuration for the primary database.
    pub fn primary_pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.db_primary_url.as_str()).with_max_size(self.pool_max_size())
    }

    /// Pool configuration for the replica, when one is configured.
    pub fn replica_pool_config(&self) -> Option<PoolConfig> {
        self.db_replica_url
            .as_deref()
            .map(|url| PoolConfig::new(url).with_max_size(self.pool_max_size()))
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}
