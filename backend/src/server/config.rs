//! Service settings and HTTP server configuration.
//!
//! [`ServiceSettings`] is loaded with OrthoConfig from CLI flags, the
//! `PR_REVIEWER_*` environment and an optional config file. [`ServerConfig`]
//! carries the resolved runtime pieces into [`super::create_server`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use ortho_config::OrthoConfig;
use pr_reviewer::domain::{RandomReviewerSelector, ReviewerSelector, SeededReviewerSelector};
use pr_reviewer::outbound::persistence::{DbPool, PoolConfig};
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_ATTEMPTS: u32 = 10;

/// Delay between database connection attempts at startup.
pub const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Configuration values controlling the service at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PR_REVIEWER")]
pub struct ServiceSettings {
    /// PostgreSQL connection URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Address to bind.
    pub host: Option<IpAddr>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_connection_timeout_secs: Option<u64>,
    /// Attempts made while waiting for the database at startup.
    pub connect_attempts: Option<u32>,
    /// Seed for reproducible reviewer selection.
    pub reviewer_seed: Option<u64>,
}

impl ServiceSettings {
    /// Socket address built from the configured host and port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool configuration for `database_url`.
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        PoolConfig::new(database_url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)))
            .with_connection_timeout(Duration::from_secs(
                self.pool_connection_timeout_secs
                    .unwrap_or(DEFAULT_POOL_CONNECTION_TIMEOUT_SECS),
            ))
    }

    /// Number of connection attempts made at startup.
    pub fn connect_attempts(&self) -> u32 {
        self.connect_attempts.unwrap_or(DEFAULT_CONNECT_ATTEMPTS)
    }

    /// Reviewer selector honouring `reviewer_seed`.
    pub fn reviewer_selector(&self) -> Arc<dyn ReviewerSelector> {
        match self.reviewer_seed {
            Some(seed) => Arc::new(SeededReviewerSelector::new(seed)),
            None => Arc::new(RandomReviewerSelector),
        }
    }
}

/// Store backing the review endpoints.
#[derive(Clone)]
pub enum ReviewBackend {
    /// PostgreSQL through the Diesel adapters.
    Postgres(DbPool),
    /// Process-local store; state is lost on restart.
    InMemory,
}

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) backend: ReviewBackend,
    pub(crate) selector: Arc<dyn ReviewerSelector>,
}

impl ServerConfig {
    /// Serve on `bind_addr` from the in-memory store with random selection.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            backend: ReviewBackend::InMemory,
            selector: Arc::new(RandomReviewerSelector),
        }
    }

    /// Serve from PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.backend = ReviewBackend::Postgres(pool);
        self
    }

    /// Replace the reviewer selector.
    #[must_use]
    pub fn with_selector(mut self, selector: Arc<dyn ReviewerSelector>) -> Self {
        self.selector = selector;
        self
    }
}
