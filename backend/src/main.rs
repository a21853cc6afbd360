//! Service entry-point: loads settings, prepares the review store, and serves
//! the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pr_reviewer::inbound::http::health::HealthState;
use pr_reviewer::outbound::persistence::{DbPool, redacted_database_url, run_pending_migrations};
use server::{CONNECT_RETRY_DELAY, ServerConfig, ServiceSettings, create_server};

/// Connect to PostgreSQL and bring the schema up to date.
async fn prepare_database(settings: &ServiceSettings, url: &str) -> std::io::Result<DbPool> {
    let pool = DbPool::connect_with_retry(
        settings.pool_config(url),
        settings.connect_attempts(),
        CONNECT_RETRY_DELAY,
    )
    .await
    .map_err(|err| std::io::Error::other(format!("database unavailable: {err}")))?;

    run_pending_migrations(url)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(pool)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;

    let mut config = ServerConfig::new(settings.bind_addr())
        .with_selector(settings.reviewer_selector());
    match settings.database_url() {
        Some(url) => {
            info!(database = %redacted_database_url(url), "using PostgreSQL store");
            config = config.with_db_pool(prepare_database(&settings, url).await?);
        }
        None => warn!("no database configured; review state is kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(addr = %settings.bind_addr(), "server listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
