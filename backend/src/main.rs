//! Backend entry-point: loads configuration, selects storage and serves the
//! REST API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use feed_backend::inbound::http::health::HealthState;
use feed_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use feed_backend::settings::{RateLimitSettings, ServerSettings};
use server::{ServerConfig, create_server, drain_on, termination_signal};

const PROGRAM_NAME: &str = "feedd";

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

    let rate_limit = RateLimitSettings::load_from_iter([OsString::from(PROGRAM_NAME)])
        .map_err(|e| std::io::Error::other(format!("invalid rate limit settings: {e}")))?
        .to_config();
    let settings = ServerSettings::load_from_iter([OsString::from(PROGRAM_NAME)])
        .map_err(|e| std::io::Error::other(format!("invalid server settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let mut config = ServerConfig::new(bind_addr, rate_limit);
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect_database(database_url, settings.db_pool_size).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(termination_signal(), server.handle(), health_state));
    info!(%bind_addr, "listening");
    server.await
}

/// Apply migrations and open the connection pool.
async fn connect_database(database_url: &str, pool_size: Option<u32>) -> std::io::Result<DbPool> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || run_migrations(&url))
        .await
        .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let mut pool_config = PoolConfig::new(database_url);
    if let Some(size) = pool_size {
        pool_config = pool_config.with_max_size(size);
    }
    DbPool::new(pool_config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))
}

