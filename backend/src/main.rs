//! Portal entry-point: loads configuration, prepares storage and serves the API.

mod server;

use std::time::Duration;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use portal::inbound::http::health::HealthState;
use portal::inbound::http::session_config::{BuildMode, session_settings_from_env};
use portal::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{PortalConfig, ServerConfig, create_server};

const DB_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

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

    let settings = PortalConfig::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let session = session_settings_from_env(&mockable::DefaultEnv::new(), BuildMode::current())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr()?;

    let mut config =
        ServerConfig::new(session, bind_addr).with_admin_password(settings.admin_password.clone());
    if let Some(url) = settings.database_url.as_deref() {
        config = config.with_db_pool(connect(url, settings.db_max_connections).await?);
    } else {
        warn!("PORTAL_DATABASE_URL unset; data lives in memory and is lost on exit");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config).await?;
    info!(%bind_addr, "portal listening");
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}

async fn connect(url: &str, max_connections: Option<u32>) -> std::io::Result<DbPool> {
    run_migrations(url).await.map_err(std::io::Error::other)?;
    let mut pool_config = PoolConfig::new(url).with_connection_timeout(DB_CONNECT_TIMEOUT);
    if let Some(max) = max_connections {
        pool_config = pool_config.with_max_size(max);
    }
    DbPool::new(pool_config).await.map_err(std::io::Error::other)
}
