//! Backend entry-point: loads settings, prepares the store and serves the
//! retreat and booking endpoints.

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use retreat_backend::inbound::http::health::HealthState;
use retreat_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use retreat_backend::server::{ServerConfig, create_server};
use retreat_backend::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("load settings")?;
    let bind_addr = settings.bind_addr().wrap_err("parse bind address")?;
    let mut config = ServerConfig::new(bind_addr);

    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            apply_migrations(database_url.clone()).await?;
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .wrap_err("build database pool")?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(retreat_backend::server::make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}

/// Apply embedded migrations on a blocking thread.
async fn apply_migrations(database_url: String) -> Result<()> {
    let applied = web::block(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| eyre!("migration task failed: {err}"))?
        .wrap_err("apply migrations")?;
    info!(count = applied.len(), migrations = ?applied, "migrations applied");
    Ok(())
}
