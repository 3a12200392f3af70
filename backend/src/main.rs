//! Backend entry-point: loads settings, migrates the store, provisions the
//! admin account and serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookshelf::bootstrap::{AppSettings, provision_admin_on_startup};
use bookshelf::outbound::persistence::{DbPool, run_migrations};
use server::{ServerConfig, build_health_state, build_services, create_server};

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

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let database_url = settings.database_url()?;
    let bind_addr = settings.bind_addr()?;

    let applied = run_migrations(database_url)
        .await
        .wrap_err("failed to apply database migrations")?;
    info!(applied, "database migrations complete");

    let pool = DbPool::new(settings.pool_config()?)
        .await
        .wrap_err("failed to build database pool")?;
    let services = build_services(&pool, settings.argon2_config())
        .wrap_err("invalid password hashing parameters")?;

    provision_admin_on_startup(&settings, &services.accounts)
        .await
        .map_err(|err| eyre!("admin provisioning failed: {err}"))?;

    let health_state = web::Data::new(build_health_state(&pool));
    let server = create_server(health_state, ServerConfig::new(bind_addr, services))
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "listening");
    server.await.wrap_err("server terminated with an error")
}
