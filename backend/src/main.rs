//! Roster entry-point: loads settings, prepares storage and serves the pages.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster::inbound::http::health::HealthState;
use roster::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use roster::settings::RosterSettings;
use server::{ServerConfig, create_server};

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

    let settings = RosterSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load roster settings")?;
    let mut config = ServerConfig::from_settings(&settings);

    match settings.database_url() {
        Some(database_url) => {
            run_migrations(database_url)
                .await
                .wrap_err("failed to apply database migrations")?;
            let pool = DbPool::new(
                PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
            )
            .await
            .wrap_err("failed to build database pool")?;
            config = config.with_db_pool(pool);
        }
        None => warn!("ROSTER_DATABASE_URL is not set; records will not survive a restart"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(
        bind_addr = %config.bind_addr(),
        media_root = %settings.media_root().display(),
        "starting roster server"
    );
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    server.await.wrap_err("server terminated with an error")
}
