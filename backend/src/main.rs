//! Service entry-point: reads settings, wires adapters and starts the HTTP
//! server.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use acquisitions::inbound::http::health::HealthState;
use acquisitions::outbound::persistence::{DbPool, PoolConfig};
use acquisitions::settings::AppSettings;
use server::{ServerConfig, create_server};

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

    let settings = AppSettings::from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(&settings);
    if let Some(url) = settings.database_url.as_deref() {
        let pool_config = PoolConfig::new(url).with_max_size(settings.database_max_connections);
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    info!(
        environment = %settings.environment,
        bind_addr = %config.bind_addr(),
        "starting server"
    );
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
