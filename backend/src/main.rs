//! User registry entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_registry::config::ServiceSettings;
use user_registry::inbound::http::health::HealthState;
use user_registry::outbound::persistence::{DbTargets, DieselUserRegistry, run_migrations};

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

fn load_settings() -> std::io::Result<ServiceSettings> {
    ServiceSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing("info");
            tracing::error!(error = %e, "configuration rejected");
            return Err(e);
        }
    };
    init_tracing(settings.default_log_filter());

    if settings.skip_migrations {
        info!("skipping schema migrations");
    } else {
        run_migrations(&settings.db_primary_url)
            .await
            .map_err(std::io::Error::other)?;
    }

    let targets = DbTargets::connect(
        settings.primary_pool_config(),
        settings.replica_pool_config(),
    )
    .await
    .map_err(std::io::Error::other)?;
    let registry =
        DieselUserRegistry::new(targets).with_query_timeout(settings.query_timeout());

    let config = ServerConfig::new(settings.bind_addr(), Arc::new(registry));
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::build_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
