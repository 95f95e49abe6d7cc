use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bus_eta_server::config::{AppConfig, DEFAULT_LOG_FILTER};
use bus_eta_server::maps::MapsClient;
use bus_eta_server::sms::SmsClient;
use bus_eta_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    // Fail fast if any required key is missing. Loaded before logging so
    // `APP_ENV` can pick the default filter; errors are logged below.
    let config = AppConfig::from_env();
    let default_filter = config
        .as_ref()
        .map_or(DEFAULT_LOG_FILTER, AppConfig::default_log_filter);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match config {
        Ok(config) => run(config).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(?config, "configuration loaded");

    let maps = MapsClient::new(config.maps_config())?;
    let sms = SmsClient::new(config.sms_config())?;

    let state = AppState::new(Arc::new(maps), Arc::new(sms));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Bus ETA gateway listening on http://{addr}");
    info!("  GET  /health   - Health check");
    info!("  POST /webhook  - Inbound SMS webhook");

    axum::serve(listener, app).await?;
    Ok(())
}
