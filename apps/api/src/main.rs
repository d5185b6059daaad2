//! Gridgate API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use gridgate_application::TableQueryService;
use gridgate_core::AppError;
use gridgate_infrastructure::HttpTableGateway;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api_config::ApiConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    let table_gateway = Arc::new(HttpTableGateway::new(
        http_client,
        config.remote_api_base.clone(),
        config.retry_max_attempts,
        config.retry_backoff_ms,
    ));

    let app_state = AppState {
        table_query_service: TableQueryService::new(table_gateway),
    };
    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let host = IpAddr::from_str(&config.api_host).map_err(|error| {
        AppError::Internal(format!("invalid API_HOST '{}': {error}", config.api_host))
    })?;
    let address = SocketAddr::from((host, config.api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "gridgate-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
