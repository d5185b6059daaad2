use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use gridgate_core::AppError;

use crate::handlers;
use crate::middleware::require_bearer_token;
use crate::state::AppState;

/// Builds the API router with CORS, tracing, and the bearer-token guard on
/// all table routes.
pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let table_routes = Router::new()
        .route(
            "/api/tables/{table}/rows",
            post(handlers::tables::table_rows_handler),
        )
        .route(
            "/api/tables/{table}/refresh",
            post(handlers::tables::refresh_table_handler),
        )
        .route_layer(from_fn(require_bearer_token));

    let router = Router::new()
        .route("/api/health", get(handlers::health::health_handler))
        .merge(table_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state);

    Ok(router)
}
