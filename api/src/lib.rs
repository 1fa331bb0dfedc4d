use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    middleware_layer::{
        request_id::ensure_request_id,
        request_metrics::{METRICS_PATH, count_requests},
    },
    routes::{
        health_route::health_route, metrics_route::metrics_route,
        recommend::recommend_route::recommend_route,
    },
};

const DEFAULT_API_ADDRESS: &str = "0.0.0.0:5000";

/// Router with all endpoints; state is injected so tests can use fakes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_route))
        .route("/recommend", post(recommend_route))
        .route(METRICS_PATH, get(metrics_route))
        .layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .layer(middleware::from_fn(ensure_request_id))
        .with_state(state)
}

/// Builds state from the environment and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_API_ADDRESS.into());
    let state = Arc::new(AppState::from_env()?);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(target: "api", address = %host_url, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!(target: "api", "server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(target: "api", error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
