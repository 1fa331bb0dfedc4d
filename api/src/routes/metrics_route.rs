use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse};

use crate::{core::app_state::AppState, error_handler::AppResult};

/// Handler: GET /metrics (Prometheus text format)
pub async fn metrics_route(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    let body = state.metrics.render()?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
