use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::core::app_state::AppState;

/// Path of the scrape endpoint; scrapes are not counted as traffic.
pub const METRICS_PATH: &str = "/metrics";

/// Bumps `http_requests_total` for every request except metric scrapes.
pub async fn count_requests(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.uri().path() != METRICS_PATH {
        state.metrics.record_request();
    }
    next.run(req).await
}
