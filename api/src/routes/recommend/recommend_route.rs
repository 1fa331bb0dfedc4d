//! POST /recommend: ranked product cards for a shopping query.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use rank_core::ResponsePayload;
use tracing::{debug, info};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    middleware_layer::request_id::request_id_of,
    routes::recommend::recommend_request::RecommendRequest,
};

/// Handler: POST /recommend
///
/// Blank queries are rejected here; the ranker itself would still search.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:5000/recommend \
///   -H 'content-type: application/json' \
///   -d '{"query":"women'\''s cotton kurti"}'
/// ```
pub async fn recommend_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<ResponsePayload>> {
    let request_id = request_id_of(&headers).unwrap_or_else(|| "-".into());
    let Json(req) = body?;

    let query = req.query.trim();
    if query.is_empty() {
        debug!(target: "api::recommend", request_id = %request_id, "empty query rejected");
        return Err(AppError::EmptyQuery);
    }

    let payload = state.ranker.rank(query).await;
    state.metrics.record_prediction();

    info!(
        target: "api::recommend",
        request_id = %request_id,
        products = payload.products.len(),
        "recommend: done"
    );

    Ok(Json(payload))
}
