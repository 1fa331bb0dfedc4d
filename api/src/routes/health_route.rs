use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Handler: GET /health
pub async fn health_route() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
