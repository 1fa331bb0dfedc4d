use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error body: `{"success": false, "error": {code, message, hint?}}`.
///
/// Successful calls return their own shape (`ResponsePayload`, health, metrics).
#[derive(Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub error: ApiError,
}

#[derive(Serialize)]
pub struct ApiError {
    /// Stable, machine-readable error code (e.g. "EMPTY_QUERY").
    pub code: &'static str,
    /// Human-friendly error message.
    pub message: String,
    /// Optional hint to help the client fix the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl ApiResponse {
    pub fn error(
        code: &'static str,
        message: impl Into<String>,
        hint: Option<&'static str>,
    ) -> Self {
        Self {
            success: false,
            error: ApiError {
                code,
                message: message.into(),
                hint,
            },
        }
    }

    /// Convert to axum Response.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
