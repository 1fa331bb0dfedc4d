use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::core::{app_state::ConfigError, http::response_envelope::ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    #[error("metrics encoding failed: {0}")]
    Metrics(#[from] prometheus::Error),

    // --- Request ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("Please type something.")]
    EmptyQuery,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::EmptyQuery => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Metrics(_) => "METRICS_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::EmptyQuery => "EMPTY_QUERY",
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::BadRequest(_) => {
                Some(r#"Send a JSON body like {"query": "red cotton kurti"}."#)
            }
            AppError::EmptyQuery => {
                Some("Describe a product, e.g. a product type with a brand or colour.")
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ApiResponse::error(self.error_code(), self.to_string(), self.hint())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}
