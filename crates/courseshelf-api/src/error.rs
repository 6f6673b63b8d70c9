//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`; `AppError`
//! values convert into `HttpAppError` and render consistently (status, JSON
//! body, logging) without per-handler matching.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use courseshelf_core::{AppError, LogLevel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse. Needed because of
/// Rust's orphan rules - IntoResponse is external and AppError lives in
/// courseshelf-core.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = error.error_code(), "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = error.error_code(), "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = error.error_code(), "Request failed");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Server-side detail stays out of production responses.
        let body = if is_production_env() && status.is_server_error() {
            Json(ErrorResponse {
                error: "Internal server error".to_string(),
                details: None,
                code: app_error.error_code().to_string(),
            })
        } else {
            Json(ErrorResponse {
                error: app_error.to_string(),
                details: None,
                code: app_error.error_code().to_string(),
            })
        };

        (status, body).into_response()
    }
}
