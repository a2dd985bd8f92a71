use crate::database::DatabaseError;
use crate::report::ReportError;
use crate::sales::AggregationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Data unavailable: {0}")]
    Database(#[from] DatabaseError),
    #[error("Aggregation error: {0}")]
    Aggregation(#[from] AggregationError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
    #[error("Report generation is not configured")]
    ReportUnavailable,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_category(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error"),
            AppError::Database(DatabaseError::NotFound) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::Database(_) => (StatusCode::SERVICE_UNAVAILABLE, "Data unavailable"),
            AppError::Aggregation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Malformed input"),
            AppError::Report(_) => (StatusCode::BAD_GATEWAY, "Report generation failed"),
            AppError::ReportUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "Report generation unavailable")
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_category();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}
