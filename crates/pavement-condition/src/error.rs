use crate::assessment::{ConditionReportError, FixtureError, RatingTableError, ReportErrorKind};
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failure surfaced by the binary, either at startup or while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("report error: {0}")]
    Report(#[from] ConditionReportError),
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),
    #[error("rating table error: {0}")]
    Ratings(#[from] RatingTableError),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Report(err) => match err.kind() {
                ReportErrorKind::NotFound => StatusCode::NOT_FOUND,
                ReportErrorKind::Precondition => StatusCode::UNPROCESSABLE_ENTITY,
                ReportErrorKind::Repository => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Fixture(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Ratings(_)
            | AppError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
