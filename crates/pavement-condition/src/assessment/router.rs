use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{RoadId, UserId};
use super::repository::{RepositoryError, ResultStore, RoadStore, SegmentStore};
use super::service::{ConditionReportError, ConditionReportService, ReportErrorKind};

/// Body of a generation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResultsRequest {
    pub user_id: String,
    #[serde(default = "include_details_default")]
    pub include_details: bool,
}

fn include_details_default() -> bool {
    true
}

/// Router builder exposing result generation and report retrieval.
pub fn condition_router<S, R, P>(service: Arc<ConditionReportService<S, R, P>>) -> Router
where
    S: SegmentStore + 'static,
    R: RoadStore + 'static,
    P: ResultStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/roads/:road_id/results",
            post(generate_handler::<S, R, P>),
        )
        .route(
            "/api/v1/roads/:road_id/report",
            get(report_handler::<S, R, P>),
        )
        .with_state(service)
}

pub(crate) async fn generate_handler<S, R, P>(
    State(service): State<Arc<ConditionReportService<S, R, P>>>,
    Path(road_id): Path<String>,
    axum::Json(request): axum::Json<GenerateResultsRequest>,
) -> Response
where
    S: SegmentStore + 'static,
    R: RoadStore + 'static,
    P: ResultStore + 'static,
{
    let road_id = RoadId(road_id);
    let user_id = UserId(request.user_id);
    // Generation waits on the road's lock, so it runs off the async workers.
    let outcome = tokio::task::spawn_blocking(move || {
        service.generate_results_for_road(&road_id, &user_id, request.include_details)
    })
    .await;

    match outcome {
        Ok(Ok(results)) => (StatusCode::OK, axum::Json(results)).into_response(),
        Ok(Err(error)) => error_response(error),
        Err(join_error) => {
            error!(error = %join_error, "result generation task failed");
            let payload = json!({
                "error": "result generation failed",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn report_handler<S, R, P>(
    State(service): State<Arc<ConditionReportService<S, R, P>>>,
    Path(road_id): Path<String>,
) -> Response
where
    S: SegmentStore + 'static,
    R: RoadStore + 'static,
    P: ResultStore + 'static,
{
    match service.get_report_by_road_id(&RoadId(road_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ConditionReportError) -> Response {
    let status = match (&error, error.kind()) {
        (ConditionReportError::Repository(RepositoryError::Conflict), _) => StatusCode::CONFLICT,
        (_, ReportErrorKind::NotFound) => StatusCode::NOT_FOUND,
        (_, ReportErrorKind::Precondition) => StatusCode::UNPROCESSABLE_ENTITY,
        (_, ReportErrorKind::Repository) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
