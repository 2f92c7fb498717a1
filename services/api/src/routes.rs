use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use pavement_condition::assessment::{
    condition_router, ConditionReportService, ResultStore, RoadStore, SegmentStore,
};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_condition_routes<S, R, P>(
    service: Arc<ConditionReportService<S, R, P>>,
) -> axum::Router
where
    S: SegmentStore + 'static,
    R: RoadStore + 'static,
    P: ResultStore + 'static,
{
    condition_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(Ordering::Relaxed) {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryRoadNetwork;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pavement_condition::assessment::{
        PavementType, RoadFixture, RoadId, RoadSummary, Segment, SegmentGeometry, SegmentId,
        SegmentInventory,
    };
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    fn seeded_network() -> InMemoryRoadNetwork {
        let road_id = RoadId("road-9".to_string());
        let network = InMemoryRoadNetwork::default();
        network
            .seed(RoadFixture {
                road: RoadSummary {
                    id: road_id.clone(),
                    name: "Harbour Access".to_string(),
                    code: None,
                    region: None,
                    length_km: None,
                },
                segments: vec![Segment {
                    id: SegmentId("seg-1".to_string()),
                    road_id,
                    segment_number: 1,
                    geometry: SegmentGeometry {
                        stationing_from_m: 0.0,
                        stationing_to_m: 250.0,
                        pavement_width_m: 5.5,
                    },
                    pavement_type: PavementType::Unpaved,
                    inventory: SegmentInventory::default(),
                    damage_assessment: None,
                }],
            })
            .expect("seed road");
        network
    }

    fn app(network: InMemoryRoadNetwork, ready: bool) -> axum::Router {
        let network = Arc::new(network);
        let service = Arc::new(ConditionReportService::new(
            network.clone(),
            network.clone(),
            network,
        ));
        with_condition_routes(service).layer(Extension(app_state(ready)))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = readiness_endpoint(Extension(app_state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(Extension(app_state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let response = app(InMemoryRoadNetwork::default(), true)
            .oneshot(
                Request::get("/metrics")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn condition_routes_are_mounted() {
        let router = app(seeded_network(), true);

        let generated = router
            .clone()
            .oneshot(
                Request::post("/api/v1/roads/road-9/results")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"userId":"inspector-4"}"#))
                    .expect("request builds"),
            )
            .await
            .expect("route responds");
        assert_eq!(generated.status(), StatusCode::OK);

        let report = router
            .oneshot(
                Request::get("/api/v1/roads/road-9/report")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route responds");
        assert_eq!(report.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(report.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["report"]["segments"][0]["tti"], 150.0);
        assert_eq!(
            body["report"]["conditionLengthStats"]["Bad"]["lengthKm"],
            0.25
        );
    }
}
