use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower::ServiceExt;

use crate::assessment::router::{condition_router, report_handler, GenerateResultsRequest};
use crate::assessment::service::ConditionReportService;

fn generate_request(road: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(format!("/api/v1/roads/{road}/results"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

#[tokio::test]
async fn generate_route_returns_scored_segments() {
    let (service, _) = build_service(mixed_segments());
    let router = condition_router(Arc::new(service));

    let response = router
        .oneshot(generate_request(
            "road-1",
            json!({ "userId": "surveyor-1", "includeDetails": false }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["resultId"], "res-000001");
    assert_eq!(body["segmentResults"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["segmentResults"][3]["condition"], "Bad");
    assert!(body["segmentResults"][0].get("distressAreas").is_none());
    assert_eq!(body["pavementTypePercentages"]["gravel"], 0.0);
    assert_eq!(body["conditionLengthStats"]["Fair"]["lengthKm"], 0.1);
}

#[tokio::test]
async fn generate_route_includes_details_by_default() {
    let (service, _) = build_service(mixed_segments());
    let router = condition_router(Arc::new(service));

    let response = router
        .oneshot(generate_request("road-1", json!({ "userId": "surveyor-1" })))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body["segmentResults"][1]["weightedComponents"]["pumping"],
        15.0
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_generate_requests_share_one_result() {
    let (service, network) = build_service(mixed_segments());
    let service = Arc::new(service);
    let router = condition_router(Arc::clone(&service));

    let requests: Vec<_> = (0..8)
        .map(|worker| {
            let router = router.clone();
            tokio::spawn(async move {
                let response = router
                    .oneshot(generate_request(
                        "road-1",
                        json!({ "userId": format!("worker-{worker}") }),
                    ))
                    .await
                    .expect("route responds");
                let status = response.status();
                (status, read_json_body(response).await)
            })
        })
        .collect();

    for request in requests {
        let (status, body) = request.await.expect("request task finished");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resultId"], "res-000001");
    }
    assert_eq!(network.inserts.load(Ordering::Relaxed), 1);
    assert_eq!(service.tracked_road_locks(), 0);
}

#[tokio::test]
async fn generate_route_returns_not_found_for_unknown_road() {
    let (service, _) = build_service(mixed_segments());
    let router = condition_router(Arc::new(service));

    let response = router
        .oneshot(generate_request("road-404", json!({ "userId": "surveyor-1" })))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "road road-404 not found");
}

#[tokio::test]
async fn generate_route_rejects_roads_without_segments() {
    let (service, _) = build_service(Vec::new());
    let router = condition_router(Arc::new(service));

    let response = router
        .oneshot(generate_request("road-1", json!({ "userId": "surveyor-1" })))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn report_handler_returns_not_found_before_generation() {
    let (service, _) = build_service(mixed_segments());

    let response = report_handler::<MemoryNetwork, MemoryNetwork, MemoryNetwork>(
        State(Arc::new(service)),
        Path("road-1".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn report_handler_returns_internal_error_when_store_is_down() {
    let store = Arc::new(UnavailableNetwork);
    let service = ConditionReportService::new(store.clone(), store.clone(), store);

    let response = report_handler::<UnavailableNetwork, UnavailableNetwork, UnavailableNetwork>(
        State(Arc::new(service)),
        Path("road-1".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn report_route_serves_generated_report() {
    let (service, _) = build_service(mixed_segments());
    let service = Arc::new(service);
    service
        .generate_results_for_road(&road_id(), &user_id(), true)
        .expect("results generate");
    let router = condition_router(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/roads/road-1/report")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["road"]["code"], "R-014");
    assert_eq!(body["report"]["id"], "res-000001");
    let first = &body["report"]["segments"][0];
    assert_eq!(first["segmentId"], "seg-1");
    assert_eq!(first["tti"], 2.5);
    assert_eq!(first["segment"]["segmentNumber"], 1);
    assert_eq!(first["segment"]["inventory"]["laneCount"], 2);
}

#[test]
fn generate_request_defaults_include_details() {
    let request: GenerateResultsRequest =
        serde_json::from_value(json!({ "userId": "u-1" })).expect("request parses");

    assert_eq!(request.user_id, "u-1");
    assert!(request.include_details);
}
