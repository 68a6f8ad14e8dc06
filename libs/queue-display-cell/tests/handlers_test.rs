mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use queue_display_cell::*;
use shared_utils::test_utils::TestConfig;

use common::FakeQueueSource;

async fn create_test_app() -> (Router, Arc<QueueDisplayRuntime>, Arc<FakeQueueSource>) {
    let source = Arc::new(FakeQueueSource::with_sample_queues());
    let runtime = Arc::new(QueueDisplayRuntime::with_source(
        TestConfig::default().to_arc(),
        source.clone(),
    ));
    runtime.controller().refresh().await.expect("initial refresh");
    (create_queue_display_router(runtime.clone()), runtime, source)
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_get_queue_view() {
    let (app, _, _) = create_test_app().await;

    let response = app.oneshot(empty_request("GET", "/queues")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json_response = body_json(response).await;
    assert_eq!(json_response["total"], 4);
    assert_eq!(json_response["cards"][0]["doctor_name"], "Dr. Karen Lee");
    assert_eq!(json_response["cards"][0]["status"], "in-session");
    assert_eq!(json_response["cards"][2]["current_patient_label"], NO_CURRENT_PATIENT);
    assert_eq!(json_response["filter"]["department"], "all");
}

#[tokio::test]
async fn test_set_filter() {
    let (app, _, source) = create_test_app().await;

    let request = json_request("PUT", "/queues/filter", json!({ "department": "cardiology", "search": "" }));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json_response = body_json(response).await;
    assert_eq!(json_response["shown"], 2);
    assert_eq!(json_response["filter"]["department"], "cardiology");
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn test_set_filter_rejects_unknown_department() {
    let (app, _, _) = create_test_app().await;

    let request = json_request("PUT", "/queues/filter", json!({ "department": "radiology" }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json_response = body_json(response).await;
    assert_eq!(json_response["code"], "validation_error");
}

#[tokio::test]
async fn test_call_next_success() {
    let (app, runtime, source) = create_test_app().await;

    let response = app
        .oneshot(empty_request("POST", "/queues/42/call-next"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json_response = body_json(response).await;
    assert_eq!(json_response["success"], true);
    assert_eq!(json_response["doctor_id"], "42");
    assert_eq!(source.fetch_count(), 2);
    assert_eq!(runtime.notices().active().await.len(), 1);
}

#[tokio::test]
async fn test_call_next_refused_is_conflict() {
    let (app, _, source) = create_test_app().await;
    source.refuse_call_next(true);

    let response = app
        .oneshot(empty_request("POST", "/queues/42/call-next"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_refresh_failure_is_bad_gateway() {
    let (app, _, source) = create_test_app().await;
    source.fail_fetches(true);

    let response = app.oneshot(empty_request("POST", "/queues/refresh")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json_response = body_json(response).await;
    assert_eq!(json_response["code"], "external_service");
}

#[tokio::test]
async fn test_list_and_dismiss_notices() {
    let (app, runtime, source) = create_test_app().await;
    source.fail_fetches(true);
    let _ = runtime.controller().refresh().await;

    let response = app.clone().oneshot(empty_request("GET", "/notices")).await.unwrap();
    let notices = body_json(response).await;
    assert_eq!(notices.as_array().map(Vec::len), Some(1));
    assert_eq!(notices[0]["level"], "error");

    let notice_id = notices[0]["id"].as_str().unwrap().to_string();
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/notices/{}", notice_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(empty_request("DELETE", &format!("/notices/{}", notice_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_now_serving_before_and_after_refresh() {
    let (app, runtime, _) = create_test_app().await;

    let response = app.clone().oneshot(empty_request("GET", "/now-serving")).await.unwrap();
    let json_response = body_json(response).await;
    assert_eq!(json_response["available"], false);

    runtime.now_serving().refresh().await.unwrap();

    let response = app.oneshot(empty_request("GET", "/now-serving")).await.unwrap();
    let json_response = body_json(response).await;
    assert_eq!(json_response["available"], true);
    assert_eq!(json_response["current"]["number"], 3);
    assert_eq!(json_response["next"]["name"], "Omar Hassan");
}

#[tokio::test]
async fn test_clock_and_health() {
    let (app, _, _) = create_test_app().await;

    let response = app.clone().oneshot(empty_request("GET", "/clock")).await.unwrap();
    let clock = body_json(response).await;
    assert_eq!(clock["time"].as_str().map(str::len), Some(8));

    let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();
    let health = body_json(response).await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["running"], false);
    assert_eq!(health["configured"], true);
}
