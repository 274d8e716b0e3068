//! Router-level tests for the gateway, driven through `tower::oneshot`
//! with a fully stubbed scorer.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use vane::classifier::STUB_LABELS;
use vane::scoring::HeadlineScorer;

use crate::gateway::{HandlerState, create_router_with_state};

fn test_router(include_scores: bool) -> Router {
    let state = HandlerState::new(Arc::new(HeadlineScorer::stub()), include_scores);
    create_router_with_state(state)
}

async fn get(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    into_json(response).await
}

async fn post_json(router: Router, uri: &str, body: String) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    into_json(response).await
}

async fn into_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

#[tokio::test]
async fn status_reports_ok() {
    let (status, body) = get(test_router(false), "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "OK"}));
}

#[tokio::test]
async fn scoring_returns_one_label_per_headline() {
    let body = serde_json::json!({
        "headlines": ["Stocks rally", "Oil dips", "Tech gains"]
    });

    let (status, value) = post_json(test_router(false), "/score_headlines", body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let labels = value["labels"].as_array().unwrap();
    assert_eq!(labels.len(), 3);
    for label in labels {
        assert!(STUB_LABELS.contains(&label.as_str().unwrap()));
    }
    // Scores are omitted entirely unless enabled.
    assert!(value.get("scores").is_none());
}

#[tokio::test]
async fn scoring_is_deterministic_for_the_same_batch() {
    let body = serde_json::json!({"headlines": ["Same headline"]}).to_string();

    let (_, first) = post_json(test_router(false), "/score_headlines", body.clone()).await;
    let (_, second) = post_json(test_router(false), "/score_headlines", body).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn scores_ride_along_when_enabled() {
    let body = serde_json::json!({"headlines": ["A", "B"]}).to_string();

    let (status, value) = post_json(test_router(true), "/score_headlines", body).await;

    assert_eq!(status, StatusCode::OK);
    let scores = value["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 2);
    for score in scores {
        let score = score.as_f64().unwrap();
        assert!((0.0..=1.0).contains(&score));
    }
}

#[tokio::test]
async fn empty_batch_yields_empty_labels() {
    let body = serde_json::json!({"headlines": []}).to_string();

    let (status, value) = post_json(test_router(false), "/score_headlines", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, serde_json::json!({"labels": []}));
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let (status, _) = post_json(test_router(false), "/score_headlines", "not json".into()).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn missing_headlines_field_is_a_client_error() {
    let body = serde_json::json!({"texts": ["A"]}).to_string();

    let (status, _) = post_json(test_router(false), "/score_headlines", body).await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = get(test_router(false), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
