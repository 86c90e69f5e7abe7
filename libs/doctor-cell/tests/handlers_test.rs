// libs/doctor-cell/tests/handlers_test.rs

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use doctor_cell::router::doctor_routes;
use shared_database::FixtureStore;

fn app() -> Router {
    doctor_routes(Arc::new(FixtureStore::load().unwrap()))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_search_without_params_lists_everyone() {
    let (status, body) = get("/search").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
    assert_eq!(body["doctors"][0]["id"], "1");
    assert_eq!(body["doctors"][3]["id"], "4");
}

#[tokio::test]
async fn test_search_by_specialty() {
    let (status, body) = get("/search?specialty=Dermatology").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["doctors"][0]["id"], "2");
}

#[tokio::test]
async fn test_search_combines_text_and_fee() {
    let (status, body) = get("/search?search=dr.&max_fee=180").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["doctors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["2", "3"]);
}

#[tokio::test]
async fn test_search_rejects_invalid_rating() {
    let (status, body) = get("/search?min_rating=9").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("min_rating"));
}

#[tokio::test]
async fn test_filter_options_endpoint() {
    let (status, body) = get("/filters").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["specialties"][0], "Cardiology");
    assert_eq!(body["locations"][3], "Houston, TX");
}

#[tokio::test]
async fn test_get_doctor_found_and_missing() {
    let (status, body) = get("/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["full_name"], "Dr. Sarah Smith");

    let (status, body) = get("/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Doctor not found");
}
