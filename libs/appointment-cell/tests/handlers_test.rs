// libs/appointment-cell/tests/handlers_test.rs

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Days, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use appointment_cell::models::format_display_date;
use appointment_cell::router::appointment_routes;
use appointment_cell::AppointmentState;
use shared_database::FixtureStore;
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

struct TestApp {
    router: Router,
    config: TestConfig,
}

impl TestApp {
    fn new() -> Self {
        let config = TestConfig::default();
        let state = AppointmentState::new(config.to_arc(), Arc::new(FixtureStore::load().unwrap()));
        Self { router: appointment_routes(state), config }
    }

    fn token_for(&self, user: &TestUser) -> String {
        JwtTestUtils::create_test_token(user, &self.config.jwt_secret, None)
    }

    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, JwtTestUtils::bearer(token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

// ==============================================================================
// AUTHENTICATION
// ==============================================================================

#[tokio::test]
async fn test_routes_require_session() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");

    let (status, _) = app
        .send(Method::POST, "/bookings", None, Some(json!({ "doctor_id": "1" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejects_bad_tokens() {
    let app = TestApp::new();
    let user = TestUser::patient("patient@example.com");

    let expired = JwtTestUtils::create_expired_token(&user, &app.config.jwt_secret);
    let (status, _) = app.send(Method::GET, "/", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = JwtTestUtils::create_invalid_signature_token(&user);
    let (status, _) = app.send(Method::GET, "/", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let malformed = JwtTestUtils::create_malformed_token();
    let (status, _) = app.send(Method::GET, "/", Some(&malformed), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ==============================================================================
// DASHBOARD
// ==============================================================================

#[tokio::test]
async fn test_dashboard_greets_by_full_name() {
    let app = TestApp::new();
    let token = app.token_for(&TestUser::patient("jane@example.com").with_full_name("Jane Doe"));

    let (status, body) = app.send(Method::GET, "/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["greeting"], "Welcome back, Jane Doe!");
    assert_eq!(body["upcoming"].as_array().unwrap().len(), 2);
    assert_eq!(body["stats"]["total_appointments"], 2);
    assert_eq!(body["upcoming"][0]["doctor"]["specialty"], "Cardiology");
}

#[tokio::test]
async fn test_list_and_get_appointments() {
    let app = TestApp::new();
    let token = app.token_for(&TestUser::patient("jane@example.com"));

    let (status, body) = app.send(Method::GET, "/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);

    let (status, body) = app.send(Method::GET, "/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["appointment_date"], "2024-01-15");

    let (status, body) = app.send(Method::GET, "/77", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Appointment not found");
}

// ==============================================================================
// BOOKING FLOW
// ==============================================================================

#[tokio::test]
async fn test_start_booking_unknown_doctor() {
    let app = TestApp::new();
    let token = app.token_for(&TestUser::patient("jane@example.com"));

    let (status, body) = app
        .send(Method::POST, "/bookings", Some(&token), Some(json!({ "doctor_id": "404" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Doctor not found");
}

#[tokio::test(start_paused = true)]
async fn test_full_booking_scenario() {
    let app = TestApp::new();
    let token = app.token_for(&TestUser::patient("jane@example.com").with_full_name("Jane Doe"));

    let (status, view) = app
        .send(Method::POST, "/bookings", Some(&token), Some(json!({ "doctor_id": "1" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["stage"]["step"], "selecting_date");
    assert_eq!(view["available_dates"].as_array().unwrap().len(), 7);
    assert_eq!(view["can_submit"], false);
    let flow = format!("/bookings/{}", view["flow_id"].as_str().unwrap());

    let (status, view) = app
        .send(Method::PUT, &format!("{}/date", flow), Some(&token), Some(json!({ "date_index": 0 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["stage"]["step"], "selecting_time");

    let (status, view) = app
        .send(Method::PUT, &format!("{}/time", flow), Some(&token), Some(json!({ "time": "10:00" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["stage"]["step"], "reviewing");
    assert_eq!(view["can_submit"], true);

    let (status, view) = app
        .send(
            Method::PUT,
            &format!("{}/details", flow),
            Some(&token),
            Some(json!({ "notes": "Annual check-up", "documents": ["ecg.pdf"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["documents"][0], "ecg.pdf");

    let (status, view) = app.send(Method::POST, &format!("{}/submit", flow), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let tomorrow = Utc::now().date_naive().checked_add_days(Days::new(1)).unwrap();
    let confirmation = &view["stage"]["confirmation"];
    assert_eq!(view["stage"]["step"], "confirmed");
    assert_eq!(confirmation["doctor_name"], "Dr. Sarah Smith");
    assert_eq!(confirmation["formatted_date"], format_display_date(tomorrow));
    assert_eq!(confirmation["time"], "10:00");
    assert_eq!(confirmation["fee"], "$200");
    assert_eq!(confirmation["appointment"]["status"], "pending");
    assert_eq!(confirmation["appointment"]["notes"], "Annual check-up");

    let (status, body) = app.send(Method::DELETE, &flow, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect"], "/dashboard");

    let (status, _) = app.send(Method::GET, &flow, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_selections_are_rejected() {
    let app = TestApp::new();
    let token = app.token_for(&TestUser::patient("jane@example.com"));

    let (_, view) = app
        .send(Method::POST, "/bookings", Some(&token), Some(json!({ "doctor_id": "3" })))
        .await;
    let flow = format!("/bookings/{}", view["flow_id"].as_str().unwrap());

    let (status, _) = app
        .send(Method::PUT, &format!("{}/time", flow), Some(&token), Some(json!({ "time": "10:00" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::PUT, &format!("{}/date", flow), Some(&token), Some(json!({ "date_index": 7 })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .send(Method::PUT, &format!("{}/date", flow), Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::PUT, &format!("{}/date", flow), Some(&token), Some(json!({ "date_index": 2 })))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(Method::PUT, &format!("{}/time", flow), Some(&token), Some(json!({ "time": "23:00" })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Time 23:00 is not offered by this doctor");

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("{}/details", flow),
            Some(&token),
            Some(json!({ "documents": ["virus.exe"] })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = app.send(Method::POST, &format!("{}/submit", flow), Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot submit booking: time not selected");
}

#[tokio::test]
async fn test_flow_hidden_from_other_patients() {
    let app = TestApp::new();
    let owner = app.token_for(&TestUser::patient("owner@example.com"));
    let intruder = app.token_for(&TestUser::patient("intruder@example.com"));

    let (_, view) = app
        .send(Method::POST, "/bookings", Some(&owner), Some(json!({ "doctor_id": "2" })))
        .await;
    let flow = format!("/bookings/{}", view["flow_id"].as_str().unwrap());

    let (status, _) = app.send(Method::GET, &flow, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &flow, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::GET, &flow, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cancel_without_submission_conflicts() {
    let app = TestApp::new();
    let token = app.token_for(&TestUser::patient("jane@example.com"));

    let (_, view) = app
        .send(Method::POST, "/bookings", Some(&token), Some(json!({ "doctor_id": "4" })))
        .await;
    let flow = format!("/bookings/{}", view["flow_id"].as_str().unwrap());

    let (status, body) = app.send(Method::POST, &format!("{}/cancel", flow), Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "No submission in progress");
}
