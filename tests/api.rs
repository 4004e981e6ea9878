//! End-to-end tests for the booking API: seat browsing, selection and the
//! simulated payment flow, driven through the router with virtual time.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use skydesk::config::{AppConfig, Config, JwtConfig, PaymentConfig};
use skydesk::{app, middleware, AppState};

const DELAY_MS: u64 = 2000;

fn test_state() -> Arc<AppState> {
    AppState::new(Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            rust_log: "skydesk=debug".to_string(),
        },
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            expires_in_hours: 24,
        },
        payment: PaymentConfig {
            settlement_delay_ms: DELAY_MS,
            reference_prefix: "SKY".to_string(),
            currency: "INR".to_string(),
        },
    })
}

fn session_token(state: &Arc<AppState>) -> String {
    middleware::issue_token(&state.config.jwt, "visitor-1", Some("visitor@skydesk.local"))
        .expect("session token")
}

async fn send(
    state: &Arc<AppState>,
    token: &str,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value, Option<String>) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app(state.clone()).oneshot(request).await.expect("response");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body, location)
}

async fn toggle(state: &Arc<AppState>, token: &str, seat_id: &str) -> (StatusCode, Value) {
    let (status, body, _) = send(
        state,
        token,
        "PATCH",
        "/api/selection/toggle",
        Some(json!({ "seatId": seat_id })),
    )
    .await;
    (status, body)
}

fn card_payload() -> Value {
    json!({
        "method": "card",
        "number": "4242 4242 4242 4242",
        "holderName": "John Doe",
        "expiry": "12/28",
        "cvv": "123",
    })
}

#[tokio::test]
async fn requests_without_a_session_token_are_rejected() {
    let state = test_state();
    let request = Request::builder()
        .method("GET")
        .uri("/api/seats")
        .body(Body::empty())
        .expect("request");

    let response = app(state).oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn seat_listing_carries_stats_and_full_catalog() {
    let state = test_state();
    let token = session_token(&state);

    let (status, body, _) = send(&state, &token, "GET", "/api/seats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 33);
    assert_eq!(body["stats"]["total"], 33);
    assert_eq!(body["stats"]["available"], 28);
    assert_eq!(body["seats"][0]["id"], "WS-A1");
    assert_eq!(body["seats"][0]["workspaceType"], "workstation");
}

#[tokio::test]
async fn seat_listing_respects_the_category_filter() {
    let state = test_state();
    let token = session_token(&state);

    let (status, body, _) = send(&state, &token, "GET", "/api/seats?filter=conference", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 10);

    let (status, _, _) = send(&state, &token, "GET", "/api/seats?filter=lounge", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn toggling_builds_the_selection_and_refuses_booked_seats() {
    let state = test_state();
    let token = session_token(&state);

    let (status, body) = toggle(&state, &token, "WS-A1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selected"], true);
    assert_eq!(body["selection"]["total"], 500);

    // WS-A2 is pre-booked: the toggle is silently refused.
    let (status, body) = toggle(&state, &token, "WS-A2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selected"], false);
    assert_eq!(body["selection"]["count"], 1);
    assert_eq!(body["selection"]["total"], 500);

    let (status, _) = toggle(&state, &token, "WS-Z9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Toggling back out empties the selection.
    let (_, body) = toggle(&state, &token, "WS-A1").await;
    assert_eq!(body["selected"], false);
    assert_eq!(body["selection"]["count"], 0);
    assert_eq!(body["selection"]["total"], 0);
}

#[tokio::test]
async fn selection_breakdown_counts_member_types() {
    let state = test_state();
    let token = session_token(&state);

    toggle(&state, &token, "WS-A1").await;
    toggle(&state, &token, "CONF-1").await;

    let (status, body, _) = send(&state, &token, "GET", "/api/selection", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selection"]["total"], 3500);
    assert_eq!(body["selection"]["breakdown"]["workstation"], 1);
    assert_eq!(body["selection"]["breakdown"]["conference"], 1);
    assert!(body["selection"]["breakdown"].get("cabin").is_none());
}

#[tokio::test]
async fn payment_step_with_empty_selection_redirects_to_booking() {
    let state = test_state();
    let token = session_token(&state);

    let (status, _, location) = send(&state, &token, "GET", "/api/payment", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/book"));

    let (status, _, location) = send(
        &state,
        &token,
        "POST",
        "/api/payment/submit",
        Some(card_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/book"));

    // No attempt was created by either entry.
    let (_, body, _) = send(&state, &token, "GET", "/api/payment/status", None).await;
    assert_eq!(body["status"], "idle");
}

#[tokio::test]
async fn incomplete_card_details_are_rejected_with_field_feedback() {
    let state = test_state();
    let token = session_token(&state);
    toggle(&state, &token, "WS-A1").await;

    let payload = json!({
        "method": "card",
        "number": "4242 4242 4242 4242",
        "holderName": "John Doe",
        "expiry": "12/28",
        "cvv": "12",
    });
    let (status, body, _) = send(&state, &token, "POST", "/api/payment/submit", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(body["fields"].get("cvv").is_some());
}

#[tokio::test(start_paused = true)]
async fn full_booking_flow_settles_and_issues_a_confirmation() {
    let state = test_state();
    let token = session_token(&state);

    toggle(&state, &token, "WS-A1").await;
    toggle(&state, &token, "CONF-1").await;

    let (status, body, _) = send(&state, &token, "GET", "/api/payment", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["total"], 3500);

    let (status, body, _) = send(
        &state,
        &token,
        "POST",
        "/api/payment/submit",
        Some(card_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["receipt"]["status"], "processing");
    assert_eq!(body["receipt"]["amount"], 3500);

    // A duplicate submission while processing must never double-book.
    let (status, _, _) = send(
        &state,
        &token,
        "POST",
        "/api/payment/submit",
        Some(card_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    tokio::time::sleep(Duration::from_millis(DELAY_MS + 100)).await;

    let (_, body, _) = send(&state, &token, "GET", "/api/payment/status", None).await;
    assert_eq!(body["status"], "succeeded");
    let reference = body["bookingReference"].as_str().expect("reference");
    assert!(reference.starts_with("SKY-"));

    let (status, body, _) = send(&state, &token, "GET", "/api/payment/confirmation", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confirmation"]["bookingReference"], reference);
    assert_eq!(body["confirmation"]["total"], 3500);
    assert_eq!(body["confirmation"]["seats"].as_array().map(Vec::len), Some(2));

    // The originating selection was consumed by the booking.
    let (_, body, _) = send(&state, &token, "GET", "/api/selection", None).await;
    assert_eq!(body["selection"]["count"], 0);
}

#[tokio::test(start_paused = true)]
async fn cancelling_mid_processing_suppresses_the_settlement() {
    let state = test_state();
    let token = session_token(&state);
    toggle(&state, &token, "DIR-1").await;

    let (status, _, _) = send(
        &state,
        &token,
        "POST",
        "/api/payment/submit",
        Some(card_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (_, body, _) = send(&state, &token, "POST", "/api/payment/cancel", None).await;
    assert_eq!(body["cancelled"], true);

    tokio::time::sleep(Duration::from_millis(DELAY_MS + 100)).await;

    // Nothing settled: no attempt, no confirmation, selection intact.
    let (_, body, _) = send(&state, &token, "GET", "/api/payment/status", None).await;
    assert_eq!(body["status"], "idle");

    let (status, _, _) = send(&state, &token, "GET", "/api/payment/confirmation", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body, _) = send(&state, &token, "GET", "/api/selection", None).await;
    assert_eq!(body["selection"]["count"], 1);
}

#[tokio::test]
async fn upi_submission_requires_handle_and_app() {
    let state = test_state();
    let token = session_token(&state);
    toggle(&state, &token, "MR-1").await;

    let incomplete = json!({ "method": "upi", "upiId": "john.upi", "app": "GPay" });
    let (status, _, _) = send(&state, &token, "POST", "/api/payment/submit", Some(incomplete)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let ready = json!({ "method": "upi", "upiId": "john@upi", "app": "GPay" });
    let (status, _, _) = send(&state, &token, "POST", "/api/payment/submit", Some(ready)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
}
