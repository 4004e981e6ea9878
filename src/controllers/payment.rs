use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::middleware::SessionContext;
use crate::models::payment::PaymentStatus;
use crate::services::payment::{PaymentError, PaymentProcessor};
use crate::services::validation::PaymentDetails;
use crate::AppState;

use super::{to_api_error, ApiResult};

/// Where the visitor is sent when the payment step is reached without seats.
const SELECTION_STEP: &str = "/book";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/payment", get(enter_payment))
        .route("/payment/submit", post(submit_payment))
        .route("/payment/status", get(payment_status))
        .route("/payment/cancel", post(cancel_payment))
        .route("/payment/confirmation", get(get_confirmation))
}

/// GET /api/payment — order summary for the payment step. Direct navigation
/// with an empty selection redirects back to seat selection.
async fn enter_payment(State(state): State<Arc<AppState>>, session: SessionContext) -> Response {
    let handle = state.sessions.session(&session.visitor_id).await;
    let guard = handle.lock().await;

    if guard.selection.is_empty() {
        return Redirect::to(SELECTION_STEP).into_response();
    }

    let snapshot = guard.selection.snapshot();
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "order": {
                "seats": snapshot.seats,
                "total": snapshot.total,
                "currency": state.config.payment.currency,
            }
        })),
    )
        .into_response()
}

/// POST /api/payment/submit
async fn submit_payment(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
    Json(details): Json<PaymentDetails>,
) -> Response {
    let processor = PaymentProcessor::new(state.clone());

    match processor.submit(&session.visitor_id, details).await {
        Ok(receipt) => (
            StatusCode::ACCEPTED,
            Json(json!({ "success": true, "receipt": receipt })),
        )
            .into_response(),
        Err(PaymentError::EmptySelection) => Redirect::to(SELECTION_STEP).into_response(),
        Err(PaymentError::AlreadyProcessing) => to_api_error(
            StatusCode::CONFLICT,
            "A payment is already processing for this selection",
        )
            .into_response(),
        Err(PaymentError::NotReady(errors)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "success": false,
                "message": "Payment details are incomplete",
                "fields": errors,
            })),
        )
            .into_response(),
    }
}

/// GET /api/payment/status
async fn payment_status(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> impl IntoResponse {
    let handle = state.sessions.session(&session.visitor_id).await;
    let guard = handle.lock().await;

    let (status, reference, failure) = match guard.payment.as_ref() {
        Some(attempt) => (
            attempt.status,
            attempt.reference.clone(),
            attempt.failure_reason.clone(),
        ),
        None => (PaymentStatus::Idle, None, None),
    };

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "status": status,
            "bookingReference": reference,
            "failureReason": failure,
        })),
    )
}

/// POST /api/payment/cancel — the visitor navigated away mid-processing.
async fn cancel_payment(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> impl IntoResponse {
    let cancelled = PaymentProcessor::new(state.clone())
        .cancel(&session.visitor_id)
        .await;

    (
        StatusCode::OK,
        Json(json!({ "success": true, "cancelled": cancelled })),
    )
}

/// GET /api/payment/confirmation — output of a successful attempt, consumed
/// by the confirmation view.
async fn get_confirmation(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> ApiResult<impl IntoResponse> {
    let handle = state.sessions.session(&session.visitor_id).await;
    let guard = handle.lock().await;

    let confirmation = guard
        .confirmation
        .clone()
        .ok_or_else(|| to_api_error(StatusCode::NOT_FOUND, "No confirmed booking for this session"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "confirmation": confirmation })),
    ))
}
