use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::middleware::SessionContext;
use crate::models::seat::{Seat, WorkspaceType};
use crate::selection::{Selection, ToggleOutcome};
use crate::AppState;

use super::{to_api_error, ApiResult};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/selection", get(get_selection))
        .route("/selection/toggle", patch(toggle_seat))
        .route("/selection/remove", patch(remove_seat))
        .route("/selection/clear", post(clear_selection))
}

#[derive(Debug, Deserialize)]
struct SeatRef {
    #[serde(rename = "seatId")]
    seat_id: String,
}

#[derive(Serialize)]
struct SelectionSummary {
    seats: Vec<Seat>,
    count: usize,
    total: u32,
    breakdown: BTreeMap<WorkspaceType, usize>,
}

fn summarize(selection: &Selection) -> SelectionSummary {
    SelectionSummary {
        seats: selection.seats().to_vec(),
        count: selection.len(),
        total: selection.total(),
        breakdown: selection.breakdown(),
    }
}

/// GET /api/selection
async fn get_selection(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> impl IntoResponse {
    let handle = state.sessions.session(&session.visitor_id).await;
    let guard = handle.lock().await;
    (
        StatusCode::OK,
        Json(json!({ "success": true, "selection": summarize(&guard.selection) })),
    )
}

/// PATCH /api/selection/toggle
async fn toggle_seat(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
    Json(req): Json<SeatRef>,
) -> ApiResult<impl IntoResponse> {
    let seat = state
        .inventory
        .by_id(&req.seat_id)
        .cloned()
        .ok_or_else(|| to_api_error(StatusCode::NOT_FOUND, "Seat not found"))?;

    let handle = state.sessions.session(&session.visitor_id).await;
    let mut guard = handle.lock().await;
    if guard.selection.toggle(&seat) == ToggleOutcome::RefusedBooked {
        // Defensive no-op: the control is already disabled upstream.
        tracing::debug!(seat = %seat.id, "toggle refused for booked seat");
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "selected": guard.selection.contains(&seat.id),
            "selection": summarize(&guard.selection),
        })),
    ))
}

/// PATCH /api/selection/remove
async fn remove_seat(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
    Json(req): Json<SeatRef>,
) -> impl IntoResponse {
    let handle = state.sessions.session(&session.visitor_id).await;
    let mut guard = handle.lock().await;
    guard.selection.remove(&req.seat_id);

    (
        StatusCode::OK,
        Json(json!({ "success": true, "selection": summarize(&guard.selection) })),
    )
}

/// POST /api/selection/clear — the booking flow was abandoned.
async fn clear_selection(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> impl IntoResponse {
    let handle = state.sessions.session(&session.visitor_id).await;
    let mut guard = handle.lock().await;
    guard.selection.clear();

    (
        StatusCode::OK,
        Json(json!({ "success": true, "selection": summarize(&guard.selection) })),
    )
}
