use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::{inventory::SeatFilter, middleware::SessionContext, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/seats", get(get_seats))
}

#[derive(Debug, Deserialize)]
pub struct SeatsQuery {
    pub filter: Option<SeatFilter>,
}

/// GET /api/seats?filter=conference
///
/// The filter set is closed; an unknown value is rejected at the query
/// boundary before this handler runs.
async fn get_seats(
    State(state): State<Arc<AppState>>,
    _session: SessionContext,
    Query(params): Query<SeatsQuery>,
) -> impl IntoResponse {
    let filter = params.filter.unwrap_or(SeatFilter::All);
    let seats = state.inventory.visible(filter);
    let stats = state.inventory.stats();

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "count": seats.len(),
            "seats": seats,
            "stats": stats,
        })),
    )
}
