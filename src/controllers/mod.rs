pub mod payment;
pub mod seats;
pub mod selection;

use std::sync::Arc;

use axum::{http::StatusCode, Json, Router};
use serde::Serialize;

use crate::AppState;

// --- Shared response plumbing ---

#[derive(Serialize)]
pub struct ApiError {
    success: bool,
    message: String,
}

pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub fn to_api_error(status: StatusCode, message: &str) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            success: false,
            message: message.to_string(),
        }),
    )
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(seats::routes())
        .merge(selection::routes())
        .merge(payment::routes())
}
