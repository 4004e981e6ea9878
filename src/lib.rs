pub mod config;
pub mod controllers;
pub mod inventory;
pub mod middleware;
pub mod models;
pub mod selection;
pub mod services;
pub mod session;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::inventory::Inventory;
use crate::session::SessionRegistry;

// Shared state for the whole application
pub struct AppState {
    /// Fixed floor-plan catalog, read-only after startup.
    pub inventory: Inventory,
    /// Per-visitor selection and payment state.
    pub sessions: SessionRegistry,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        Arc::new(Self {
            inventory: Inventory::floor_plan(),
            sessions: SessionRegistry::default(),
            config,
        })
    }
}

/// Builds the application router: service banner, health check and the
/// booking API, behind request tracing and permissive CORS.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "SkyDesk Booking API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
