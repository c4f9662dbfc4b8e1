//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for worker intake, tip calculation, and export
//! - JSON error responses
//!
//! The API is stateless. Callers send the rotation counter with every
//! calculation and store the returned `next_rotation_counter` themselves.

pub mod error;
pub mod extract;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tipjar_core::allocation::AllocationEngine;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Allocation engine with the configured denominations and limits.
    pub engine: Arc<AllocationEngine>,
}

impl AppState {
    /// Creates state around an engine.
    #[must_use]
    pub fn new(engine: AllocationEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
