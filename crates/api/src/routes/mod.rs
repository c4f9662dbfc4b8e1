//! API route definitions.

use axum::Router;

use crate::{AppState, error::ApiError};
use tipjar_shared::AppError;

pub mod health;
pub mod tips;
pub mod workers;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(workers::routes())
        .merge(tips::routes())
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError(AppError::NotFound("no such endpoint".to_string()))
}
