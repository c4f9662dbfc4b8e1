//! Worker intake routes.

use axum::{Json, Router, routing::post};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tipjar_core::allocation::Worker;
use tipjar_core::intake::{WorkerRecord, parse_records, total_hours};

use crate::{AppState, error::ApiError, extract::JsonBody};

/// Creates the worker intake routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/workers/validate", post(validate_workers))
}

/// Request body carrying upstream worker records.
#[derive(Debug, Deserialize)]
pub struct WorkerRecordsRequest {
    /// Records in schedule order.
    #[serde(default)]
    pub workers: Vec<WorkerRecord>,
}

/// Numbered workers ready for allocation.
#[derive(Debug, Serialize)]
pub struct ValidatedWorkersResponse {
    /// Workers numbered `1..=n`.
    pub workers: Vec<Worker>,
    /// Sum of all hours.
    pub total_hours: Decimal,
}

/// POST /workers/validate
async fn validate_workers(
    JsonBody(request): JsonBody<WorkerRecordsRequest>,
) -> Result<Json<ValidatedWorkersResponse>, ApiError> {
    let workers = parse_records(&request.workers)?;
    let total_hours = total_hours(&workers)?;
    Ok(Json(ValidatedWorkersResponse {
        workers,
        total_hours,
    }))
}
