//! Tip calculation and export routes.

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tipjar_core::allocation::{AllocationInput, AllocationOutcome, RotationCounter};
use tipjar_core::intake::{WorkerRecord, parse_records};
use tipjar_core::report::{ReportRow, render_html, render_text, report_rows};
use tracing::info;

use crate::{AppState, error::ApiError, extract::JsonBody};

/// Creates tip routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tips/calculate", post(calculate_tips))
        .route("/tips/export/text", post(export_text))
        .route("/tips/export/html", post(export_html))
}

/// Request to split a tip pool.
#[derive(Debug, Deserialize)]
pub struct CalculateTipsRequest {
    /// Upstream worker records in schedule order.
    #[serde(default)]
    pub workers: Vec<WorkerRecord>,
    /// Cash in the tip pool.
    pub total_tip_amount: Decimal,
    /// Counter from the previous run's `next_rotation_counter`. Defaults to 1.
    #[serde(default)]
    pub rotation_counter: Option<u64>,
}

/// Calculation result plus display rows.
#[derive(Debug, Serialize)]
pub struct CalculateTipsResponse {
    /// Full allocation outcome.
    pub outcome: AllocationOutcome,
    /// One formatted row per worker.
    pub rows: Vec<ReportRow>,
}

/// POST /tips/calculate
async fn calculate_tips(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CalculateTipsRequest>,
) -> Result<Json<CalculateTipsResponse>, ApiError> {
    let workers = parse_records(&request.workers)?;
    let rotation_counter = request
        .rotation_counter
        .map_or(Ok(RotationCounter::FIRST), RotationCounter::new)?;

    let input = AllocationInput::new(workers, request.total_tip_amount, rotation_counter);
    let outcome = state.engine.calculate_tips(&input)?;

    info!(
        workers = outcome.allocations.len(),
        total_cash = outcome.total_cash(),
        next_rotation = %outcome.next_rotation_counter,
        "Tips calculated"
    );

    let rows = report_rows(&outcome);
    Ok(Json(CalculateTipsResponse { outcome, rows }))
}

/// POST /tips/export/text
async fn export_text(JsonBody(outcome): JsonBody<AllocationOutcome>) -> Response {
    attachment(
        "text/plain; charset=utf-8",
        "tip_distribution.txt",
        render_text(&outcome),
    )
}

/// POST /tips/export/html
async fn export_html(JsonBody(outcome): JsonBody<AllocationOutcome>) -> Response {
    attachment(
        "text/html; charset=utf-8",
        "tip_distribution.html",
        render_html(&outcome),
    )
}

fn attachment(content_type: &'static str, filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}
