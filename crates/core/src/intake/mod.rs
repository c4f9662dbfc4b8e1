//! Upstream record intake.
//!
//! Workers arrive as loosely typed `{name, hours}` records, typed by hand or
//! pulled off a scanned schedule. This module numbers them and rejects any
//! record it cannot trust, instead of coercing bad hours to zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tipjar_shared::types::WorkerId;

use crate::allocation::{AllocationError, Worker};

pub use crate::allocation::total_hours;

/// A worker record as delivered by an upstream collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    /// Worker name. Missing or blank names are rejected.
    #[serde(default)]
    pub name: Option<String>,
    /// Hours worked, as a JSON number or numeric string.
    #[serde(default)]
    pub hours: Option<Value>,
}

impl WorkerRecord {
    /// Creates a record from a name and a numeric string.
    #[must_use]
    pub fn new(name: impl Into<String>, hours: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            hours: Some(Value::String(hours.into())),
        }
    }
}

/// Converts upstream records into numbered workers.
///
/// Workers are numbered `1..=n` in input order and names are trimmed.
///
/// # Errors
///
/// Returns `NoWorkers` for an empty list, `MissingName` for a missing or blank
/// name, and `InvalidHours` for missing, non-numeric, or negative hours. The
/// first bad record wins.
pub fn parse_records(records: &[WorkerRecord]) -> Result<Vec<Worker>, AllocationError> {
    if records.is_empty() {
        return Err(AllocationError::NoWorkers);
    }

    records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect()
}

fn parse_record(index: usize, record: &WorkerRecord) -> Result<Worker, AllocationError> {
    let position = index + 1;
    let id = WorkerId::from_position(index)
        .ok_or(AllocationError::ArithmeticOverflow("worker ordinal"))?;

    let name = record
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(AllocationError::MissingName { position })?;

    let hours = parse_hours(record.hours.as_ref()).ok_or_else(|| AllocationError::InvalidHours {
        position,
        value: record
            .hours
            .as_ref()
            .map_or_else(|| "missing".to_string(), ToString::to_string),
    })?;

    Worker::new(id, name, hours)
}

/// Reads a non-negative decimal out of a JSON number or numeric string.
fn parse_hours(value: Option<&Value>) -> Option<Decimal> {
    let text = match value? {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return None,
    };

    let hours = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()?;

    if hours.is_sign_negative() && !hours.is_zero() {
        return None;
    }
    Some(hours)
}
