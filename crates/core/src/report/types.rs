//! Report row types.

use serde::{Deserialize, Serialize};
use tipjar_shared::types::{format_cash, format_dollars, format_hours};

use crate::allocation::{AllocationOutcome, WorkerAllocation};

/// One display row per worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Worker ordinal.
    pub number: u32,
    /// Worker name.
    pub name: String,
    /// Hours, without trailing zeros.
    pub hours: String,
    /// `"{hours} × ${rate} = ${exact}"`.
    pub calculation: String,
    /// Cash handed out, e.g. `$53`.
    pub cash: String,
    /// Bill listing, e.g. `2x$20,1x$10,3x$1`.
    pub bills: String,
}

impl ReportRow {
    /// Builds the display row for one worker.
    #[must_use]
    pub fn from_allocation(allocation: &WorkerAllocation) -> Self {
        let hours = format_hours(allocation.hours);
        Self {
            number: allocation.id.into_inner(),
            name: allocation.name.clone(),
            calculation: format!(
                "{hours} × {} = {}",
                format_dollars(allocation.hourly_rate),
                format_dollars(allocation.exact_amount)
            ),
            hours,
            cash: format_cash(allocation.cash_amount),
            bills: allocation.bills_summary.clone(),
        }
    }
}

/// Builds display rows for every worker, in input order.
#[must_use]
pub fn report_rows(outcome: &AllocationOutcome) -> Vec<ReportRow> {
    outcome
        .allocations
        .iter()
        .map(ReportRow::from_allocation)
        .collect()
}
