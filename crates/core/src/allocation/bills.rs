//! Bill distribution.
//!
//! Turns whole-dollar cash amounts into counts of physical bills. Bills are
//! handed out greedily from the largest denomination down. Within a
//! denomination the workers are swept repeatedly in a rotated priority order
//! until a full sweep hands out nothing, and only then does the next smaller
//! denomination start.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tipjar_shared::types::WorkerId;
use tracing::error;

use super::error::AllocationError;

/// Bill values available in the till, largest first.
///
/// Always contains `1`, so every whole-dollar amount can be settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denominations(Vec<u32>);

impl Denominations {
    /// US bills used for tips: `[20, 10, 5, 1]`.
    pub const USD: [u32; 4] = [20, 10, 5, 1];

    /// Creates a denomination set from any ordering of values.
    ///
    /// Values are sorted descending and de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDenominations` if a value is zero or `1` is missing.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Result<Self, AllocationError> {
        let mut values: Vec<u32> = values.into_iter().collect();
        if values.contains(&0) {
            return Err(AllocationError::InvalidDenominations(
                "denominations must be positive".to_string(),
            ));
        }
        if !values.contains(&1) {
            return Err(AllocationError::InvalidDenominations(
                "a $1 denomination is required to settle every amount".to_string(),
            ));
        }
        values.sort_unstable_by(|a, b| b.cmp(a));
        values.dedup();
        Ok(Self(values))
    }

    /// Iterates denominations from largest to smallest.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Returns the denominations as a slice, largest first.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Default for Denominations {
    fn default() -> Self {
        Self(Self::USD.to_vec())
    }
}

/// Bill counts for one worker, keyed by denomination.
///
/// Every denomination of the run is present, including zero counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillBreakdown(BTreeMap<u32, u64>);

impl BillBreakdown {
    /// Creates an all-zero breakdown for the given denominations.
    #[must_use]
    pub fn empty(denominations: &Denominations) -> Self {
        Self(denominations.iter().map(|d| (d, 0)).collect())
    }

    /// Number of bills of a denomination.
    #[must_use]
    pub fn count(&self, denomination: u32) -> u64 {
        self.0.get(&denomination).copied().unwrap_or(0)
    }

    /// Adds one bill of a denomination.
    pub fn add_bill(&mut self, denomination: u32) {
        *self.0.entry(denomination).or_insert(0) += 1;
    }

    /// Dollar value of all bills.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0
            .iter()
            .map(|(denomination, count)| u64::from(*denomination) * count)
            .sum()
    }

    /// Total number of bills.
    #[must_use]
    pub fn bill_count(&self) -> u64 {
        self.0.values().sum()
    }

    /// Iterates `(denomination, count)` pairs from largest to smallest.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.0.iter().rev().map(|(d, c)| (*d, *c))
    }

    /// Compact listing of non-zero denominations, e.g. `2x$20,1x$5,3x$1`.
    ///
    /// Empty when no bills are owed.
    #[must_use]
    pub fn summary(&self) -> String {
        self.iter()
            .filter(|(_, count)| *count > 0)
            .map(|(denomination, count)| format!("{count}x${denomination}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Result of distributing bills across a set of workers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillDistribution {
    /// Worker ids in the order they were offered bills on every sweep.
    pub priority_order: Vec<WorkerId>,
    /// Breakdown per worker, in the order the amounts were given.
    pub breakdowns: Vec<(WorkerId, BillBreakdown)>,
}

impl BillDistribution {
    /// Breakdown for a worker.
    #[must_use]
    pub fn get(&self, id: WorkerId) -> Option<&BillBreakdown> {
        self.breakdowns
            .iter()
            .find(|(worker_id, _)| *worker_id == id)
            .map(|(_, breakdown)| breakdown)
    }
}

/// Distributes whole-dollar cash amounts into bills.
///
/// `cash_amounts` is in worker order. `start_offset` picks the worker offered
/// bills first (taken modulo the number of workers); the rest follow in order,
/// wrapping around.
///
/// # Errors
///
/// Returns `DistributionInvariant` if any balance is left after the smallest
/// denomination. That can only happen through a defect, since
/// [`Denominations`] always contains `1`.
pub fn distribute_bills(
    cash_amounts: &[(WorkerId, u64)],
    start_offset: usize,
    denominations: &Denominations,
) -> Result<BillDistribution, AllocationError> {
    let count = cash_amounts.len();
    if count == 0 {
        return Ok(BillDistribution::default());
    }

    let order: Vec<usize> = (0..count).map(|i| (start_offset + i) % count).collect();
    let mut remaining: Vec<u64> = cash_amounts.iter().map(|(_, cash)| *cash).collect();
    let mut breakdowns: Vec<BillBreakdown> = vec![BillBreakdown::empty(denominations); count];

    for denomination in denominations.iter() {
        let value = u64::from(denomination);
        loop {
            let mut awarded = false;
            for &idx in &order {
                if remaining[idx] >= value {
                    remaining[idx] -= value;
                    breakdowns[idx].add_bill(denomination);
                    awarded = true;
                }
            }
            if !awarded {
                break;
            }
        }
    }

    for (idx, left) in remaining.iter().enumerate() {
        if *left != 0 {
            let worker_id = cash_amounts[idx].0;
            error!(%worker_id, remaining = *left, "bill distribution left a balance");
            return Err(AllocationError::DistributionInvariant {
                worker_id,
                remaining: *left,
            });
        }
    }

    Ok(BillDistribution {
        priority_order: order.iter().map(|&idx| cash_amounts[idx].0).collect(),
        breakdowns: cash_amounts
            .iter()
            .map(|(id, _)| *id)
            .zip(breakdowns)
            .collect(),
    })
}
