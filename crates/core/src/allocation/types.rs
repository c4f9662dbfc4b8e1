//! Allocation domain types.
//!
//! Inputs are plain data handed over by the intake layer; outputs are fresh
//! result sets that are never mutated after the engine returns them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tipjar_shared::types::WorkerId;

use super::bills::BillBreakdown;
use super::error::AllocationError;

/// A worker sharing in the tip pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// 1-based ordinal, assigned in input order.
    pub id: WorkerId,
    /// Display name. Not required to be unique.
    pub name: String,
    /// Hours worked in the pay period.
    pub hours: Decimal,
}

impl Worker {
    /// Creates a worker, rejecting a blank name or negative hours.
    pub fn new(
        id: WorkerId,
        name: impl Into<String>,
        hours: Decimal,
    ) -> Result<Self, AllocationError> {
        let worker = Self {
            id,
            name: name.into(),
            hours,
        };
        worker.validate()?;
        Ok(worker)
    }

    /// Checks the record-level invariants of an already built worker.
    pub fn validate(&self) -> Result<(), AllocationError> {
        let position = usize::try_from(self.id.into_inner()).unwrap_or(usize::MAX);
        if self.name.trim().is_empty() {
            return Err(AllocationError::MissingName { position });
        }
        if self.hours.is_sign_negative() && !self.hours.is_zero() {
            return Err(AllocationError::InvalidHours {
                position,
                value: self.hours.to_string(),
            });
        }
        Ok(())
    }
}

/// Which allocation run this is, counted from 1.
///
/// The counter picks the worker who is served first during bill
/// distribution. It is owned by the caller: the engine reads it and reports
/// the next value, but never stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RotationCounter(u64);

impl RotationCounter {
    /// The counter value for the very first run.
    pub const FIRST: Self = Self(1);

    /// Creates a counter, rejecting zero.
    pub fn new(value: u64) -> Result<Self, AllocationError> {
        if value == 0 {
            Err(AllocationError::InvalidRotationCounter)
        } else {
            Ok(Self(value))
        }
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Position in the worker list that is served first: `(counter - 1) mod n`.
    ///
    /// Returns 0 for an empty list.
    #[must_use]
    pub fn start_offset(self, worker_count: usize) -> usize {
        if worker_count == 0 {
            return 0;
        }
        let count = u64::try_from(worker_count).unwrap_or(u64::MAX);
        let offset = (self.0 - 1) % count;
        usize::try_from(offset).unwrap_or(0)
    }

    /// The counter for the following run.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for RotationCounter {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u64> for RotationCounter {
    type Error = AllocationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RotationCounter> for u64 {
    fn from(counter: RotationCounter) -> Self {
        counter.0
    }
}

impl std::fmt::Display for RotationCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything one allocation run needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationInput {
    /// Workers in input order.
    pub workers: Vec<Worker>,
    /// Cash in the tip pool.
    pub total_tip_amount: Decimal,
    /// Rotation counter for this run.
    #[serde(default)]
    pub rotation_counter: RotationCounter,
}

impl AllocationInput {
    /// Creates an allocation input.
    #[must_use]
    pub fn new(
        workers: Vec<Worker>,
        total_tip_amount: Decimal,
        rotation_counter: RotationCounter,
    ) -> Self {
        Self {
            workers,
            total_tip_amount,
            rotation_counter,
        }
    }
}

/// Allocation result for a single worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerAllocation {
    /// Worker ordinal.
    pub id: WorkerId,
    /// Worker name.
    pub name: String,
    /// Hours worked.
    pub hours: Decimal,
    /// Hourly rate shared by every worker in the run.
    pub hourly_rate: Decimal,
    /// `hours * hourly_rate`, unrounded.
    pub exact_amount: Decimal,
    /// Exact amount rounded to whole dollars, ties away from zero.
    pub cash_amount: u64,
    /// Bills making up `cash_amount`.
    pub bills: BillBreakdown,
    /// Compact bill listing, e.g. `2x$20,1x$5,3x$1`.
    pub bills_summary: String,
}

/// Complete result set of one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// Cash in the tip pool.
    pub total_tip_amount: Decimal,
    /// Sum of all hours.
    pub total_hours: Decimal,
    /// Hourly rate truncated to whole cents.
    pub hourly_rate: Decimal,
    /// Rotation counter this run used.
    pub rotation_counter: RotationCounter,
    /// Position in the worker list that was served first.
    pub start_offset: usize,
    /// Counter the caller should pass to the next run.
    pub next_rotation_counter: RotationCounter,
    /// Worker ids in the order they were served during bill distribution.
    pub priority_order: Vec<WorkerId>,
    /// Per-worker results in input order.
    pub allocations: Vec<WorkerAllocation>,
}

impl AllocationOutcome {
    /// Sum of all cash amounts handed out.
    #[must_use]
    pub fn total_cash(&self) -> u64 {
        self.allocations.iter().map(|a| a.cash_amount).sum()
    }

    /// Difference between cash handed out and the tip pool.
    ///
    /// Positive when rounding handed out more than the pool, negative when
    /// less. Reported only; nothing reconciles it.
    #[must_use]
    pub fn rounding_drift(&self) -> Decimal {
        Decimal::from(self.total_cash()) - self.total_tip_amount
    }

    /// Looks up the allocation for a worker.
    #[must_use]
    pub fn allocation(&self, id: WorkerId) -> Option<&WorkerAllocation> {
        self.allocations.iter().find(|a| a.id == id)
    }
}
