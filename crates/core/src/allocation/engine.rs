//! Allocation engine.
//!
//! Chains rate, cash and bill computation into one run. The engine holds only
//! immutable settings; the rotation counter comes in with the input and the
//! next value goes out with the outcome.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tipjar_shared::config::AllocationConfig;
use tracing::{debug, instrument};

use super::bills::{Denominations, distribute_bills};
use super::error::AllocationError;
use super::rate::{compute_exact_and_cash, compute_rate, total_hours};
use super::types::{AllocationInput, AllocationOutcome, WorkerAllocation};

/// Default ceiling for a single tip pool.
pub const DEFAULT_MAX_TIP_AMOUNT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Engine for running tip allocations.
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    denominations: Denominations,
    max_tip_amount: Decimal,
}

impl AllocationEngine {
    /// Creates an engine with explicit settings.
    #[must_use]
    pub const fn new(denominations: Denominations, max_tip_amount: Decimal) -> Self {
        Self {
            denominations,
            max_tip_amount,
        }
    }

    /// Creates an engine from application configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDenominations` if the configured bills cannot settle
    /// every amount.
    pub fn from_config(config: &AllocationConfig) -> Result<Self, AllocationError> {
        let denominations = Denominations::new(config.denominations.iter().copied())?;
        Ok(Self::new(denominations, config.max_tip_amount))
    }

    /// Denominations this engine hands out.
    #[must_use]
    pub fn denominations(&self) -> &Denominations {
        &self.denominations
    }

    /// Runs a full allocation.
    ///
    /// Computes the rate once, then each worker's exact and cash amounts, then
    /// distributes bills starting from the worker picked by the rotation
    /// counter. The outcome carries the counter for the next run; on error
    /// there is no outcome and the caller keeps its current counter.
    ///
    /// Identical inputs always produce identical outcomes.
    #[instrument(
        name = "calculate_tips",
        skip_all,
        fields(workers = input.workers.len(), rotation = %input.rotation_counter)
    )]
    pub fn calculate_tips(
        &self,
        input: &AllocationInput,
    ) -> Result<AllocationOutcome, AllocationError> {
        self.validate(input)?;

        let hourly_rate = compute_rate(&input.workers, input.total_tip_amount)?;
        let total_hours = total_hours(&input.workers)?;
        debug!(%hourly_rate, %total_hours, pool = %input.total_tip_amount, "hourly rate computed");

        let amounts = input
            .workers
            .iter()
            .map(|worker| compute_exact_and_cash(worker, hourly_rate))
            .collect::<Result<Vec<_>, _>>()?;

        let cash_amounts: Vec<_> = input
            .workers
            .iter()
            .zip(&amounts)
            .map(|(worker, (_, cash))| (worker.id, *cash))
            .collect();

        let start_offset = input.rotation_counter.start_offset(input.workers.len());
        let distribution = distribute_bills(&cash_amounts, start_offset, &self.denominations)?;

        let allocations = input
            .workers
            .iter()
            .zip(amounts)
            .zip(distribution.breakdowns)
            .map(|((worker, (exact_amount, cash_amount)), (_, bills))| WorkerAllocation {
                id: worker.id,
                name: worker.name.clone(),
                hours: worker.hours,
                hourly_rate,
                exact_amount,
                cash_amount,
                bills_summary: bills.summary(),
                bills,
            })
            .collect();

        let outcome = AllocationOutcome {
            total_tip_amount: input.total_tip_amount,
            total_hours,
            hourly_rate,
            rotation_counter: input.rotation_counter,
            start_offset,
            next_rotation_counter: input.rotation_counter.next(),
            priority_order: distribution.priority_order,
            allocations,
        };

        debug!(
            total_cash = outcome.total_cash(),
            drift = %outcome.rounding_drift(),
            start_offset,
            "tips allocated"
        );

        Ok(outcome)
    }

    fn validate(&self, input: &AllocationInput) -> Result<(), AllocationError> {
        if input.workers.is_empty() {
            return Err(AllocationError::NoWorkers);
        }
        if input.total_tip_amount > self.max_tip_amount {
            return Err(AllocationError::TipAmountTooLarge {
                amount: input.total_tip_amount,
                max: self.max_tip_amount,
            });
        }

        let mut seen = HashSet::with_capacity(input.workers.len());
        for worker in &input.workers {
            worker.validate()?;
            if !seen.insert(worker.id) {
                return Err(AllocationError::DuplicateWorkerId(worker.id));
            }
        }
        Ok(())
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new(Denominations::default(), DEFAULT_MAX_TIP_AMOUNT)
    }
}
