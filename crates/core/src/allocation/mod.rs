//! Tip pool allocation.
//!
//! This module implements the allocation pipeline:
//! - Hourly rate truncated to whole cents
//! - Exact per-worker amounts and cash rounded to whole dollars
//! - Greedy bill distribution with a rotating start worker
//! - Orchestration that threads the rotation counter through the caller

pub mod bills;
pub mod engine;
pub mod error;
pub mod rate;
pub mod types;

#[cfg(test)]
mod props;

pub use bills::{BillBreakdown, BillDistribution, Denominations, distribute_bills};
pub use engine::AllocationEngine;
pub use error::{AllocationError, ErrorKind};
pub use rate::{compute_exact_and_cash, compute_rate, total_hours};
pub use types::{AllocationInput, AllocationOutcome, RotationCounter, Worker, WorkerAllocation};
