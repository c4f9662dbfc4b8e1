//! Property-based tests for tip allocation.
//!
//! - Rate truncation never overstates the pool
//! - Bills always add up to the cash amount
//! - Cash is the exact amount rounded half away from zero
//! - Runs are deterministic and the rotation repeats every `n` runs

use proptest::prelude::*;
use rust_decimal::prelude::*;
use tipjar_shared::types::WorkerId;

use super::bills::{Denominations, distribute_bills};
use super::engine::AllocationEngine;
use super::types::{AllocationInput, RotationCounter, Worker};

/// Hours between 0.00 and 80.00, in quarter hours.
fn hours() -> impl Strategy<Value = Decimal> {
    (0i64..=320).prop_map(|quarters| Decimal::new(quarters * 25, 2))
}

/// Tip pool between $0.01 and $5,000.00.
fn tip_pool() -> impl Strategy<Value = Decimal> {
    (1i64..=500_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// One to twelve workers with at least one positive shift.
fn crew() -> impl Strategy<Value = Vec<Worker>> {
    prop::collection::vec(hours(), 1..12)
        .prop_filter("someone must have worked", |h| h.iter().any(|x| !x.is_zero()))
        .prop_map(|hours| {
            hours
                .into_iter()
                .enumerate()
                .map(|(i, h)| Worker {
                    id: WorkerId::from_position(i).unwrap(),
                    name: format!("Worker {}", i + 1),
                    hours: h,
                })
                .collect()
        })
}

fn rotation() -> impl Strategy<Value = RotationCounter> {
    (1u64..10_000).prop_map(|v| RotationCounter::new(v).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Rate is whole cents and equals floor(pool / hours * 100) / 100.
    #[test]
    fn prop_rate_is_truncated_to_cents(
        workers in crew(),
        pool in tip_pool(),
    ) {
        let input = AllocationInput::new(workers, pool, RotationCounter::FIRST);
        let outcome = AllocationEngine::default().calculate_tips(&input).unwrap();

        let cents = outcome.hourly_rate * Decimal::ONE_HUNDRED;
        prop_assert_eq!(cents, cents.trunc(), "rate {} is not whole cents", outcome.hourly_rate);

        let expected = (pool / outcome.total_hours * Decimal::ONE_HUNDRED).floor();
        prop_assert_eq!(cents, expected);
        prop_assert!(outcome.hourly_rate * outcome.total_hours <= pool);
    }

    /// Every worker's bills add up to exactly their cash amount.
    #[test]
    fn prop_bills_sum_to_cash(
        workers in crew(),
        pool in tip_pool(),
        counter in rotation(),
    ) {
        let input = AllocationInput::new(workers, pool, counter);
        let outcome = AllocationEngine::default().calculate_tips(&input).unwrap();

        for allocation in &outcome.allocations {
            prop_assert_eq!(
                allocation.bills.total(),
                allocation.cash_amount,
                "worker {} bills {}",
                allocation.id,
                allocation.bills_summary
            );
        }
    }

    /// Cash is the exact amount rounded to whole dollars, ties away from zero.
    #[test]
    fn prop_cash_rounds_exact_amount(
        workers in crew(),
        pool in tip_pool(),
    ) {
        let input = AllocationInput::new(workers, pool, RotationCounter::FIRST);
        let outcome = AllocationEngine::default().calculate_tips(&input).unwrap();

        for allocation in &outcome.allocations {
            let expected = allocation
                .exact_amount
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            prop_assert_eq!(Decimal::from(allocation.cash_amount), expected);

            let diff = (Decimal::from(allocation.cash_amount) - allocation.exact_amount).abs();
            prop_assert!(diff <= Decimal::new(5, 1));
        }
    }

    /// Same inputs and counter, same outcome.
    #[test]
    fn prop_allocation_is_deterministic(
        workers in crew(),
        pool in tip_pool(),
        counter in rotation(),
    ) {
        let engine = AllocationEngine::default();
        let input = AllocationInput::new(workers, pool, counter);
        let first = engine.calculate_tips(&input).unwrap();
        let second = engine.calculate_tips(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Counter k and k + n distribute identically.
    #[test]
    fn prop_rotation_repeats_every_full_cycle(
        cash in prop::collection::vec(0u64..500, 1..10),
        k in 1u64..1_000,
    ) {
        let amounts: Vec<(WorkerId, u64)> = cash
            .iter()
            .enumerate()
            .map(|(i, c)| (WorkerId::from_position(i).unwrap(), *c))
            .collect();
        let n = amounts.len();
        let denominations = Denominations::default();

        let now = RotationCounter::new(k).unwrap();
        let later = RotationCounter::new(k + n as u64).unwrap();

        let a = distribute_bills(&amounts, now.start_offset(n), &denominations).unwrap();
        let b = distribute_bills(&amounts, later.start_offset(n), &denominations).unwrap();
        prop_assert_eq!(a, b);
    }

    /// The worker served first is always the one at the rotation offset.
    #[test]
    fn prop_priority_starts_at_offset(
        workers in crew(),
        counter in rotation(),
    ) {
        let n = workers.len();
        let expected_first = workers[counter.start_offset(n)].id;
        let input = AllocationInput::new(workers, Decimal::ONE_HUNDRED, counter);
        let outcome = AllocationEngine::default().calculate_tips(&input).unwrap();

        prop_assert_eq!(outcome.priority_order.len(), n);
        prop_assert_eq!(outcome.priority_order[0], expected_first);
        prop_assert_eq!(outcome.next_rotation_counter.value(), counter.value() + 1);
    }

    /// Bills of the same size are never split when a larger one fits.
    #[test]
    fn prop_greedy_uses_fewest_small_bills(
        cash in 0u64..10_000,
    ) {
        let result = distribute_bills(&[(WorkerId(1), cash)], 0, &Denominations::default()).unwrap();
        let bills = result.get(WorkerId(1)).unwrap();
        prop_assert_eq!(bills.count(20), cash / 20);
        prop_assert!(bills.count(10) <= 1);
        prop_assert!(bills.count(5) <= 1);
        prop_assert!(bills.count(1) <= 4);
    }
}
