//! Hourly rate and per-worker amounts.

use rust_decimal::prelude::*;

use super::error::AllocationError;
use super::types::Worker;

/// Decimal places kept in the hourly rate (whole cents).
pub const RATE_SCALE: u32 = 2;

/// Sums worker hours.
///
/// # Errors
///
/// Returns `ArithmeticOverflow` if the sum leaves the decimal range.
pub fn total_hours(workers: &[Worker]) -> Result<Decimal, AllocationError> {
    workers.iter().try_fold(Decimal::ZERO, |sum, worker| {
        sum.checked_add(worker.hours)
            .ok_or(AllocationError::ArithmeticOverflow("total hours"))
    })
}

/// Computes the hourly tip rate, truncated to whole cents.
///
/// Truncation never rounds up, so `rate * total_hours` cannot exceed the pool.
///
/// # Errors
///
/// Returns an `InvalidInput` error if the list is empty, the tip amount is not
/// positive, or the hours do not sum to a positive value.
pub fn compute_rate(workers: &[Worker], total_tip_amount: Decimal) -> Result<Decimal, AllocationError> {
    if workers.is_empty() {
        return Err(AllocationError::NoWorkers);
    }
    if total_tip_amount <= Decimal::ZERO {
        return Err(AllocationError::NonPositiveTipAmount(total_tip_amount));
    }

    let hours = total_hours(workers)?;
    if hours <= Decimal::ZERO {
        return Err(AllocationError::NonPositiveTotalHours(hours));
    }

    let raw_rate = total_tip_amount
        .checked_div(hours)
        .ok_or(AllocationError::ArithmeticOverflow("hourly rate"))?;

    // Positive, so truncating toward zero is a floor
    let mut rate = raw_rate.round_dp_with_strategy(RATE_SCALE, RoundingStrategy::ToZero);

    // The quotient is rounded to 28 significant digits and may land on a cent
    // boundary from below; step down until the rate fits the pool exactly.
    let cent = Decimal::new(1, RATE_SCALE);
    while rate > Decimal::ZERO
        && rate
            .checked_mul(hours)
            .ok_or(AllocationError::ArithmeticOverflow("hourly rate"))?
            > total_tip_amount
    {
        rate -= cent;
    }

    Ok(rate)
}

/// Computes a worker's exact share and the cash they receive.
///
/// The exact amount is kept unrounded. Cash is rounded to whole dollars with
/// ties going away from zero, so `52.5` pays `53`.
///
/// # Errors
///
/// Returns `ArithmeticOverflow` if the amounts leave the decimal or `u64` range.
pub fn compute_exact_and_cash(
    worker: &Worker,
    hourly_rate: Decimal,
) -> Result<(Decimal, u64), AllocationError> {
    let exact_amount = worker
        .hours
        .checked_mul(hourly_rate)
        .ok_or(AllocationError::ArithmeticOverflow("exact amount"))?;

    let cash_amount = exact_amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(AllocationError::ArithmeticOverflow("cash amount"))?;

    Ok((exact_amount, cash_amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tipjar_shared::types::WorkerId;

    fn workers(hours: &[Decimal]) -> Vec<Worker> {
        hours
            .iter()
            .enumerate()
            .map(|(i, h)| Worker {
                id: WorkerId::from_position(i).unwrap(),
                name: format!("Worker {}", i + 1),
                hours: *h,
            })
            .collect()
    }

    #[test]
    fn test_total_hours() {
        let list = workers(&[dec!(32.5), dec!(28.75)]);
        assert_eq!(total_hours(&list).unwrap(), dec!(61.25));
        assert_eq!(total_hours(&[]).unwrap(), Decimal::ZERO);
    }

    #[rstest]
    #[case(dec!(100.00), &[dec!(32.5), dec!(28.75)], dec!(1.63))]
    #[case(dec!(100), &[dec!(25), dec!(25)], dec!(2))]
    #[case(dec!(10), &[dec!(3)], dec!(3.33))]
    #[case(dec!(20), &[dec!(3)], dec!(6.66))]
    #[case(dec!(1), &[dec!(200)], dec!(0))]
    #[case(dec!(543.21), &[dec!(40), dec!(40), dec!(20)], dec!(5.43))]
    fn test_compute_rate_truncates(
        #[case] pool: Decimal,
        #[case] hours: &[Decimal],
        #[case] expected: Decimal,
    ) {
        assert_eq!(compute_rate(&workers(hours), pool).unwrap(), expected);
    }

    #[test]
    fn test_compute_rate_never_exceeds_pool_at_full_precision() {
        // 56 / 7.0000000000000000000000000001 divides to exactly 8 at 28 digits
        let hours = Decimal::from_str("7.0000000000000000000000000001").unwrap();
        let rate = compute_rate(&workers(&[hours]), dec!(56)).unwrap();
        assert_eq!(rate, dec!(7.99));
        assert!(rate * hours <= dec!(56));
    }

    #[test]
    fn test_compute_rate_exact_division_is_untouched() {
        let rate = compute_rate(&workers(&[dec!(10), dec!(15)]), dec!(62.50)).unwrap();
        assert_eq!(rate, dec!(2.50));
        assert_eq!(rate * dec!(25), dec!(62.50));
    }

    #[test]
    fn test_compute_rate_boundary_five_is_truncated() {
        // 16.875 / 10 = 1.6875 exactly; naive rounding would give 1.69
        let rate = compute_rate(&workers(&[dec!(10)]), dec!(16.875)).unwrap();
        assert_eq!(rate, dec!(1.68));
    }

    #[test]
    fn test_compute_rate_errors() {
        assert!(matches!(
            compute_rate(&[], dec!(100)),
            Err(AllocationError::NoWorkers)
        ));
        assert!(matches!(
            compute_rate(&workers(&[dec!(8)]), dec!(0)),
            Err(AllocationError::NonPositiveTipAmount(_))
        ));
        assert!(matches!(
            compute_rate(&workers(&[dec!(8)]), dec!(-5)),
            Err(AllocationError::NonPositiveTipAmount(_))
        ));
        assert!(matches!(
            compute_rate(&workers(&[dec!(0), dec!(0)]), dec!(100)),
            Err(AllocationError::NonPositiveTotalHours(_))
        ));
    }

    #[rstest]
    #[case(dec!(32.5), dec!(1.63), dec!(52.975), 53)]
    #[case(dec!(28.75), dec!(1.63), dec!(46.8625), 47)]
    #[case(dec!(10), dec!(4.25), dec!(42.50), 43)]
    #[case(dec!(5), dec!(0.49), dec!(2.45), 2)]
    #[case(dec!(0), dec!(3.10), dec!(0), 0)]
    #[case(dec!(1), dec!(0.50), dec!(0.50), 1)]
    fn test_compute_exact_and_cash(
        #[case] hours: Decimal,
        #[case] rate: Decimal,
        #[case] exact: Decimal,
        #[case] cash: u64,
    ) {
        let worker = Worker {
            id: WorkerId(1),
            name: "Alice".to_string(),
            hours,
        };
        let (exact_amount, cash_amount) = compute_exact_and_cash(&worker, rate).unwrap();
        assert_eq!(exact_amount, exact);
        assert_eq!(cash_amount, cash);
    }
}
