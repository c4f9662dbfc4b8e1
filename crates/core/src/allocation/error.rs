//! Allocation error types.
//!
//! Every failure of the allocation pipeline is reported before any outcome is
//! produced, so a failed calculation never consumes a rotation slot.

use rust_decimal::Decimal;
use thiserror::Error;
use tipjar_shared::AppError;
use tipjar_shared::types::WorkerId;

/// Broad classification of allocation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request as a whole cannot be allocated.
    InvalidInput,
    /// A single upstream worker record is unusable.
    MalformedRecord,
    /// Bill distribution left money unassigned. Always a defect.
    DistributionInvariant,
    /// The engine was built with an unusable configuration.
    Configuration,
}

/// Errors that can occur during tip allocation.
#[derive(Debug, Error)]
pub enum AllocationError {
    // ========== Invalid Input ==========
    /// No workers were supplied.
    #[error("At least one worker is required")]
    NoWorkers,

    /// Tip pool is zero or negative.
    #[error("Tip amount must be positive, got {0}")]
    NonPositiveTipAmount(Decimal),

    /// Tip pool exceeds the configured maximum.
    #[error("Tip amount {amount} exceeds the maximum of {max}")]
    TipAmountTooLarge {
        /// Requested tip pool.
        amount: Decimal,
        /// Configured maximum.
        max: Decimal,
    },

    /// Hours across all workers sum to zero or less.
    #[error("Total hours must be positive, got {0}")]
    NonPositiveTotalHours(Decimal),

    /// Rotation counters start at 1.
    #[error("Rotation counter must be at least 1")]
    InvalidRotationCounter,

    /// Two workers share the same ordinal.
    #[error("Worker id {0} appears more than once")]
    DuplicateWorkerId(WorkerId),

    /// A computed amount does not fit the decimal or cash range.
    #[error("Amount out of range while computing {0}")]
    ArithmeticOverflow(&'static str),

    // ========== Malformed Records ==========
    /// Worker record has no usable name.
    #[error("Record {position} is missing a worker name")]
    MissingName {
        /// 1-based position of the record in the input.
        position: usize,
    },

    /// Worker record has missing, non-numeric, or negative hours.
    #[error("Record {position} has invalid hours: {value}")]
    InvalidHours {
        /// 1-based position of the record in the input.
        position: usize,
        /// The offending value as received.
        value: String,
    },

    // ========== Configuration ==========
    /// Denomination list cannot settle every whole-dollar amount.
    #[error("Invalid denominations: {0}")]
    InvalidDenominations(String),

    // ========== Defects ==========
    /// Money was left over after the smallest denomination.
    #[error("Bill distribution left {remaining} undistributed for worker {worker_id}")]
    DistributionInvariant {
        /// Worker whose balance did not reach zero.
        worker_id: WorkerId,
        /// Dollars left over.
        remaining: u64,
    },
}

impl AllocationError {
    /// Returns the broad kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoWorkers
            | Self::NonPositiveTipAmount(_)
            | Self::TipAmountTooLarge { .. }
            | Self::NonPositiveTotalHours(_)
            | Self::InvalidRotationCounter
            | Self::DuplicateWorkerId(_)
            | Self::ArithmeticOverflow(_) => ErrorKind::InvalidInput,
            Self::MissingName { .. } | Self::InvalidHours { .. } => ErrorKind::MalformedRecord,
            Self::InvalidDenominations(_) => ErrorKind::Configuration,
            Self::DistributionInvariant { .. } => ErrorKind::DistributionInvariant,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoWorkers => "NO_WORKERS",
            Self::NonPositiveTipAmount(_) => "NON_POSITIVE_TIP_AMOUNT",
            Self::TipAmountTooLarge { .. } => "TIP_AMOUNT_TOO_LARGE",
            Self::NonPositiveTotalHours(_) => "NON_POSITIVE_TOTAL_HOURS",
            Self::InvalidRotationCounter => "INVALID_ROTATION_COUNTER",
            Self::DuplicateWorkerId(_) => "DUPLICATE_WORKER_ID",
            Self::ArithmeticOverflow(_) => "AMOUNT_OUT_OF_RANGE",
            Self::MissingName { .. } => "MISSING_NAME",
            Self::InvalidHours { .. } => "INVALID_HOURS",
            Self::InvalidDenominations(_) => "INVALID_DENOMINATIONS",
            Self::DistributionInvariant { .. } => "DISTRIBUTION_INVARIANT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidInput => 400,
            ErrorKind::MalformedRecord => 422,
            ErrorKind::DistributionInvariant | ErrorKind::Configuration => 500,
        }
    }
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::InvalidInput => Self::Validation(message),
            ErrorKind::MalformedRecord => Self::MalformedRecord(message),
            ErrorKind::Configuration => Self::Configuration(message),
            ErrorKind::DistributionInvariant => Self::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AllocationError::NoWorkers.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            AllocationError::NonPositiveTotalHours(Decimal::ZERO).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            AllocationError::MissingName { position: 1 }.kind(),
            ErrorKind::MalformedRecord
        );
        assert_eq!(
            AllocationError::InvalidHours {
                position: 2,
                value: "abc".to_string(),
            }
            .kind(),
            ErrorKind::MalformedRecord
        );
        assert_eq!(
            AllocationError::DistributionInvariant {
                worker_id: WorkerId(1),
                remaining: 3,
            }
            .kind(),
            ErrorKind::DistributionInvariant
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AllocationError::NoWorkers.error_code(), "NO_WORKERS");
        assert_eq!(
            AllocationError::NonPositiveTipAmount(dec!(-1)).error_code(),
            "NON_POSITIVE_TIP_AMOUNT"
        );
        assert_eq!(
            AllocationError::InvalidRotationCounter.error_code(),
            "INVALID_ROTATION_COUNTER"
        );
        assert_eq!(
            AllocationError::MissingName { position: 1 }.error_code(),
            "MISSING_NAME"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(AllocationError::NoWorkers.http_status_code(), 400);
        assert_eq!(
            AllocationError::MissingName { position: 1 }.http_status_code(),
            422
        );
        assert_eq!(
            AllocationError::DistributionInvariant {
                worker_id: WorkerId(1),
                remaining: 1,
            }
            .http_status_code(),
            500
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = AllocationError::NonPositiveTotalHours(dec!(0)).into();
        assert!(matches!(app, AppError::Validation(_)));
        assert_eq!(app.status_code(), 400);

        let app: AppError = AllocationError::InvalidHours {
            position: 3,
            value: "-2".to_string(),
        }
        .into();
        assert!(matches!(app, AppError::MalformedRecord(_)));
        assert_eq!(app.to_string(), "Malformed record: Record 3 has invalid hours: -2");
    }

    #[test]
    fn test_error_display() {
        let err = AllocationError::TipAmountTooLarge {
            amount: dec!(250000),
            max: dec!(100000),
        };
        assert_eq!(
            err.to_string(),
            "Tip amount 250000 exceeds the maximum of 100000"
        );

        let err = AllocationError::DistributionInvariant {
            worker_id: WorkerId(2),
            remaining: 4,
        };
        assert_eq!(
            err.to_string(),
            "Bill distribution left 4 undistributed for worker 2"
        );
    }
}
