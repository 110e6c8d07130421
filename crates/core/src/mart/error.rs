//! Mart error types.

use finmart_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

use super::key::MartKey;
use super::types::Measure;
use crate::integrity::IntegrityError;

/// Errors that block publication of the mart.
#[derive(Debug, Error)]
pub enum MartError {
    /// Input rows violate the schema.
    #[error(transparent)]
    Schema(#[from] IntegrityError),

    /// The same grain key was emitted more than once.
    #[error("Mart grain is not unique: {duplicate_rows} duplicate rows across {} keys", .keys.len())]
    GrainViolation {
        /// Rows beyond the first for each repeated key.
        duplicate_rows: usize,
        /// Repeated keys, in canonical order.
        keys: Vec<MartKey>,
    },

    /// Mart total differs from the raw total.
    #[error("{measure} not conserved: raw total {raw_total}, mart total {mart_total}")]
    ConservationViolation {
        /// Column that failed.
        measure: Measure,
        /// Sum over raw fact rows.
        raw_total: Decimal,
        /// Sum over mart rows.
        mart_total: Decimal,
    },
}

impl From<MartError> for AppError {
    fn from(err: MartError) -> Self {
        match &err {
            MartError::Schema(_) => Self::SchemaViolation(err.to_string()),
            MartError::GrainViolation { .. } => Self::GrainViolation(err.to_string()),
            MartError::ConservationViolation { .. } => Self::ConservationViolation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_grain_display() {
        let err = MartError::GrainViolation {
            duplicate_rows: 3,
            keys: vec![MartKey::new(2024, 1, "CC1", "6000")],
        };
        assert_eq!(
            err.to_string(),
            "Mart grain is not unique: 3 duplicate rows across 1 keys"
        );
    }

    #[test]
    fn test_conservation_display() {
        let err = MartError::ConservationViolation {
            measure: Measure::Actual,
            raw_total: dec!(100.00),
            mart_total: dec!(99.99),
        };
        assert_eq!(
            err.to_string(),
            "actual_amount not conserved: raw total 100.00, mart total 99.99"
        );
    }

    #[test]
    fn test_into_app_error() {
        let err = MartError::ConservationViolation {
            measure: Measure::Budget,
            raw_total: dec!(1),
            mart_total: dec!(2),
        };
        let app: AppError = err.into();
        assert_eq!(app.error_code(), "CONSERVATION_VIOLATION");
        assert!(app.blocks_publication());
    }
}
