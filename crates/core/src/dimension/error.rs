//! Dimension error types.

use chrono::NaiveDate;
use finmart_shared::types::CostCenterId;
use thiserror::Error;

/// Errors raised while building dimension structures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DimensionError {
    /// Two cost centers share an identifier.
    #[error("Duplicate cost center: {0}")]
    DuplicateCostCenter(CostCenterId),

    /// A cost center names a parent that does not exist.
    #[error("Cost center {child} references unknown parent {parent}")]
    UnknownParent {
        /// Cost center carrying the reference.
        child: CostCenterId,
        /// Missing parent.
        parent: CostCenterId,
    },

    /// Following parent links from this cost center never reaches a root.
    #[error("Cost center hierarchy contains a cycle reachable from {0}")]
    HierarchyCycle(CostCenterId),

    /// Calendar range ends before it starts.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}
