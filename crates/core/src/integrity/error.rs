//! Schema violation types.

use chrono::NaiveDate;
use finmart_shared::types::{CostCenterId, GlAccountId};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::fiscal::FiscalPeriod;
use crate::mart::MartKey;

/// Input data set a violation was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// Cost center dimension.
    CostCenters,
    /// GL account dimension.
    GlAccounts,
    /// Fiscal calendar dimension.
    FiscalCalendar,
    /// Budget facts.
    Budget,
    /// Actual facts.
    Actuals,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CostCenters => write!(f, "cost_centers"),
            Self::GlAccounts => write!(f, "gl_accounts"),
            Self::FiscalCalendar => write!(f, "fiscal_calendar"),
            Self::Budget => write!(f, "finance_budget"),
            Self::Actuals => write!(f, "finance_actuals"),
        }
    }
}

/// One upstream row that does not conform to the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaViolation {
    /// A required field is empty.
    #[error("{table} row {row}: required field `{field}` is empty")]
    MissingField {
        /// Table of the row.
        table: Table,
        /// Zero-based row index.
        row: usize,
        /// Empty column.
        field: &'static str,
    },

    /// Cost center ID appears more than once.
    #[error("cost_centers: duplicate cost_center_id {cost_center_id}")]
    DuplicateCostCenter {
        /// Repeated ID.
        cost_center_id: CostCenterId,
    },

    /// GL account appears more than once.
    #[error("gl_accounts: duplicate gl_account {gl_account}")]
    DuplicateGlAccount {
        /// Repeated account code.
        gl_account: GlAccountId,
    },

    /// Calendar date appears more than once.
    #[error("fiscal_calendar: duplicate calendar_date {calendar_date}")]
    DuplicateCalendarDate {
        /// Repeated date.
        calendar_date: NaiveDate,
    },

    /// A cost center parent is not a known cost center.
    #[error("cost_centers: {cost_center_id} references unknown parent {parent}")]
    UnknownParentCostCenter {
        /// Cost center carrying the reference.
        cost_center_id: CostCenterId,
        /// Missing parent.
        parent: CostCenterId,
    },

    /// A fact row references an unknown cost center.
    #[error("{table} row {row}: unknown cost_center_id {cost_center_id}")]
    UnknownCostCenter {
        /// Table of the row.
        table: Table,
        /// Zero-based row index.
        row: usize,
        /// Unknown reference.
        cost_center_id: CostCenterId,
    },

    /// A fact row references an unknown GL account.
    #[error("{table} row {row}: unknown gl_account {gl_account}")]
    UnknownGlAccount {
        /// Table of the row.
        table: Table,
        /// Zero-based row index.
        row: usize,
        /// Unknown reference.
        gl_account: GlAccountId,
    },

    /// Fiscal period number outside the configured range.
    #[error("{table} row {row}: fiscal_period {fiscal_period} out of range")]
    InvalidFiscalPeriod {
        /// Table of the row.
        table: Table,
        /// Zero-based row index.
        row: usize,
        /// Offending period number.
        fiscal_period: u32,
    },

    /// More than one budget line for a grain key.
    #[error("finance_budget: duplicate grain {key}")]
    DuplicateBudgetGrain {
        /// Repeated grain key.
        key: MartKey,
    },

    /// Budget amount is negative.
    #[error("finance_budget row {row}: negative budget_amount {amount}")]
    NegativeBudget {
        /// Zero-based row index.
        row: usize,
        /// Offending amount.
        amount: Decimal,
    },

    /// Posting date is not covered by the fiscal calendar.
    #[error("finance_actuals row {row}: posting_date {posting_date} outside fiscal calendar")]
    PostingDateOutsideCalendar {
        /// Zero-based row index.
        row: usize,
        /// Offending date.
        posting_date: NaiveDate,
    },

    /// Recorded fiscal period disagrees with the calendar mapping.
    #[error(
        "finance_actuals row {row}: posting_date {posting_date} recorded in {recorded}, calendar maps it to {calendar}"
    )]
    PeriodMismatch {
        /// Zero-based row index.
        row: usize,
        /// Posting date.
        posting_date: NaiveDate,
        /// Period stored on the posting.
        recorded: FiscalPeriod,
        /// Period from the calendar.
        calendar: FiscalPeriod,
    },

    /// Amount has more decimal places than the mart stores.
    #[error("{table} row {row}: amount {amount} has more than {scale} decimal places")]
    ExcessPrecision {
        /// Table of the row.
        table: Table,
        /// Zero-based row index.
        row: usize,
        /// Offending amount.
        amount: Decimal,
        /// Allowed decimal places.
        scale: u32,
    },

    /// Amount is too large in magnitude to aggregate safely.
    #[error("{table} row {row}: amount {amount} exceeds the limit of {limit}")]
    AmountOutOfRange {
        /// Table of the row.
        table: Table,
        /// Zero-based row index.
        row: usize,
        /// Offending amount.
        amount: Decimal,
        /// Largest accepted magnitude.
        limit: Decimal,
    },
}

/// All schema violations found in one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{} schema violation(s); first: {}", .violations.len(), first_violation(.violations))]
pub struct IntegrityError {
    /// Violations in discovery order.
    pub violations: Vec<SchemaViolation>,
}

fn first_violation(violations: &[SchemaViolation]) -> String {
    violations
        .first()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}

impl IntegrityError {
    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if no violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}
