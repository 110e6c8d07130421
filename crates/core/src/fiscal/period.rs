//! Fiscal period types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A (fiscal year, fiscal period) pair.
///
/// Ordering is chronological: by year, then by period number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Fiscal year (e.g. 2024).
    pub fiscal_year: i32,
    /// Period number within the year (1-12 for monthly).
    pub fiscal_period: u32,
}

impl FiscalPeriod {
    /// Creates a new fiscal period key.
    #[must_use]
    pub const fn new(fiscal_year: i32, fiscal_period: u32) -> Self {
        Self {
            fiscal_year,
            fiscal_period,
        }
    }

    /// Returns true if the period number is within `1..=max_period`.
    #[must_use]
    pub const fn is_valid(&self, max_period: u32) -> bool {
        self.fiscal_period >= 1 && self.fiscal_period <= max_period
    }

    /// Returns true for the last three periods of a 12-period year.
    #[must_use]
    pub const fn is_q4(&self) -> bool {
        matches!(self.fiscal_period, 10..=12)
    }

    /// Returns true for June through August in a calendar fiscal year.
    #[must_use]
    pub const fn is_summer(&self) -> bool {
        matches!(self.fiscal_period, 6..=8)
    }
}

impl std::fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY{}-P{:02}", self.fiscal_year, self.fiscal_period)
    }
}

/// One day of the fiscal calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalCalendarDay {
    /// Calendar date (unique).
    pub calendar_date: NaiveDate,
    /// Fiscal year the date belongs to.
    pub fiscal_year: i32,
    /// Fiscal period the date belongs to.
    pub fiscal_period: u32,
    /// Whether the date is the last day of its month.
    pub is_month_end: bool,
}

impl FiscalCalendarDay {
    /// Returns the (year, period) this day maps to.
    #[must_use]
    pub const fn period(&self) -> FiscalPeriod {
        FiscalPeriod::new(self.fiscal_year, self.fiscal_period)
    }
}
