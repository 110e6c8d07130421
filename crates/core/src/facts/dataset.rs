//! The five data sets one reporting cycle is built from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{ActualPosting, BudgetLine};
use crate::dimension::{CostCenter, GlAccount};
use crate::fiscal::FiscalCalendarDay;

/// Fully loaded dimension and fact data for one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Cost center dimension.
    pub cost_centers: Vec<CostCenter>,
    /// GL account dimension.
    pub gl_accounts: Vec<GlAccount>,
    /// Fiscal calendar dimension.
    pub fiscal_calendar: Vec<FiscalCalendarDay>,
    /// Budget facts.
    pub budget: Vec<BudgetLine>,
    /// Actual facts.
    pub actuals: Vec<ActualPosting>,
}

/// Row counts and raw totals, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Cost center rows.
    pub cost_centers: usize,
    /// GL account rows.
    pub gl_accounts: usize,
    /// Calendar rows.
    pub calendar_days: usize,
    /// Budget rows.
    pub budget_lines: usize,
    /// Actual rows.
    pub actual_postings: usize,
    /// Sum of raw budget amounts.
    pub budget_total: Decimal,
    /// Sum of raw actual amounts.
    pub actual_total: Decimal,
}

impl Dataset {
    /// Sum of all raw actual amounts.
    #[must_use]
    pub fn actual_total(&self) -> Decimal {
        self.actuals.iter().map(|a| a.actual_amount).sum()
    }

    /// Sum of all raw budget amounts.
    #[must_use]
    pub fn budget_total(&self) -> Decimal {
        self.budget.iter().map(|b| b.budget_amount).sum()
    }

    /// Summarizes the dataset.
    #[must_use]
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            cost_centers: self.cost_centers.len(),
            gl_accounts: self.gl_accounts.len(),
            calendar_days: self.fiscal_calendar.len(),
            budget_lines: self.budget.len(),
            actual_postings: self.actuals.len(),
            budget_total: self.budget_total(),
            actual_total: self.actual_total(),
        }
    }
}
