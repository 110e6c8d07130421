//! Fact table rows.

use chrono::NaiveDate;
use finmart_shared::types::{CostCenterId, GlAccountId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::FiscalPeriod;

/// One actual posting. Many postings may share a grain key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualPosting {
    /// Posting date.
    pub posting_date: NaiveDate,
    /// Fiscal year recorded on the posting.
    pub fiscal_year: i32,
    /// Fiscal period recorded on the posting.
    pub fiscal_period: u32,
    /// GL account charged.
    pub gl_account: GlAccountId,
    /// Cost center charged.
    pub cost_center_id: CostCenterId,
    /// Signed amount; negative for credits and reversals.
    pub actual_amount: Decimal,
    /// Source document type code (e.g. `SA`, `KR`).
    pub document_type: String,
}

impl ActualPosting {
    /// Returns the fiscal period recorded on the posting.
    #[must_use]
    pub const fn period(&self) -> FiscalPeriod {
        FiscalPeriod::new(self.fiscal_year, self.fiscal_period)
    }
}

/// One budget line. At most one per grain key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Fiscal period.
    pub fiscal_period: u32,
    /// GL account budgeted.
    pub gl_account: GlAccountId,
    /// Cost center budgeted.
    pub cost_center_id: CostCenterId,
    /// Budgeted amount.
    pub budget_amount: Decimal,
}

impl BudgetLine {
    /// Returns the fiscal period of the line.
    #[must_use]
    pub const fn period(&self) -> FiscalPeriod {
        FiscalPeriod::new(self.fiscal_year, self.fiscal_period)
    }
}
