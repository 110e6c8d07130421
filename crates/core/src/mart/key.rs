//! Reporting grain key.

use finmart_shared::types::{CostCenterId, GlAccountId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::facts::{ActualPosting, BudgetLine};
use crate::fiscal::FiscalPeriod;

/// Composite key of the mart grain.
///
/// Field order is the canonical export order: year, period, cost center,
/// account. Equality and hashing are structural over all four fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MartKey {
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Fiscal period.
    pub fiscal_period: u32,
    /// Cost center.
    pub cost_center_id: CostCenterId,
    /// GL account.
    pub gl_account: GlAccountId,
}

impl MartKey {
    /// Creates a grain key.
    #[must_use]
    pub fn new(
        fiscal_year: i32,
        fiscal_period: u32,
        cost_center_id: impl Into<CostCenterId>,
        gl_account: impl Into<GlAccountId>,
    ) -> Self {
        Self {
            fiscal_year,
            fiscal_period,
            cost_center_id: cost_center_id.into(),
            gl_account: gl_account.into(),
        }
    }

    /// Returns the fiscal period component.
    #[must_use]
    pub const fn period(&self) -> FiscalPeriod {
        FiscalPeriod::new(self.fiscal_year, self.fiscal_period)
    }
}

impl std::fmt::Display for MartKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.period(),
            self.cost_center_id,
            self.gl_account
        )
    }
}

/// A fact row that contributes an amount to one grain key.
pub trait GrainRow {
    /// Grain key the row rolls up to.
    fn grain_key(&self) -> MartKey;

    /// Amount contributed.
    fn amount(&self) -> Decimal;
}

impl GrainRow for ActualPosting {
    fn grain_key(&self) -> MartKey {
        MartKey {
            fiscal_year: self.fiscal_year,
            fiscal_period: self.fiscal_period,
            cost_center_id: self.cost_center_id.clone(),
            gl_account: self.gl_account.clone(),
        }
    }

    fn amount(&self) -> Decimal {
        self.actual_amount
    }
}

impl GrainRow for BudgetLine {
    fn grain_key(&self) -> MartKey {
        MartKey {
            fiscal_year: self.fiscal_year,
            fiscal_period: self.fiscal_period,
            cost_center_id: self.cost_center_id.clone(),
            gl_account: self.gl_account.clone(),
        }
    }

    fn amount(&self) -> Decimal {
        self.budget_amount
    }
}
