//! Mart data types.

use finmart_shared::types::{CostCenterId, GlAccountId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::key::MartKey;
use super::variance::Variance;

/// One row of the monthly mart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MartRow {
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Fiscal period.
    pub fiscal_period: u32,
    /// Cost center.
    pub cost_center_id: CostCenterId,
    /// GL account.
    pub gl_account: GlAccountId,
    /// Aggregated actual amount (0 if no postings).
    pub actual_amount: Decimal,
    /// Aggregated budget amount (0 if no budget line).
    pub budget_amount: Decimal,
    /// Actual minus budget.
    pub variance_amount: Decimal,
    /// Variance over budget; null when budget is zero.
    pub variance_pct: Option<Decimal>,
}

impl MartRow {
    /// Builds a row from its key and computed variance.
    #[must_use]
    pub fn new(key: MartKey, variance: Variance) -> Self {
        Self {
            fiscal_year: key.fiscal_year,
            fiscal_period: key.fiscal_period,
            cost_center_id: key.cost_center_id,
            gl_account: key.gl_account,
            actual_amount: variance.actual_amount,
            budget_amount: variance.budget_amount,
            variance_amount: variance.variance_amount,
            variance_pct: variance.variance_pct,
        }
    }

    /// Returns the grain key of the row.
    #[must_use]
    pub fn key(&self) -> MartKey {
        MartKey {
            fiscal_year: self.fiscal_year,
            fiscal_period: self.fiscal_period,
            cost_center_id: self.cost_center_id.clone(),
            gl_account: self.gl_account.clone(),
        }
    }
}

/// Amount column of the mart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// `actual_amount`.
    Actual,
    /// `budget_amount`.
    Budget,
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Actual => write!(f, "actual_amount"),
            Self::Budget => write!(f, "budget_amount"),
        }
    }
}

/// Mart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MartTotals {
    /// Sum of `actual_amount`.
    pub actual_amount: Decimal,
    /// Sum of `budget_amount`.
    pub budget_amount: Decimal,
    /// Sum of `variance_amount`.
    pub variance_amount: Decimal,
}

/// The derived monthly mart, rows in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Mart {
    rows: Vec<MartRow>,
}

impl Mart {
    /// Builds a mart, sorting rows by (year, period, cost center, account).
    #[must_use]
    pub fn from_rows(mut rows: Vec<MartRow>) -> Self {
        rows.sort_by_key(MartRow::key);
        Self { rows }
    }

    /// Rows in canonical order.
    #[must_use]
    pub fn rows(&self) -> &[MartRow] {
        &self.rows
    }

    /// Consumes the mart, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<MartRow> {
        self.rows
    }

    /// Looks up the row for a grain key.
    #[must_use]
    pub fn get(&self, key: &MartKey) -> Option<&MartRow> {
        self.rows
            .binary_search_by(|row| row.key().cmp(key))
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// Sums each amount column.
    #[must_use]
    pub fn totals(&self) -> MartTotals {
        self.rows.iter().fold(MartTotals::default(), |mut acc, row| {
            acc.actual_amount += row.actual_amount;
            acc.budget_amount += row.budget_amount;
            acc.variance_amount += row.variance_amount;
            acc
        })
    }

    /// Sum of one amount column.
    #[must_use]
    pub fn total(&self, measure: Measure) -> Decimal {
        let totals = self.totals();
        match measure {
            Measure::Actual => totals.actual_amount,
            Measure::Budget => totals.budget_amount,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the mart has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(year: i32, period: u32, cc: &str, gl: &str, actual: Decimal, budget: Decimal) -> MartRow {
        MartRow::new(
            MartKey::new(year, period, cc, gl),
            Variance::compute(actual, budget, 4),
        )
    }

    #[test]
    fn test_from_rows_sorts_canonically() {
        let mart = Mart::from_rows(vec![
            row(2024, 2, "CC100", "6000", dec!(1), dec!(1)),
            row(2024, 1, "CC200", "6000", dec!(1), dec!(1)),
            row(2024, 1, "CC100", "6000", dec!(1), dec!(1)),
        ]);
        let keys: Vec<_> = mart.rows().iter().map(MartRow::key).collect();
        assert_eq!(
            keys,
            vec![
                MartKey::new(2024, 1, "CC100", "6000"),
                MartKey::new(2024, 1, "CC200", "6000"),
                MartKey::new(2024, 2, "CC100", "6000"),
            ]
        );
    }

    #[test]
    fn test_get_and_totals() {
        let mart = Mart::from_rows(vec![
            row(2024, 1, "CC100", "6000", dec!(150.00), dec!(100.00)),
            row(2024, 2, "CC200", "7000", dec!(0.00), dec!(500.00)),
        ]);

        let found = mart.get(&MartKey::new(2024, 2, "CC200", "7000")).unwrap();
        assert_eq!(found.variance_amount, dec!(-500.00));
        assert!(mart.get(&MartKey::new(2024, 3, "CC200", "7000")).is_none());

        let totals = mart.totals();
        assert_eq!(totals.actual_amount, dec!(150.00));
        assert_eq!(totals.budget_amount, dec!(600.00));
        assert_eq!(totals.variance_amount, dec!(-450.00));
        assert_eq!(mart.total(Measure::Budget), dec!(600.00));
    }

    #[test]
    fn test_measure_display() {
        assert_eq!(Measure::Actual.to_string(), "actual_amount");
        assert_eq!(Measure::Budget.to_string(), "budget_amount");
    }
}
