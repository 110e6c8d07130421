//! Full outer join of aggregated actuals and budget.

use std::collections::BTreeSet;

use finmart_shared::config::MartConfig;
use finmart_shared::types::PERCENT_SCALE;
use rust_decimal::Decimal;

use super::aggregate::AmountByKey;
use super::types::{Mart, MartRow};
use super::variance::Variance;

/// Joins the two aggregated maps into mart rows.
#[derive(Debug, Clone, Copy)]
pub struct MartJoiner {
    percent_scale: u32,
}

impl MartJoiner {
    /// Creates a joiner rounding `variance_pct` to `percent_scale` places.
    #[must_use]
    pub const fn new(percent_scale: u32) -> Self {
        Self { percent_scale }
    }

    /// Creates a joiner from mart configuration.
    #[must_use]
    pub const fn from_config(config: &MartConfig) -> Self {
        Self::new(config.percent_scale)
    }

    /// Emits one row for every key present in either map.
    ///
    /// A key missing from one side contributes zero for that side.
    #[must_use]
    pub fn join(&self, actuals: &AmountByKey, budget: &AmountByKey) -> Mart {
        let keys: BTreeSet<_> = actuals.keys().chain(budget.keys()).collect();

        let rows = keys
            .into_iter()
            .map(|key| {
                let actual = actuals.get(key).copied().unwrap_or(Decimal::ZERO);
                let budgeted = budget.get(key).copied().unwrap_or(Decimal::ZERO);
                MartRow::new(
                    key.clone(),
                    Variance::compute(actual, budgeted, self.percent_scale),
                )
            })
            .collect();

        Mart::from_rows(rows)
    }
}

impl Default for MartJoiner {
    fn default() -> Self {
        Self::new(PERCENT_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mart::key::MartKey;
    use rust_decimal_macros::dec;

    #[test]
    fn test_key_in_both() {
        let actuals = AmountByKey::from([(MartKey::new(2024, 1, "CC100", "6000"), dec!(150.00))]);
        let budget = AmountByKey::from([(MartKey::new(2024, 1, "CC100", "6000"), dec!(100.00))]);

        let mart = MartJoiner::default().join(&actuals, &budget);

        assert_eq!(mart.len(), 1);
        let row = &mart.rows()[0];
        assert_eq!(row.actual_amount, dec!(150.00));
        assert_eq!(row.budget_amount, dec!(100.00));
        assert_eq!(row.variance_amount, dec!(50.00));
        assert_eq!(row.variance_pct, Some(dec!(0.50)));
    }

    #[test]
    fn test_budget_only_key() {
        let budget = AmountByKey::from([(MartKey::new(2024, 2, "CC200", "7000"), dec!(500.00))]);

        let mart = MartJoiner::default().join(&AmountByKey::new(), &budget);

        let row = &mart.rows()[0];
        assert_eq!(row.actual_amount, dec!(0.00));
        assert_eq!(row.budget_amount, dec!(500.00));
        assert_eq!(row.variance_amount, dec!(-500.00));
        assert_eq!(row.variance_pct, Some(dec!(-1.00)));
    }

    #[test]
    fn test_actual_only_key() {
        let actuals = AmountByKey::from([(MartKey::new(2024, 3, "CC300", "8000"), dec!(75.00))]);

        let mart = MartJoiner::default().join(&actuals, &AmountByKey::new());

        let row = &mart.rows()[0];
        assert_eq!(row.actual_amount, dec!(75.00));
        assert_eq!(row.budget_amount, dec!(0.00));
        assert_eq!(row.variance_amount, dec!(75.00));
        assert_eq!(row.variance_pct, None);
    }

    #[test]
    fn test_zero_budget_line_is_null_pct() {
        let key = MartKey::new(2024, 4, "CC400", "9000");
        let actuals = AmountByKey::from([(key.clone(), dec!(10.00))]);
        let budget = AmountByKey::from([(key, dec!(0.00))]);

        let mart = MartJoiner::default().join(&actuals, &budget);
        assert_eq!(mart.rows()[0].variance_pct, None);
        assert_eq!(mart.rows()[0].variance_amount, dec!(10.00));
    }

    #[test]
    fn test_empty_inputs() {
        let mart = MartJoiner::default().join(&AmountByKey::new(), &AmountByKey::new());
        assert!(mart.is_empty());
    }
}
