//! Actual vs. budget variance calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use finmart_shared::types::round_amount;

/// Variance of one grain key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variance {
    /// Aggregated actual amount.
    pub actual_amount: Decimal,
    /// Aggregated budget amount.
    pub budget_amount: Decimal,
    /// Actual minus budget.
    pub variance_amount: Decimal,
    /// Variance as a fraction of budget (`0.50` = 50% over).
    pub variance_pct: Option<Decimal>,
}

impl Variance {
    /// Calculates variance relative to budget.
    ///
    /// `variance_pct` is `None` when the budget is exactly zero, whether the
    /// budget line was zero or missing altogether. It is also `None` if the
    /// ratio does not fit in a `Decimal`.
    #[must_use]
    pub fn compute(actual: Decimal, budget: Decimal, percent_scale: u32) -> Self {
        let variance = actual - budget;
        let variance_pct = if budget.is_zero() {
            None
        } else {
            variance
                .checked_div(budget)
                .map(|ratio| round_amount(ratio, percent_scale))
        };

        Self {
            actual_amount: actual,
            budget_amount: budget,
            variance_amount: variance,
            variance_pct,
        }
    }

    /// Returns true if actual exceeds budget.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.variance_amount > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(150.00), dec!(100.00), dec!(50.00), Some(dec!(0.50)))]
    #[case(dec!(0.00), dec!(500.00), dec!(-500.00), Some(dec!(-1.00)))]
    #[case(dec!(75.00), dec!(0.00), dec!(75.00), None)]
    #[case(dec!(350.00), dec!(100.00), dec!(250.00), Some(dec!(2.50)))]
    #[case(dec!(-40.00), dec!(100.00), dec!(-140.00), Some(dec!(-1.40)))]
    #[case(dec!(0.00), dec!(0.00), dec!(0.00), None)]
    fn test_compute(
        #[case] actual: Decimal,
        #[case] budget: Decimal,
        #[case] variance: Decimal,
        #[case] pct: Option<Decimal>,
    ) {
        let result = Variance::compute(actual, budget, 4);
        assert_eq!(result.actual_amount, actual);
        assert_eq!(result.budget_amount, budget);
        assert_eq!(result.variance_amount, variance);
        assert_eq!(result.variance_pct, pct);
    }

    #[test]
    fn test_pct_rounding() {
        let result = Variance::compute(dec!(100.00), dec!(300.00), 4);
        assert_eq!(result.variance_pct, Some(dec!(-0.6667)));
    }

    #[test]
    fn test_negative_budget_pct() {
        // A credit budget still divides normally.
        let result = Variance::compute(dec!(-50.00), dec!(-100.00), 4);
        assert_eq!(result.variance_amount, dec!(50.00));
        assert_eq!(result.variance_pct, Some(dec!(-0.50)));
    }

    #[test]
    fn test_over_budget() {
        assert!(Variance::compute(dec!(110), dec!(100), 4).is_over_budget());
        assert!(!Variance::compute(dec!(100), dec!(100), 4).is_over_budget());
    }
}
