//! Monthly aggregation of fact rows to the mart grain.

use std::collections::BTreeMap;

use finmart_shared::config::MartConfig;
use finmart_shared::types::{AMOUNT_SCALE, round_amount};
use rayon::prelude::*;
use rust_decimal::Decimal;

use super::key::{GrainRow, MartKey};
use crate::facts::{ActualPosting, BudgetLine};

/// Summed amount per grain key, in canonical key order.
pub type AmountByKey = BTreeMap<MartKey, Decimal>;

/// Collapses fact rows to (year, period, cost center, account).
#[derive(Debug, Clone, Copy)]
pub struct MonthlyAggregator {
    amount_scale: u32,
    partitioned: bool,
}

impl MonthlyAggregator {
    /// Creates a sequential aggregator rounding to `amount_scale` places.
    #[must_use]
    pub const fn new(amount_scale: u32) -> Self {
        Self {
            amount_scale,
            partitioned: false,
        }
    }

    /// Creates an aggregator from mart configuration.
    #[must_use]
    pub const fn from_config(config: &MartConfig) -> Self {
        Self {
            amount_scale: config.amount_scale,
            partitioned: config.parallel_aggregation,
        }
    }

    /// Aggregates each fiscal year on its own rayon task when enabled.
    #[must_use]
    pub const fn partitioned(mut self, partitioned: bool) -> Self {
        self.partitioned = partitioned;
        self
    }

    /// Sums actual postings per grain key.
    #[must_use]
    pub fn aggregate_actuals(&self, actuals: &[ActualPosting]) -> AmountByKey {
        self.aggregate(actuals)
    }

    /// Sums budget lines per grain key.
    #[must_use]
    pub fn aggregate_budget(&self, budget: &[BudgetLine]) -> AmountByKey {
        self.aggregate(budget)
    }

    /// Sums any grain rows per key.
    ///
    /// Summation is exact; each total is rounded once at the end.
    #[must_use]
    pub fn aggregate<R: GrainRow + Sync>(&self, rows: &[R]) -> AmountByKey {
        if self.partitioned {
            self.aggregate_by_year(rows)
        } else {
            self.sum_rows(rows.iter())
        }
    }

    fn aggregate_by_year<R: GrainRow + Sync>(&self, rows: &[R]) -> AmountByKey {
        let mut partitions: BTreeMap<i32, Vec<&R>> = BTreeMap::new();
        for row in rows {
            partitions
                .entry(row.grain_key().fiscal_year)
                .or_default()
                .push(row);
        }

        // Keys carry the year, so partitions never overlap.
        partitions
            .into_par_iter()
            .map(|(_, partition)| self.sum_rows(partition.into_iter()))
            .reduce(AmountByKey::new, |mut acc, part| {
                acc.extend(part);
                acc
            })
    }

    fn sum_rows<'a, R: GrainRow + 'a>(&self, rows: impl Iterator<Item = &'a R>) -> AmountByKey {
        let mut totals = AmountByKey::new();
        for row in rows {
            *totals.entry(row.grain_key()).or_insert(Decimal::ZERO) += row.amount();
        }
        for amount in totals.values_mut() {
            *amount = round_amount(*amount, self.amount_scale);
        }
        totals
    }
}

impl Default for MonthlyAggregator {
    fn default() -> Self {
        Self::new(AMOUNT_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn actual(year: i32, period: u32, cc: &str, gl: &str, amount: Decimal) -> ActualPosting {
        ActualPosting {
            posting_date: NaiveDate::from_ymd_opt(year, period, 1).unwrap(),
            fiscal_year: year,
            fiscal_period: period,
            gl_account: gl.into(),
            cost_center_id: cc.into(),
            actual_amount: amount,
            document_type: "SA".to_string(),
        }
    }

    fn budget(year: i32, period: u32, cc: &str, gl: &str, amount: Decimal) -> BudgetLine {
        BudgetLine {
            fiscal_year: year,
            fiscal_period: period,
            gl_account: gl.into(),
            cost_center_id: cc.into(),
            budget_amount: amount,
        }
    }

    #[test]
    fn test_empty_input() {
        let aggregator = MonthlyAggregator::default();
        assert!(aggregator.aggregate_actuals(&[]).is_empty());
        assert!(aggregator.aggregate_budget(&[]).is_empty());
    }

    #[test]
    fn test_many_postings_collapse_to_one_key() {
        let rows = vec![
            actual(2024, 1, "CC100", "6000", dec!(100.10)),
            actual(2024, 1, "CC100", "6000", dec!(49.90)),
            actual(2024, 1, "CC100", "6000", dec!(-20.00)),
            actual(2024, 1, "CC100", "7000", dec!(5.00)),
        ];
        let totals = MonthlyAggregator::default().aggregate_actuals(&rows);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&MartKey::new(2024, 1, "CC100", "6000")], dec!(130.00));
        assert_eq!(totals[&MartKey::new(2024, 1, "CC100", "7000")], dec!(5.00));
    }

    #[test]
    fn test_no_float_drift() {
        // 0.1 added ten times is exactly 1.00 in decimal arithmetic.
        let rows: Vec<_> = (0..10)
            .map(|_| actual(2024, 1, "CC100", "6000", dec!(0.10)))
            .collect();
        let totals = MonthlyAggregator::default().aggregate_actuals(&rows);
        assert_eq!(totals[&MartKey::new(2024, 1, "CC100", "6000")], dec!(1.00));
    }

    #[test]
    fn test_budget_keys_are_distinct() {
        let rows = vec![
            budget(2024, 1, "CC100", "6000", dec!(100)),
            budget(2024, 2, "CC100", "6000", dec!(200)),
        ];
        let totals = MonthlyAggregator::default().aggregate_budget(&rows);
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_partitioned_matches_sequential() {
        let rows: Vec<_> = (0..200)
            .map(|i| {
                actual(
                    2020 + (i % 5),
                    u32::try_from(i % 12).unwrap() + 1,
                    &format!("CC{}", i % 7),
                    &format!("{}", 600_000 + (i % 3) * 1000),
                    Decimal::new(i64::from(i) * 37 - 1000, 2),
                )
            })
            .collect();

        let sequential = MonthlyAggregator::new(2).aggregate_actuals(&rows);
        let partitioned = MonthlyAggregator::new(2)
            .partitioned(true)
            .aggregate_actuals(&rows);

        assert_eq!(sequential, partitioned);
    }
}
