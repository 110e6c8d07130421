//! Publication gate for the mart.

use std::collections::BTreeMap;

use finmart_shared::config::MartConfig;
use finmart_shared::types::{AMOUNT_SCALE, round_amount};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::types::{CheckDetail, CheckKind, CheckResult, ValidationReport};
use crate::facts::Dataset;
use crate::mart::{MartKey, MartRow, Measure};

/// Runs grain and conservation checks over mart rows.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    amount_scale: u32,
}

impl Validator {
    /// Creates a validator comparing totals at `amount_scale` places.
    #[must_use]
    pub const fn new(amount_scale: u32) -> Self {
        Self { amount_scale }
    }

    /// Creates a validator from mart configuration.
    #[must_use]
    pub const fn from_config(config: &MartConfig) -> Self {
        Self::new(config.amount_scale)
    }

    /// Validates mart rows against the dataset they were built from.
    #[must_use]
    pub fn validate(&self, rows: &[MartRow], dataset: &Dataset) -> ValidationReport {
        self.validate_totals(rows, dataset.actual_total(), dataset.budget_total())
    }

    /// Validates mart rows against precomputed raw totals.
    #[must_use]
    pub fn validate_totals(
        &self,
        rows: &[MartRow],
        raw_actual_total: Decimal,
        raw_budget_total: Decimal,
    ) -> ValidationReport {
        let mart_actual: Decimal = rows.iter().map(|r| r.actual_amount).sum();
        let mart_budget: Decimal = rows.iter().map(|r| r.budget_amount).sum();

        let checks = vec![
            Self::check_grain(rows),
            self.check_conservation(Measure::Actual, raw_actual_total, mart_actual),
            self.check_conservation(Measure::Budget, raw_budget_total, mart_budget),
        ];

        for check in &checks {
            if check.passed {
                info!(check = %check.check, "Validation check passed");
            } else {
                warn!(check = %check.check, detail = ?check.detail, "Validation check failed");
            }
        }

        ValidationReport {
            run_id: Uuid::now_v7(),
            checks,
        }
    }

    /// Checks that every grain key appears exactly once.
    #[must_use]
    pub fn check_grain(rows: &[MartRow]) -> CheckResult {
        let mut counts: BTreeMap<MartKey, usize> = BTreeMap::new();
        for row in rows {
            *counts.entry(row.key()).or_insert(0) += 1;
        }

        let distinct_keys = counts.len();
        let duplicate_rows = rows.len() - distinct_keys;
        let duplicate_keys: Vec<MartKey> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(key, _)| key)
            .collect();

        CheckResult {
            check: CheckKind::GrainUniqueness,
            passed: duplicate_rows == 0,
            detail: CheckDetail::Grain {
                rows: rows.len(),
                distinct_keys,
                duplicate_rows,
                duplicate_keys,
            },
        }
    }

    /// Checks that a mart total equals the raw total to the cent.
    #[must_use]
    pub fn check_conservation(
        &self,
        measure: Measure,
        raw_total: Decimal,
        mart_total: Decimal,
    ) -> CheckResult {
        let raw = round_amount(raw_total, self.amount_scale);
        let mart = round_amount(mart_total, self.amount_scale);

        CheckResult {
            check: match measure {
                Measure::Actual => CheckKind::ActualConservation,
                Measure::Budget => CheckKind::BudgetConservation,
            },
            passed: raw == mart,
            detail: CheckDetail::Conservation {
                measure,
                raw_total: raw,
                mart_total: mart,
                difference: mart - raw,
            },
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(AMOUNT_SCALE)
    }
}
