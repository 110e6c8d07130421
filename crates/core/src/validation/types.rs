//! Validation report types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mart::{MartError, MartKey, Measure};

/// The three publication gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// One row per grain key.
    GrainUniqueness,
    /// Mart actual total equals raw actual total.
    ActualConservation,
    /// Mart budget total equals raw budget total.
    BudgetConservation,
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GrainUniqueness => write!(f, "grain_uniqueness"),
            Self::ActualConservation => write!(f, "actual_conservation"),
            Self::BudgetConservation => write!(f, "budget_conservation"),
        }
    }
}

/// Values a check compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckDetail {
    /// Row and key counts.
    Grain {
        /// Rows in the mart.
        rows: usize,
        /// Distinct grain keys.
        distinct_keys: usize,
        /// Rows beyond the first for each repeated key.
        duplicate_rows: usize,
        /// Repeated keys, in canonical order.
        duplicate_keys: Vec<MartKey>,
    },
    /// Raw vs. mart totals.
    Conservation {
        /// Column compared.
        measure: Measure,
        /// Sum over raw fact rows.
        raw_total: Decimal,
        /// Sum over mart rows.
        mart_total: Decimal,
        /// `mart_total - raw_total`.
        difference: Decimal,
    },
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Which check ran.
    pub check: CheckKind,
    /// Whether it passed.
    pub passed: bool,
    /// Compared values.
    pub detail: CheckDetail,
}

impl CheckResult {
    /// Converts a failed check into its fatal error.
    #[must_use]
    pub fn to_error(&self) -> Option<MartError> {
        if self.passed {
            return None;
        }
        match &self.detail {
            CheckDetail::Grain {
                duplicate_rows,
                duplicate_keys,
                ..
            } => Some(MartError::GrainViolation {
                duplicate_rows: *duplicate_rows,
                keys: duplicate_keys.clone(),
            }),
            CheckDetail::Conservation {
                measure,
                raw_total,
                mart_total,
                ..
            } => Some(MartError::ConservationViolation {
                measure: *measure,
                raw_total: *raw_total,
                mart_total: *mart_total,
            }),
        }
    }
}

/// Per-cycle validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Identifier of this validation run.
    pub run_id: Uuid,
    /// Check outcomes, in execution order.
    pub checks: Vec<CheckResult>,
}

impl ValidationReport {
    /// Returns true if every check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Failed checks.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// Looks up the result of one check.
    #[must_use]
    pub fn check(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.check == kind)
    }

    /// Returns the report if every check passed.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failed check.
    pub fn into_result(self) -> Result<Self, MartError> {
        let failure = self.failures().find_map(CheckResult::to_error);
        match failure {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    /// Renders the report as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
