//! Mart pipeline service.

use finmart_shared::config::MartConfig;
use serde::Serialize;
use tracing::{info, warn};

use crate::facts::Dataset;
use crate::integrity::{IntegrityChecker, IntegrityError};
use crate::mart::{Mart, MartError, MartService};
use crate::validation::{ValidationReport, Validator};

/// A mart that passed every validation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedMart {
    /// Rows in canonical order.
    pub mart: Mart,
    /// Passing validation report.
    pub report: ValidationReport,
}

/// A built mart with its report, whether or not the checks passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MartEvaluation {
    /// Rows in canonical order.
    pub mart: Mart,
    /// Validation report.
    pub report: ValidationReport,
}

impl MartEvaluation {
    /// Returns true if every validation check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.report.passed()
    }

    /// Releases the mart for downstream use.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failed check.
    pub fn publish(self) -> Result<PublishedMart, MartError> {
        let report = self.report.into_result()?;
        Ok(PublishedMart {
            mart: self.mart,
            report,
        })
    }
}

/// Runs the full cycle over a loaded dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct MartPipeline {
    checker: IntegrityChecker,
    service: MartService,
    validator: Validator,
}

impl MartPipeline {
    /// Creates a pipeline from its stages.
    #[must_use]
    pub const fn new(checker: IntegrityChecker, service: MartService, validator: Validator) -> Self {
        Self {
            checker,
            service,
            validator,
        }
    }

    /// Creates a pipeline from mart configuration.
    #[must_use]
    pub const fn from_config(config: &MartConfig) -> Self {
        Self::new(
            IntegrityChecker::from_config(config),
            MartService::from_config(config),
            Validator::from_config(config),
        )
    }

    /// Builds and validates the mart, publishing it only if every check passes.
    ///
    /// # Errors
    ///
    /// Returns `MartError::Schema` if the dataset fails integrity checks, or
    /// the grain or conservation error of the first failed validation check.
    pub fn run(&self, dataset: &Dataset) -> Result<PublishedMart, MartError> {
        let published = self.evaluate(dataset)?.publish()?;
        info!(
            rows = published.mart.len(),
            run_id = %published.report.run_id,
            "Mart published"
        );
        Ok(published)
    }

    /// Builds the mart and reports on it without gating publication.
    ///
    /// # Errors
    ///
    /// Returns `IntegrityError` if the dataset fails integrity checks; no
    /// mart is built from such data.
    pub fn evaluate(&self, dataset: &Dataset) -> Result<MartEvaluation, IntegrityError> {
        let summary = dataset.summary();
        info!(
            budget_lines = summary.budget_lines,
            actual_postings = summary.actual_postings,
            "Starting mart build"
        );

        if let Err(err) = self.checker.check(dataset) {
            warn!(violations = err.len(), first = %err, "Dataset failed integrity checks");
            return Err(err);
        }

        let mart = self.service.build(&dataset.actuals, &dataset.budget);
        let report = self.validator.validate(mart.rows(), dataset);

        let totals = mart.totals();
        info!(
            rows = mart.len(),
            actual_total = %totals.actual_amount,
            budget_total = %totals.budget_amount,
            variance_total = %totals.variance_amount,
            passed = report.passed(),
            "Mart built"
        );

        Ok(MartEvaluation { mart, report })
    }
}
