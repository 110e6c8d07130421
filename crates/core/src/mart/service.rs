//! Mart build service.

use finmart_shared::config::MartConfig;
use tracing::debug;

use super::aggregate::MonthlyAggregator;
use super::join::MartJoiner;
use super::types::Mart;
use crate::facts::{ActualPosting, BudgetLine};

/// Builds the mart from fact rows.
///
/// Pure: the same inputs always produce the same mart.
#[derive(Debug, Clone, Copy, Default)]
pub struct MartService {
    aggregator: MonthlyAggregator,
    joiner: MartJoiner,
}

impl MartService {
    /// Creates a service from its two stages.
    #[must_use]
    pub const fn new(aggregator: MonthlyAggregator, joiner: MartJoiner) -> Self {
        Self { aggregator, joiner }
    }

    /// Creates a service from mart configuration.
    #[must_use]
    pub const fn from_config(config: &MartConfig) -> Self {
        Self::new(
            MonthlyAggregator::from_config(config),
            MartJoiner::from_config(config),
        )
    }

    /// Aggregates both fact sets and joins them.
    #[must_use]
    pub fn build(&self, actuals: &[ActualPosting], budget: &[BudgetLine]) -> Mart {
        let actual_totals = self.aggregator.aggregate_actuals(actuals);
        let budget_totals = self.aggregator.aggregate_budget(budget);
        debug!(
            actual_keys = actual_totals.len(),
            budget_keys = budget_totals.len(),
            "Aggregated facts to mart grain"
        );

        self.joiner.join(&actual_totals, &budget_totals)
    }
}
