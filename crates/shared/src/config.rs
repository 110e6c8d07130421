//! Application configuration management.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::{AMOUNT_SCALE, PERCENT_SCALE};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Mart transform configuration.
    #[serde(default)]
    pub mart: MartConfig,
    /// Synthetic dataset generator configuration.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Export configuration.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Mart transform configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MartConfig {
    /// Decimal places amounts are rounded to.
    #[serde(default = "default_amount_scale")]
    pub amount_scale: u32,
    /// Decimal places variance ratios are rounded to.
    #[serde(default = "default_percent_scale")]
    pub percent_scale: u32,
    /// Highest valid fiscal period number.
    #[serde(default = "default_max_fiscal_period")]
    pub max_fiscal_period: u32,
    /// Aggregate each fiscal year on its own rayon task.
    #[serde(default)]
    pub parallel_aggregation: bool,
}

fn default_amount_scale() -> u32 {
    AMOUNT_SCALE
}

fn default_percent_scale() -> u32 {
    PERCENT_SCALE
}

fn default_max_fiscal_period() -> u32 {
    12
}

impl Default for MartConfig {
    fn default() -> Self {
        Self {
            amount_scale: default_amount_scale(),
            percent_scale: default_percent_scale(),
            max_fiscal_period: default_max_fiscal_period(),
            parallel_aggregation: false,
        }
    }
}

/// Synthetic dataset generator configuration.
///
/// Probabilities and uplifts are fractions (`0.15` = 15%).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// RNG seed; equal seeds produce equal datasets.
    pub seed: u64,
    /// First calendar day generated.
    pub start_date: NaiveDate,
    /// Last calendar day generated.
    pub end_date: NaiveDate,
    /// Number of cost centers (at most 12).
    pub num_cost_centers: usize,
    /// Number of GL accounts (at most 18).
    pub num_gl_accounts: usize,
    /// Average postings per OPEX budget line.
    pub avg_postings_opex_per_month: u32,
    /// Average postings per CAPEX budget line.
    pub avg_postings_capex_per_month: u32,
    /// Upper bound on postings per budget line.
    pub max_postings_per_month: u32,
    /// Base monthly OPEX budget.
    pub base_opex: Decimal,
    /// Base monthly CAPEX budget.
    pub base_capex: Decimal,
    /// Cost centers trending over budget.
    pub over_budget_cost_centers: usize,
    /// Cost centers trending under budget.
    pub under_budget_cost_centers: usize,
    /// Budget uplift in fiscal Q4 (periods 10-12).
    pub seasonal_q4_uplift: Decimal,
    /// Budget uplift in summer (periods 6-8).
    pub seasonal_summer_uplift: Decimal,
    /// Chance a sparse GL account is skipped for a month.
    pub sparse_gl_probability: Decimal,
    /// Chance an actual line spikes.
    pub spike_probability: Decimal,
    /// Minimum spike uplift.
    pub spike_min: Decimal,
    /// Maximum spike uplift.
    pub spike_max: Decimal,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default(),
            num_cost_centers: 12,
            num_gl_accounts: 18,
            avg_postings_opex_per_month: 4,
            avg_postings_capex_per_month: 2,
            max_postings_per_month: 14,
            base_opex: Decimal::new(3000, 0),
            base_capex: Decimal::new(8000, 0),
            over_budget_cost_centers: 4,
            under_budget_cost_centers: 3,
            seasonal_q4_uplift: Decimal::new(15, 2),
            seasonal_summer_uplift: Decimal::new(5, 2),
            sparse_gl_probability: Decimal::new(35, 2),
            spike_probability: Decimal::new(3, 2),
            spike_min: Decimal::new(25, 2),
            spike_max: Decimal::new(60, 2),
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory generated data sets and the mart are written to.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_out_dir() -> String {
    "finance_mvp_data".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("FINMART")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.mart.amount_scale, 2);
        assert_eq!(config.mart.percent_scale, 4);
        assert_eq!(config.mart.max_fiscal_period, 12);
        assert!(!config.mart.parallel_aggregation);
        assert_eq!(config.generator.seed, 42);
        assert_eq!(config.generator.num_cost_centers, 12);
        assert_eq!(config.generator.num_gl_accounts, 18);
        assert_eq!(config.export.out_dir, "finance_mvp_data");
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            ["FINMART__MART__PERCENT_SCALE", "FINMART__GENERATOR__SEED"],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.mart.percent_scale, 4);
                assert_eq!(config.generator.seed, 42);
            },
        );
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("FINMART__MART__PERCENT_SCALE", Some("6")),
                ("FINMART__MART__PARALLEL_AGGREGATION", Some("true")),
                ("FINMART__GENERATOR__SEED", Some("7")),
                ("FINMART__EXPORT__OUT_DIR", Some("out")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.mart.percent_scale, 6);
                assert!(config.mart.parallel_aggregation);
                assert_eq!(config.mart.amount_scale, 2);
                assert_eq!(config.generator.seed, 7);
                assert_eq!(config.export.out_dir, "out");
            },
        );
    }
}
