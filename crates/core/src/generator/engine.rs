//! Seeded generator for SAP-style actuals and budget.
//!
//! All randomness is drawn as integer basis points and applied to amounts in
//! `Decimal`, so a seed fully determines the dataset on every platform.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use finmart_shared::config::GeneratorConfig;
use finmart_shared::types::{AMOUNT_SCALE, CostCenterId, round_amount};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use tracing::{debug, info};

use super::allocation::CentAllocator;
use super::catalog::{self, DOCUMENT_TYPES, MAX_COST_CENTERS, MAX_GL_ACCOUNTS};
use super::error::GeneratorError;
use crate::dimension::{AccountType, CostCenter, GlAccount};
use crate::facts::{ActualPosting, BudgetLine, Dataset};
use crate::fiscal::{FiscalCalendar, FiscalPeriod};

const BPS: i64 = 10_000;
const BUDGET_NOISE_BPS: i64 = 800;
const ACTUAL_SPREAD_BPS: i64 = 1_200;
const OVER_BUDGET_BPS: i64 = 800;
const UNDER_BUDGET_BPS: i64 = 700;
const MAX_POSTING_WEIGHT: u32 = 1_000;

/// Scale digits kept on intermediate factors.
const FACTOR_SCALE: u32 = 6;

fn to_bps(fraction: Decimal) -> i64 {
    (fraction * Decimal::from(BPS)).round().to_i64().unwrap_or(0)
}

fn from_bps(bps: i64) -> Decimal {
    Decimal::new(bps, 4)
}

/// Produces a complete `Dataset` from `GeneratorConfig`.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    config: GeneratorConfig,
}

impl DatasetGenerator {
    /// Creates a generator after checking the settings.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::InvalidSetting` for out-of-range settings.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        validate_config(&config)?;
        Ok(Self { config })
    }

    /// Settings this generator runs with.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the five data sets. Equal seeds give equal datasets.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::Calendar` if the date range is inverted.
    pub fn generate(&self) -> Result<Dataset, GeneratorError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let cost_centers = catalog::cost_centers(self.config.num_cost_centers);
        let gl_accounts = catalog::gl_accounts(self.config.num_gl_accounts);
        let calendar = FiscalCalendar::calendar_months(self.config.start_date, self.config.end_date)?;

        let budget = self.generate_budget(&mut rng, &cost_centers, &gl_accounts, &calendar);
        let actuals = self.generate_actuals(&mut rng, &gl_accounts, &calendar, &budget);

        let dataset = Dataset {
            cost_centers,
            gl_accounts,
            fiscal_calendar: calendar.days().cloned().collect(),
            budget,
            actuals,
        };

        let summary = dataset.summary();
        info!(
            seed = self.config.seed,
            budget_lines = summary.budget_lines,
            actual_postings = summary.actual_postings,
            budget_total = %summary.budget_total,
            actual_total = %summary.actual_total,
            "Synthetic dataset generated"
        );

        Ok(dataset)
    }

    fn generate_budget(
        &self,
        rng: &mut StdRng,
        cost_centers: &[CostCenter],
        gl_accounts: &[GlAccount],
        calendar: &FiscalCalendar,
    ) -> Vec<BudgetLine> {
        let sparse_bps = to_bps(self.config.sparse_gl_probability);
        let q4 = Decimal::ONE + self.config.seasonal_q4_uplift;
        let summer = Decimal::ONE + self.config.seasonal_summer_uplift;

        let mut lines = Vec::new();
        for period in calendar.periods() {
            let seasonal = if period.is_q4() {
                q4
            } else if period.is_summer() {
                summer
            } else {
                Decimal::ONE
            };

            for (cc_index, cost_center) in cost_centers.iter().enumerate() {
                let cc_scale = spread_scale(cc_index, cost_centers.len(), Decimal::new(8, 1), Decimal::new(8, 1));

                for (gl_index, account) in gl_accounts.iter().enumerate() {
                    if catalog::is_sparse(account.gl_account.as_str()) && chance(rng, sparse_bps) {
                        continue;
                    }

                    let base = match account.account_type {
                        AccountType::Capex => self.config.base_capex,
                        AccountType::Opex | AccountType::Other(_) => self.config.base_opex,
                    };
                    let gl_scale = spread_scale(gl_index, gl_accounts.len(), Decimal::new(6, 1), Decimal::new(12, 1));
                    let noise = from_bps(BPS + rng.random_range(-BUDGET_NOISE_BPS..=BUDGET_NOISE_BPS));

                    let amount = (base * cc_scale * gl_scale * seasonal * noise).max(Decimal::ZERO);

                    lines.push(BudgetLine {
                        fiscal_year: period.fiscal_year,
                        fiscal_period: period.fiscal_period,
                        gl_account: account.gl_account.clone(),
                        cost_center_id: cost_center.cost_center_id.clone(),
                        budget_amount: round_amount(amount, AMOUNT_SCALE),
                    });
                }
            }
        }

        debug!(lines = lines.len(), "Budget generated");
        lines
    }

    fn generate_actuals(
        &self,
        rng: &mut StdRng,
        gl_accounts: &[GlAccount],
        calendar: &FiscalCalendar,
        budget: &[BudgetLine],
    ) -> Vec<ActualPosting> {
        let (over_budget, under_budget) = self.pick_trending_cost_centers(rng, budget);

        let account_types: BTreeMap<&str, &AccountType> = gl_accounts
            .iter()
            .map(|a| (a.gl_account.as_str(), &a.account_type))
            .collect();
        let dates_by_period: BTreeMap<FiscalPeriod, Vec<NaiveDate>> = calendar
            .periods()
            .into_iter()
            .map(|p| (p, calendar.dates_in(p)))
            .collect();

        let spike_bps = to_bps(self.config.spike_probability);
        let spike_range = to_bps(self.config.spike_min)..=to_bps(self.config.spike_max);

        let mut postings = Vec::new();
        for line in budget {
            let Some(dates) = dates_by_period.get(&line.period()).filter(|d| !d.is_empty()) else {
                continue;
            };

            let mut multiplier = BPS + rng.random_range(-ACTUAL_SPREAD_BPS..=ACTUAL_SPREAD_BPS);
            if over_budget.contains(&line.cost_center_id) {
                multiplier += OVER_BUDGET_BPS;
            }
            if under_budget.contains(&line.cost_center_id) {
                multiplier -= UNDER_BUDGET_BPS;
            }
            if chance(rng, spike_bps) {
                multiplier += rng.random_range(spike_range.clone());
            }
            let target = round_amount((line.budget_amount * from_bps(multiplier)).max(Decimal::ZERO), AMOUNT_SCALE);

            let average = match account_types.get(line.gl_account.as_str()) {
                Some(AccountType::Capex) => self.config.avg_postings_capex_per_month,
                _ => self.config.avg_postings_opex_per_month,
            };
            let count = rng
                .random_range(0..=average.saturating_mul(2))
                .clamp(1, self.config.max_postings_per_month);

            let weights: Vec<Decimal> = (0..count)
                .map(|_| Decimal::from(rng.random_range(1..=MAX_POSTING_WEIGHT)))
                .collect();

            for amount in CentAllocator::allocate_by_weights(target, &weights, AMOUNT_SCALE) {
                postings.push(ActualPosting {
                    posting_date: dates[rng.random_range(0..dates.len())],
                    fiscal_year: line.fiscal_year,
                    fiscal_period: line.fiscal_period,
                    gl_account: line.gl_account.clone(),
                    cost_center_id: line.cost_center_id.clone(),
                    actual_amount: amount,
                    document_type: DOCUMENT_TYPES[rng.random_range(0..DOCUMENT_TYPES.len())].to_string(),
                });
            }
        }

        debug!(
            postings = postings.len(),
            over_budget = over_budget.len(),
            under_budget = under_budget.len(),
            "Actuals generated"
        );
        postings
    }

    /// Picks disjoint sets of cost centers trending over and under budget.
    fn pick_trending_cost_centers(
        &self,
        rng: &mut StdRng,
        budget: &[BudgetLine],
    ) -> (BTreeSet<CostCenterId>, BTreeSet<CostCenterId>) {
        let mut ids: Vec<CostCenterId> = budget
            .iter()
            .map(|line| line.cost_center_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        ids.shuffle(rng);

        let over = self.config.over_budget_cost_centers.min(ids.len());
        let under = self.config.under_budget_cost_centers.min(ids.len() - over);

        let under_budget = ids.split_off(over).into_iter().take(under).collect();
        (ids.into_iter().collect(), under_budget)
    }
}

/// Linear scale from `low` at the first index to `low + width` at the last.
fn spread_scale(index: usize, len: usize, low: Decimal, width: Decimal) -> Decimal {
    let span = Decimal::from(len.saturating_sub(1).max(1));
    (low + width * Decimal::from(index) / span).round_dp(FACTOR_SCALE)
}

fn chance(rng: &mut StdRng, bps: i64) -> bool {
    rng.random_range(0..BPS) < bps
}

fn validate_config(config: &GeneratorConfig) -> Result<(), GeneratorError> {
    if !(1..=MAX_COST_CENTERS).contains(&config.num_cost_centers) {
        return Err(GeneratorError::invalid(
            "num_cost_centers",
            format!("must be between 1 and {MAX_COST_CENTERS}"),
        ));
    }
    if !(1..=MAX_GL_ACCOUNTS).contains(&config.num_gl_accounts) {
        return Err(GeneratorError::invalid(
            "num_gl_accounts",
            format!("must be between 1 and {MAX_GL_ACCOUNTS}"),
        ));
    }
    if config.max_postings_per_month == 0 {
        return Err(GeneratorError::invalid("max_postings_per_month", "must be at least 1"));
    }
    if config.start_date > config.end_date {
        return Err(GeneratorError::invalid("end_date", "must not be before start_date"));
    }

    for (field, value) in [("base_opex", config.base_opex), ("base_capex", config.base_capex)] {
        if value.is_sign_negative() {
            return Err(GeneratorError::invalid(field, "must not be negative"));
        }
    }

    for (field, value) in [
        ("sparse_gl_probability", config.sparse_gl_probability),
        ("spike_probability", config.spike_probability),
    ] {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(GeneratorError::invalid(field, "must be between 0 and 1"));
        }
    }

    for (field, value) in [
        ("seasonal_q4_uplift", config.seasonal_q4_uplift),
        ("seasonal_summer_uplift", config.seasonal_summer_uplift),
        ("spike_min", config.spike_min),
        ("spike_max", config.spike_max),
    ] {
        if value < -Decimal::ONE || value > Decimal::TEN {
            return Err(GeneratorError::invalid(field, "must be between -1 and 10"));
        }
    }

    if config.spike_min > config.spike_max {
        return Err(GeneratorError::invalid("spike_max", "must not be below spike_min"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrity::IntegrityChecker;
    use chrono::Datelike;
    use rust_decimal_macros::dec;

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            seed: 7,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            num_cost_centers: 4,
            num_gl_accounts: 18,
            over_budget_cost_centers: 1,
            under_budget_cost_centers: 1,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let generator = DatasetGenerator::new(small_config()).unwrap();
        assert_eq!(generator.generate().unwrap(), generator.generate().unwrap());
    }

    #[test]
    fn test_different_seed_different_dataset() {
        let a = DatasetGenerator::new(small_config()).unwrap().generate().unwrap();
        let b = DatasetGenerator::new(GeneratorConfig {
            seed: 8,
            ..small_config()
        })
        .unwrap()
        .generate()
        .unwrap();
        assert_ne!(a.actuals, b.actuals);
    }

    #[test]
    fn test_default_dataset_shape() {
        let dataset = DatasetGenerator::new(GeneratorConfig::default())
            .unwrap()
            .generate()
            .unwrap();

        assert_eq!(dataset.cost_centers.len(), 12);
        assert_eq!(dataset.gl_accounts.len(), 18);
        // 2024 is a leap year
        assert_eq!(dataset.fiscal_calendar.len(), 366 + 365);
        // 24 months x 12 cost centers x 18 accounts, minus skipped sparse lines
        assert!(dataset.budget.len() <= 24 * 12 * 18);
        assert!(dataset.budget.len() >= 24 * 12 * 12);
        assert!(dataset.actuals.len() >= dataset.budget.len());
    }

    #[test]
    fn test_generated_dataset_passes_integrity() {
        let dataset = DatasetGenerator::new(small_config()).unwrap().generate().unwrap();
        assert!(IntegrityChecker::default().check(&dataset).is_ok());
    }

    #[test]
    fn test_budget_is_non_negative_cents() {
        let dataset = DatasetGenerator::new(small_config()).unwrap().generate().unwrap();
        for line in &dataset.budget {
            assert!(line.budget_amount >= Decimal::ZERO);
            assert!(line.budget_amount.normalize().scale() <= 2);
        }
    }

    #[test]
    fn test_postings_fall_inside_their_month() {
        let dataset = DatasetGenerator::new(small_config()).unwrap().generate().unwrap();
        for posting in &dataset.actuals {
            assert_eq!(posting.posting_date.year(), posting.fiscal_year);
            assert_eq!(posting.posting_date.month(), posting.fiscal_period);
            assert!(DOCUMENT_TYPES.contains(&posting.document_type.as_str()));
        }
    }

    #[test]
    fn test_every_budget_line_has_postings() {
        let config = GeneratorConfig {
            max_postings_per_month: 3,
            ..small_config()
        };
        let dataset = DatasetGenerator::new(config).unwrap().generate().unwrap();

        let mut counts: BTreeMap<(FiscalPeriod, &str, &str), u32> = BTreeMap::new();
        for posting in &dataset.actuals {
            *counts
                .entry((
                    posting.period(),
                    posting.cost_center_id.as_str(),
                    posting.gl_account.as_str(),
                ))
                .or_insert(0) += 1;
        }

        assert_eq!(counts.len(), dataset.budget.len());
        assert!(counts.values().all(|n| (1..=3).contains(n)));
    }

    #[test]
    fn test_no_sparse_skips_when_probability_zero() {
        let config = GeneratorConfig {
            sparse_gl_probability: Decimal::ZERO,
            ..small_config()
        };
        let dataset = DatasetGenerator::new(config).unwrap().generate().unwrap();
        assert_eq!(dataset.budget.len(), 3 * 4 * 18);
    }

    #[test]
    fn test_budget_stays_within_noise_band() {
        // With one cost center and one account every factor is 1 except the base
        // and the noise, so the amount stays within base +/- 8%.
        let config = GeneratorConfig {
            num_cost_centers: 1,
            num_gl_accounts: 1,
            seasonal_q4_uplift: Decimal::ZERO,
            seasonal_summer_uplift: Decimal::ZERO,
            ..small_config()
        };
        let dataset = DatasetGenerator::new(config).unwrap().generate().unwrap();
        for line in &dataset.budget {
            // cc scale 0.8, gl scale 0.6 at index 0
            let expected = dec!(3000) * dec!(0.8) * dec!(0.6);
            assert!(line.budget_amount >= expected * dec!(0.92));
            assert!(line.budget_amount <= expected * dec!(1.08));
        }
    }

    #[test]
    fn test_trending_sets_are_disjoint() {
        let config = GeneratorConfig {
            over_budget_cost_centers: 10,
            under_budget_cost_centers: 10,
            ..small_config()
        };
        let generator = DatasetGenerator::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let budget: Vec<BudgetLine> = ["CC0001", "CC0002", "CC0003"]
            .into_iter()
            .map(|cc| BudgetLine {
                fiscal_year: 2024,
                fiscal_period: 1,
                gl_account: "600000".into(),
                cost_center_id: cc.into(),
                budget_amount: dec!(1),
            })
            .collect();

        let (over, under) = generator.pick_trending_cost_centers(&mut rng, &budget);
        assert_eq!(over.len(), 3);
        assert!(under.is_empty());
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let cases = [
            GeneratorConfig {
                num_cost_centers: 0,
                ..GeneratorConfig::default()
            },
            GeneratorConfig {
                num_gl_accounts: 19,
                ..GeneratorConfig::default()
            },
            GeneratorConfig {
                spike_probability: dec!(1.5),
                ..GeneratorConfig::default()
            },
            GeneratorConfig {
                spike_min: dec!(0.7),
                spike_max: dec!(0.6),
                ..GeneratorConfig::default()
            },
            GeneratorConfig {
                base_capex: dec!(-1),
                ..GeneratorConfig::default()
            },
            GeneratorConfig {
                max_postings_per_month: 0,
                ..GeneratorConfig::default()
            },
            GeneratorConfig {
                start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                ..GeneratorConfig::default()
            },
        ];

        for config in cases {
            assert!(matches!(
                DatasetGenerator::new(config),
                Err(GeneratorError::InvalidSetting { .. })
            ));
        }
    }

    #[test]
    fn test_basis_points() {
        assert_eq!(to_bps(dec!(0.35)), 3_500);
        assert_eq!(from_bps(10_800), dec!(1.08));
        assert_eq!(spread_scale(0, 12, dec!(0.8), dec!(0.8)), dec!(0.8));
        assert_eq!(spread_scale(11, 12, dec!(0.8), dec!(0.8)), dec!(1.6));
        assert_eq!(spread_scale(0, 1, dec!(0.6), dec!(1.2)), dec!(0.6));
    }
}
