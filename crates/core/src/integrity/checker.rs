//! Referential and structural checks on a loaded dataset.

use std::collections::HashSet;

use finmart_shared::config::MartConfig;
use finmart_shared::types::{
    AMOUNT_SCALE, CostCenterId, GlAccountId, MAX_ABS_AMOUNT, exceeds_amount_limit, has_excess_precision,
};
use rust_decimal::Decimal;

use super::error::{IntegrityError, SchemaViolation, Table};
use crate::dimension::AccountType;
use crate::facts::Dataset;
use crate::fiscal::{FiscalCalendar, FiscalCalendarDay, FiscalPeriod};
use crate::mart::{GrainRow, MartKey};

/// Checks a dataset before it is aggregated.
///
/// Every violation is collected; nothing is dropped or defaulted.
#[derive(Debug, Clone, Copy)]
pub struct IntegrityChecker {
    max_fiscal_period: u32,
    amount_scale: u32,
}

impl IntegrityChecker {
    /// Creates a checker.
    #[must_use]
    pub const fn new(max_fiscal_period: u32, amount_scale: u32) -> Self {
        Self {
            max_fiscal_period,
            amount_scale,
        }
    }

    /// Creates a checker from mart configuration.
    #[must_use]
    pub const fn from_config(config: &MartConfig) -> Self {
        Self::new(config.max_fiscal_period, config.amount_scale)
    }

    /// Runs every check.
    ///
    /// # Errors
    ///
    /// Returns `IntegrityError` listing all violations if any are found.
    pub fn check(&self, dataset: &Dataset) -> Result<(), IntegrityError> {
        let violations = self.violations(dataset);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(IntegrityError { violations })
        }
    }

    /// Collects every violation in the dataset.
    #[must_use]
    pub fn violations(&self, dataset: &Dataset) -> Vec<SchemaViolation> {
        let mut out = Vec::new();

        let cost_centers = check_cost_centers(dataset, &mut out);
        let gl_accounts = check_gl_accounts(dataset, &mut out);
        let calendar = check_calendar(&dataset.fiscal_calendar, &mut out);

        self.check_budget(dataset, &cost_centers, &gl_accounts, &mut out);
        self.check_actuals(dataset, &cost_centers, &gl_accounts, &calendar, &mut out);

        out
    }

    fn check_budget(
        &self,
        dataset: &Dataset,
        cost_centers: &HashSet<&CostCenterId>,
        gl_accounts: &HashSet<&GlAccountId>,
        out: &mut Vec<SchemaViolation>,
    ) {
        let mut grains: HashSet<MartKey> = HashSet::with_capacity(dataset.budget.len());

        for (row, line) in dataset.budget.iter().enumerate() {
            self.check_fact_refs(
                Table::Budget,
                row,
                &line.cost_center_id,
                &line.gl_account,
                line.period(),
                cost_centers,
                gl_accounts,
                out,
            );
            self.check_amount(Table::Budget, row, line.budget_amount, out);

            if line.budget_amount < Decimal::ZERO {
                out.push(SchemaViolation::NegativeBudget {
                    row,
                    amount: line.budget_amount,
                });
            }

            let key = line.grain_key();
            if !grains.insert(key.clone()) {
                out.push(SchemaViolation::DuplicateBudgetGrain { key });
            }
        }
    }

    fn check_actuals(
        &self,
        dataset: &Dataset,
        cost_centers: &HashSet<&CostCenterId>,
        gl_accounts: &HashSet<&GlAccountId>,
        calendar: &FiscalCalendar,
        out: &mut Vec<SchemaViolation>,
    ) {
        for (row, posting) in dataset.actuals.iter().enumerate() {
            self.check_fact_refs(
                Table::Actuals,
                row,
                &posting.cost_center_id,
                &posting.gl_account,
                posting.period(),
                cost_centers,
                gl_accounts,
                out,
            );
            self.check_amount(Table::Actuals, row, posting.actual_amount, out);

            if posting.document_type.trim().is_empty() {
                out.push(SchemaViolation::MissingField {
                    table: Table::Actuals,
                    row,
                    field: "document_type",
                });
            }

            // An unloaded calendar places no constraint on posting dates.
            if calendar.is_empty() {
                continue;
            }
            match calendar.period_of(posting.posting_date) {
                None => out.push(SchemaViolation::PostingDateOutsideCalendar {
                    row,
                    posting_date: posting.posting_date,
                }),
                Some(period) if period != posting.period() => {
                    out.push(SchemaViolation::PeriodMismatch {
                        row,
                        posting_date: posting.posting_date,
                        recorded: posting.period(),
                        calendar: period,
                    });
                }
                Some(_) => {}
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn check_fact_refs(
        &self,
        table: Table,
        row: usize,
        cost_center_id: &CostCenterId,
        gl_account: &GlAccountId,
        period: FiscalPeriod,
        cost_centers: &HashSet<&CostCenterId>,
        gl_accounts: &HashSet<&GlAccountId>,
        out: &mut Vec<SchemaViolation>,
    ) {
        if cost_center_id.is_blank() {
            out.push(SchemaViolation::MissingField {
                table,
                row,
                field: "cost_center_id",
            });
        } else if !cost_centers.contains(cost_center_id) {
            out.push(SchemaViolation::UnknownCostCenter {
                table,
                row,
                cost_center_id: cost_center_id.clone(),
            });
        }

        if gl_account.is_blank() {
            out.push(SchemaViolation::MissingField {
                table,
                row,
                field: "gl_account",
            });
        } else if !gl_accounts.contains(gl_account) {
            out.push(SchemaViolation::UnknownGlAccount {
                table,
                row,
                gl_account: gl_account.clone(),
            });
        }

        if !period.is_valid(self.max_fiscal_period) {
            out.push(SchemaViolation::InvalidFiscalPeriod {
                table,
                row,
                fiscal_period: period.fiscal_period,
            });
        }
    }

    fn check_amount(&self, table: Table, row: usize, amount: Decimal, out: &mut Vec<SchemaViolation>) {
        if exceeds_amount_limit(amount) {
            out.push(SchemaViolation::AmountOutOfRange {
                table,
                row,
                amount,
                limit: Decimal::from(MAX_ABS_AMOUNT),
            });
        }
        if has_excess_precision(amount, self.amount_scale) {
            out.push(SchemaViolation::ExcessPrecision {
                table,
                row,
                amount,
                scale: self.amount_scale,
            });
        }
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new(12, AMOUNT_SCALE)
    }
}

fn check_cost_centers<'a>(
    dataset: &'a Dataset,
    out: &mut Vec<SchemaViolation>,
) -> HashSet<&'a CostCenterId> {
    let mut ids = HashSet::with_capacity(dataset.cost_centers.len());
    for (row, cc) in dataset.cost_centers.iter().enumerate() {
        for (field, value) in [
            ("cost_center_name", &cc.cost_center_name),
            ("department", &cc.department),
            ("manager", &cc.manager),
        ] {
            check_required(Table::CostCenters, row, field, value, out);
        }

        if cc.cost_center_id.is_blank() {
            out.push(SchemaViolation::MissingField {
                table: Table::CostCenters,
                row,
                field: "cost_center_id",
            });
        } else if !ids.insert(&cc.cost_center_id) {
            out.push(SchemaViolation::DuplicateCostCenter {
                cost_center_id: cc.cost_center_id.clone(),
            });
        }
    }

    for cc in &dataset.cost_centers {
        if let Some(parent) = &cc.parent_cost_center_id {
            if !ids.contains(parent) {
                out.push(SchemaViolation::UnknownParentCostCenter {
                    cost_center_id: cc.cost_center_id.clone(),
                    parent: parent.clone(),
                });
            }
        }
    }

    ids
}

fn check_gl_accounts<'a>(
    dataset: &'a Dataset,
    out: &mut Vec<SchemaViolation>,
) -> HashSet<&'a GlAccountId> {
    let mut ids = HashSet::with_capacity(dataset.gl_accounts.len());
    for (row, gl) in dataset.gl_accounts.iter().enumerate() {
        for (field, value) in [("gl_name", &gl.gl_name), ("gl_group", &gl.gl_group)] {
            check_required(Table::GlAccounts, row, field, value, out);
        }
        if let AccountType::Other(code) = &gl.account_type {
            check_required(Table::GlAccounts, row, "account_type", code, out);
        }

        if gl.gl_account.is_blank() {
            out.push(SchemaViolation::MissingField {
                table: Table::GlAccounts,
                row,
                field: "gl_account",
            });
        } else if !ids.insert(&gl.gl_account) {
            out.push(SchemaViolation::DuplicateGlAccount {
                gl_account: gl.gl_account.clone(),
            });
        }
    }
    ids
}

fn check_calendar(days: &[FiscalCalendarDay], out: &mut Vec<SchemaViolation>) -> FiscalCalendar {
    let (calendar, duplicates) = FiscalCalendar::index_days(days);
    out.extend(
        duplicates
            .into_iter()
            .map(|calendar_date| SchemaViolation::DuplicateCalendarDate { calendar_date }),
    );
    calendar
}

fn check_required(table: Table, row: usize, field: &'static str, value: &str, out: &mut Vec<SchemaViolation>) {
    if value.trim().is_empty() {
        out.push(SchemaViolation::MissingField { table, row, field });
    }
}
