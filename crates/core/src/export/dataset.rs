//! CSV export of the five raw data sets.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use finmart_shared::types::{AMOUNT_SCALE, format_amount};
use serde::Serialize;
use tracing::info;

use super::error::ExportError;
use crate::facts::Dataset;

/// Cost center file name.
pub const COST_CENTERS_FILE: &str = "cost_centers.csv";
/// GL account file name.
pub const GL_ACCOUNTS_FILE: &str = "gl_accounts.csv";
/// Fiscal calendar file name.
pub const FISCAL_CALENDAR_FILE: &str = "fiscal_calendar.csv";
/// Budget file name.
pub const BUDGET_FILE: &str = "finance_budget.csv";
/// Actuals file name.
pub const ACTUALS_FILE: &str = "finance_actuals.csv";

/// One file written by the dataset exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Full path of the file.
    pub path: PathBuf,
    /// Data rows written, excluding the header.
    pub rows: usize,
}

/// Writes a `Dataset` as five CSV files into one directory.
#[derive(Debug, Clone, Copy)]
pub struct DatasetCsvExporter {
    amount_scale: u32,
}

impl DatasetCsvExporter {
    /// Creates an exporter writing amounts with `amount_scale` places.
    #[must_use]
    pub const fn new(amount_scale: u32) -> Self {
        Self { amount_scale }
    }

    /// Writes all five files into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if the directory or a file cannot be created,
    /// or `ExportError::Csv` if a record cannot be written.
    pub fn write_dir(&self, dataset: &Dataset, dir: &Path) -> Result<Vec<ExportedFile>, ExportError> {
        fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;

        let files = vec![
            write_file(dir, COST_CENTERS_FILE, |w| self.write_cost_centers(dataset, w))?,
            write_file(dir, GL_ACCOUNTS_FILE, |w| self.write_gl_accounts(dataset, w))?,
            write_file(dir, FISCAL_CALENDAR_FILE, |w| {
                self.write_fiscal_calendar(dataset, w)
            })?,
            write_file(dir, BUDGET_FILE, |w| self.write_budget(dataset, w))?,
            write_file(dir, ACTUALS_FILE, |w| self.write_actuals(dataset, w))?,
        ];

        for file in &files {
            info!(path = %file.path.display(), rows = file.rows, "Data set exported");
        }
        Ok(files)
    }

    /// Writes `cost_centers.csv` content.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Csv` if a record cannot be written.
    pub fn write_cost_centers<W: Write>(&self, dataset: &Dataset, writer: W) -> Result<usize, ExportError> {
        serialize_rows(
            writer,
            &[
                "cost_center_id",
                "cost_center_name",
                "department",
                "manager",
                "parent_cost_center_id",
            ],
            &dataset.cost_centers,
        )
    }

    /// Writes `gl_accounts.csv` content.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Csv` if a record cannot be written.
    pub fn write_gl_accounts<W: Write>(&self, dataset: &Dataset, writer: W) -> Result<usize, ExportError> {
        serialize_rows(
            writer,
            &["gl_account", "gl_name", "account_type", "gl_group"],
            &dataset.gl_accounts,
        )
    }

    /// Writes `fiscal_calendar.csv` content.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Csv` if a record cannot be written.
    pub fn write_fiscal_calendar<W: Write>(&self, dataset: &Dataset, writer: W) -> Result<usize, ExportError> {
        serialize_rows(
            writer,
            &["calendar_date", "fiscal_year", "fiscal_period", "is_month_end"],
            &dataset.fiscal_calendar,
        )
    }

    /// Writes `finance_budget.csv` content.
    ///
    /// Amounts are padded to the configured scale, so rows are written field
    /// by field rather than serialized.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Csv` if a record cannot be written.
    pub fn write_budget<W: Write>(&self, dataset: &Dataset, writer: W) -> Result<usize, ExportError> {
        let mut wtr = Writer::from_writer(writer);
        wtr.write_record([
            "fiscal_year",
            "fiscal_period",
            "gl_account",
            "cost_center_id",
            "budget_amount",
        ])?;
        for line in &dataset.budget {
            wtr.write_record([
                line.fiscal_year.to_string(),
                line.fiscal_period.to_string(),
                line.gl_account.to_string(),
                line.cost_center_id.to_string(),
                format_amount(line.budget_amount, self.amount_scale),
            ])?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(dataset.budget.len())
    }

    /// Writes `finance_actuals.csv` content.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Csv` if a record cannot be written.
    pub fn write_actuals<W: Write>(&self, dataset: &Dataset, writer: W) -> Result<usize, ExportError> {
        let mut wtr = Writer::from_writer(writer);
        wtr.write_record([
            "posting_date",
            "fiscal_year",
            "fiscal_period",
            "gl_account",
            "cost_center_id",
            "actual_amount",
            "document_type",
        ])?;
        for posting in &dataset.actuals {
            wtr.write_record([
                posting.posting_date.to_string(),
                posting.fiscal_year.to_string(),
                posting.fiscal_period.to_string(),
                posting.gl_account.to_string(),
                posting.cost_center_id.to_string(),
                format_amount(posting.actual_amount, self.amount_scale),
                posting.document_type.clone(),
            ])?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(dataset.actuals.len())
    }
}

impl Default for DatasetCsvExporter {
    fn default() -> Self {
        Self::new(AMOUNT_SCALE)
    }
}

/// Writes the header even when there are no rows, then one record per row.
fn serialize_rows<W: Write, T: Serialize>(writer: W, header: &[&str], rows: &[T]) -> Result<usize, ExportError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(header)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(rows.len())
}

fn write_file<F>(dir: &Path, name: &str, write: F) -> Result<ExportedFile, ExportError>
where
    F: FnOnce(File) -> Result<usize, ExportError>,
{
    let path = dir.join(name);
    let file = File::create(&path).map_err(|e| ExportError::io(&path, e))?;
    let rows = write(file)?;
    Ok(ExportedFile { path, rows })
}
