//! CSV export of the published mart.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use finmart_shared::config::MartConfig;
use finmart_shared::types::{AMOUNT_SCALE, PERCENT_SCALE, format_amount};
use tracing::info;

use super::error::ExportError;
use crate::mart::{Mart, MartRow};

/// File name the mart is written under.
pub const MART_FILE_NAME: &str = "finance_mart.csv";

/// Mart CSV columns, in output order.
pub const MART_HEADER: [&str; 8] = [
    "fiscal_year",
    "fiscal_period",
    "cost_center_id",
    "gl_account",
    "actual_amount",
    "budget_amount",
    "variance_amount",
    "variance_pct",
];

/// Writes mart rows as CSV in canonical order.
///
/// Amounts carry exactly `amount_scale` places; a null `variance_pct` is an
/// empty field.
#[derive(Debug, Clone, Copy)]
pub struct MartCsvExporter {
    amount_scale: u32,
    percent_scale: u32,
}

impl MartCsvExporter {
    /// Creates an exporter with explicit scales.
    #[must_use]
    pub const fn new(amount_scale: u32, percent_scale: u32) -> Self {
        Self {
            amount_scale,
            percent_scale,
        }
    }

    /// Creates an exporter from mart configuration.
    #[must_use]
    pub const fn from_config(config: &MartConfig) -> Self {
        Self::new(config.amount_scale, config.percent_scale)
    }

    /// Writes the mart to any writer.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Csv` if a record cannot be written.
    pub fn write<W: Write>(&self, mart: &Mart, writer: W) -> Result<(), ExportError> {
        let mut wtr = Writer::from_writer(writer);
        wtr.write_record(MART_HEADER)?;
        for row in mart.rows() {
            wtr.write_record(self.record(row))?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Renders the mart as a CSV string.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or UTF-8 conversion fails.
    pub fn export(&self, mart: &Mart) -> Result<String, ExportError> {
        let mut buf = Vec::new();
        self.write(mart, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Writes the mart to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if the file cannot be created.
    pub fn write_file(&self, mart: &Mart, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
        self.write(mart, file)?;
        info!(path = %path.display(), rows = mart.len(), "Mart exported");
        Ok(())
    }

    fn record(&self, row: &MartRow) -> [String; 8] {
        [
            row.fiscal_year.to_string(),
            row.fiscal_period.to_string(),
            row.cost_center_id.to_string(),
            row.gl_account.to_string(),
            format_amount(row.actual_amount, self.amount_scale),
            format_amount(row.budget_amount, self.amount_scale),
            format_amount(row.variance_amount, self.amount_scale),
            row.variance_pct
                .map(|pct| format_amount(pct, self.percent_scale))
                .unwrap_or_default(),
        ]
    }
}

impl Default for MartCsvExporter {
    fn default() -> Self {
        Self::new(AMOUNT_SCALE, PERCENT_SCALE)
    }
}
