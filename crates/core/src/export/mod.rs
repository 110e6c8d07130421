//! CSV output for the mart and for generated data sets.

pub mod dataset;
pub mod error;
pub mod mart;

pub use dataset::{DatasetCsvExporter, ExportedFile};
pub use error::ExportError;
pub use mart::{MART_FILE_NAME, MartCsvExporter};
