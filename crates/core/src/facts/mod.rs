//! Fact tables and the loaded dataset.

pub mod dataset;
pub mod types;

pub use dataset::{Dataset, DatasetSummary};
pub use types::{ActualPosting, BudgetLine};
