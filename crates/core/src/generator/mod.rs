//! Synthetic finance dataset generation.
//!
//! Produces SAP-style cost centers, GL accounts, a calendar fiscal calendar,
//! monthly budget and daily actual postings for demos and load testing.

pub mod allocation;
pub mod catalog;
pub mod engine;
pub mod error;

pub use allocation::CentAllocator;
pub use engine::DatasetGenerator;
pub use error::GeneratorError;
