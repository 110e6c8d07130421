//! Dimension tables: cost centers, GL accounts, and the cost center hierarchy.

pub mod error;
pub mod hierarchy;
pub mod types;

pub use error::DimensionError;
pub use hierarchy::CostCenterHierarchy;
pub use types::{AccountType, CostCenter, GlAccount};
