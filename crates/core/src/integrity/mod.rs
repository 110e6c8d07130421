//! Schema checks run before the mart is built.
//!
//! Violations are surfaced to the caller as a complete list; rows are never
//! silently dropped or defaulted.

pub mod checker;
pub mod error;

pub use checker::IntegrityChecker;
pub use error::{IntegrityError, SchemaViolation, Table};
