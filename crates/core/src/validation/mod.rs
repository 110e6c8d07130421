//! Correctness gate run before the mart is published.
//!
//! Three checks, all must pass:
//! - grain uniqueness
//! - actual conservation
//! - budget conservation

pub mod types;
pub mod validator;

pub use types::{CheckDetail, CheckKind, CheckResult, ValidationReport};
pub use validator::Validator;
