//! Generator error types.

use finmart_shared::AppError;
use thiserror::Error;

use crate::dimension::DimensionError;

/// Errors raised while generating a synthetic dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// A generator setting is outside its allowed range.
    #[error("Invalid generator setting `{field}`: {reason}")]
    InvalidSetting {
        /// Setting name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The fiscal calendar could not be built.
    #[error(transparent)]
    Calendar(#[from] DimensionError),
}

impl GeneratorError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            reason: reason.into(),
        }
    }
}

impl From<GeneratorError> for AppError {
    fn from(err: GeneratorError) -> Self {
        Self::Config(err.to_string())
    }
}
