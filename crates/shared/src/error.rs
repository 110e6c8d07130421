//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Upstream data does not conform to the schema.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// The mart emitted a grain key more than once.
    #[error("Grain violation: {0}")]
    GrainViolation(String),

    /// Aggregation lost or fabricated money.
    #[error("Conservation violation: {0}")]
    ConservationViolation(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing an export failed.
    #[error("Export error: {0}")]
    Export(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::SchemaViolation(_) => 2,
            Self::GrainViolation(_) => 3,
            Self::ConservationViolation(_) => 4,
            Self::Config(_) => 78,
            Self::Export(_) => 74,
            Self::Internal(_) => 70,
        }
    }

    /// Returns the error code used in logs and reports.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::SchemaViolation(_) => "SCHEMA_VIOLATION",
            Self::GrainViolation(_) => "GRAIN_VIOLATION",
            Self::ConservationViolation(_) => "CONSERVATION_VIOLATION",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Export(_) => "EXPORT_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the error must block publication of the mart.
    #[must_use]
    pub const fn blocks_publication(&self) -> bool {
        matches!(
            self,
            Self::SchemaViolation(_) | Self::GrainViolation(_) | Self::ConservationViolation(_)
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(AppError::SchemaViolation(String::new()).exit_code(), 2);
        assert_eq!(AppError::GrainViolation(String::new()).exit_code(), 3);
        assert_eq!(AppError::ConservationViolation(String::new()).exit_code(), 4);
        assert_eq!(AppError::Config(String::new()).exit_code(), 78);
        assert_eq!(AppError::Export(String::new()).exit_code(), 74);
        assert_eq!(AppError::Internal(String::new()).exit_code(), 70);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::SchemaViolation(String::new()).error_code(),
            "SCHEMA_VIOLATION"
        );
        assert_eq!(
            AppError::GrainViolation(String::new()).error_code(),
            "GRAIN_VIOLATION"
        );
        assert_eq!(
            AppError::ConservationViolation(String::new()).error_code(),
            "CONSERVATION_VIOLATION"
        );
        assert_eq!(AppError::Config(String::new()).error_code(), "CONFIG_ERROR");
        assert_eq!(AppError::Export(String::new()).error_code(), "EXPORT_ERROR");
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::SchemaViolation("msg".into()).to_string(),
            "Schema violation: msg"
        );
        assert_eq!(
            AppError::GrainViolation("msg".into()).to_string(),
            "Grain violation: msg"
        );
        assert_eq!(
            AppError::ConservationViolation("msg".into()).to_string(),
            "Conservation violation: msg"
        );
        assert_eq!(
            AppError::Config("msg".into()).to_string(),
            "Configuration error: msg"
        );
    }

    #[test]
    fn test_blocks_publication() {
        assert!(AppError::SchemaViolation(String::new()).blocks_publication());
        assert!(AppError::GrainViolation(String::new()).blocks_publication());
        assert!(AppError::ConservationViolation(String::new()).blocks_publication());
        assert!(!AppError::Export(String::new()).blocks_publication());
        assert!(!AppError::Config(String::new()).blocks_publication());
    }
}
