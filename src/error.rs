//! Error types for conflict detection and resolution.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ConflictError>;

/// Top-level error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConflictError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Availability error: {0}")]
    Oracle(#[from] OracleError),
}

/// Errors raised while constructing model values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid range: start ({start_ms}) must be before end ({end_ms})")]
    InvalidRange { start_ms: i64, end_ms: i64 },
}

/// Invalid detector or resolution settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failures reported by an availability oracle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Availability lookup for '{entity_id}' failed: {reason}")]
    Unavailable { entity_id: String, reason: String },

    #[error("Availability lookup for '{entity_id}' timed out")]
    Timeout { entity_id: String },
}

impl OracleError {
    /// Creates an `Unavailable` error.
    pub fn unavailable(entity_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            entity_id: entity_id.into(),
            reason: reason.into(),
        }
    }

    /// The entity whose lookup failed.
    pub fn entity_id(&self) -> &str {
        match self {
            Self::Unavailable { entity_id, .. } | Self::Timeout { entity_id } => entity_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = ModelError::InvalidRange {
            start_ms: 10,
            end_ms: 5,
        };
        assert_eq!(
            e.to_string(),
            "Invalid range: start (10) must be before end (5)"
        );

        let wrapped: ConflictError = e.into();
        assert!(wrapped.to_string().starts_with("Model error:"));
    }

    #[test]
    fn test_oracle_error_entity() {
        let e = OracleError::unavailable("T1", "service down");
        assert_eq!(e.entity_id(), "T1");
        assert!(e.to_string().contains("service down"));

        let t = OracleError::Timeout {
            entity_id: "V1".into(),
        };
        assert_eq!(t.entity_id(), "V1");
    }
}
