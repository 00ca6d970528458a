//! # Error Types
//!
//! Load-time variants (`Read`, `Parse`, `InvalidArtifact`) are configuration
//! faults and abort startup. `RowWidth` can only surface at request time if
//! a caller bypasses the startup width checks.

use thiserror::Error;

/// Errors from loading or applying a model artifact.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The artifact file could not be read.
    #[error("failed to read artifact {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The artifact file is not valid JSON for any supported kind.
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The artifact parsed but its parameters are inconsistent.
    #[error("invalid {artifact} artifact: {reason}")]
    InvalidArtifact {
        /// Artifact kind, e.g. `"standard scaler"`.
        artifact: &'static str,
        reason: String,
    },

    /// A row of the wrong width was passed to an artifact.
    #[error("row width mismatch: expected {expected} features, got {actual}")]
    RowWidth { expected: usize, actual: usize },
}

impl ModelError {
    pub(crate) fn invalid(artifact: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArtifact {
            artifact,
            reason: reason.into(),
        }
    }

    pub(crate) fn check_width(expected: usize, row: &[f64]) -> Result<(), Self> {
        if row.len() == expected {
            Ok(())
        } else {
            Err(Self::RowWidth {
                expected,
                actual: row.len(),
            })
        }
    }
}
