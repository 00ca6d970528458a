//! # Error Types
//!
//! Two tiers. [`BootstrapError`] (wrapping [`ContractError`] and
//! [`ConfigError`]) is raised once while the context is assembled and is
//! always fatal. [`ScoringError`] is the only error a prediction can return,
//! and only when an artifact implementation fails on a row the startup
//! checks already accepted.
//!
//! An unknown pincode is not an error; see
//! [`PredictionOutcome`](crate::PredictionOutcome).

use rscore_model::ModelError;
use rscore_registry::RegistryError;
use thiserror::Error;

/// A request-time inference fault.
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("model inference failed: {0}")]
    Model(#[from] ModelError),
}

/// An artifact does not fit the feature contract it is wired into.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// The artifact names a column the consuming scorer cannot supply.
    #[error("{artifact} declares unknown feature {name:?}")]
    UnknownFeature { artifact: &'static str, name: String },

    /// The artifact's input width disagrees with the scorer's row width.
    #[error("{artifact} expects {actual} features but the scorer supplies {expected}")]
    WidthMismatch {
        artifact: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Configuration file faults.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Startup failure. Nothing is served when bootstrap returns this.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("location registry: {0}")]
    Registry(#[from] RegistryError),

    #[error("artifact {path}: {source}")]
    Artifact {
        path: String,
        #[source]
        source: ModelError,
    },

    #[error("feature contract: {0}")]
    Contract(#[from] ContractError),

    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
}
