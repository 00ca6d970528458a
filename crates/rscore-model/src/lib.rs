//! # rscore-model: Fitted Model Artifacts
//!
//! The scoring pipeline consumes three artifacts produced by an external
//! training process: a market feature scaler, a store feature scaler and a
//! store regressor. This crate fixes the contract each must satisfy and
//! provides the JSON representations the workspace ships with.
//!
//! ## Contracts
//!
//! - [`FeatureScaler`]: declares the ordered feature names it was fit on and
//!   maps a row of that width to a scaled row of the same width.
//! - [`Regressor`]: declares its input width and maps one row to one raw
//!   prediction.
//!
//! Both traits are object-safe and `Send + Sync`, so the pipeline holds them
//! as `Arc<dyn ...>` and tests substitute stubs.
//!
//! ## Artifact Formats
//!
//! JSON documents tagged by `kind`:
//!
//! | Artifact | `kind` | Parameters |
//! |----------|--------|------------|
//! | scaler | `standard` | `feature_names`, `mean`, `scale` |
//! | scaler | `min_max` | `feature_names`, `min`, `scale` |
//! | regressor | `linear` | `n_features`, `coefficients`, `intercept` |
//! | regressor | `tree_ensemble` | `n_features`, `trees`, `aggregation`, `base_score`, `learning_rate` |
//!
//! Every artifact is validated when it is deserialized. A malformed artifact
//! never reaches the pipeline.

pub mod artifact;
pub mod error;
pub mod regressor;
pub mod scaler;
pub mod tree;

pub use artifact::{load_regressor, load_scaler};
pub use error::ModelError;
pub use regressor::{LinearRegressor, Regressor, RegressorArtifact};
pub use scaler::{FeatureScaler, MinMaxScaler, ScalerArtifact, StandardScaler};
pub use tree::{Aggregation, DecisionTree, TreeEnsemble};
