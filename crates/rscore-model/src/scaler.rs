//! # Feature Scalers
//!
//! Affine per-feature transforms fit during training. Two parameterizations
//! are supported, matching the two common fitted scalers:
//!
//! ```text
//! standard:  y_i = (x_i - mean_i) / scale_i
//! min_max:   y_i =  x_i * scale_i + min_i
//! ```
//!
//! The scaler owns the ordering of its input: `feature_names()[i]` names the
//! column expected at position `i`. Consumers assemble rows in that order.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A fitted feature-scaling transform.
pub trait FeatureScaler: Send + Sync + fmt::Debug {
    /// Column names in the order `transform` expects them.
    fn feature_names(&self) -> &[String];

    /// Scale one row. The row must have `feature_names().len()` entries.
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError>;

    /// Input width.
    fn n_features(&self) -> usize {
        self.feature_names().len()
    }
}

// ---------------------------------------------------------------------------
// StandardScaler
// ---------------------------------------------------------------------------

/// Standardization: subtract the fitted mean, divide by the fitted scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StandardParams", into = "StandardParams")]
pub struct StandardScaler {
    feature_names: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StandardParams {
    feature_names: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Build a validated standard scaler.
    pub fn new(
        feature_names: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    ) -> Result<Self, ModelError> {
        const KIND: &str = "standard scaler";
        validate_names(KIND, &feature_names)?;
        validate_params(KIND, "mean", &feature_names, &mean)?;
        validate_params(KIND, "scale", &feature_names, &scale)?;
        if let Some(i) = scale.iter().position(|s| *s == 0.0) {
            return Err(ModelError::invalid(
                KIND,
                format!("scale for {:?} is zero", feature_names[i]),
            ));
        }
        Ok(Self {
            feature_names,
            mean,
            scale,
        })
    }
}

impl TryFrom<StandardParams> for StandardScaler {
    type Error = ModelError;

    fn try_from(p: StandardParams) -> Result<Self, Self::Error> {
        Self::new(p.feature_names, p.mean, p.scale)
    }
}

impl From<StandardScaler> for StandardParams {
    fn from(s: StandardScaler) -> Self {
        Self {
            feature_names: s.feature_names,
            mean: s.mean,
            scale: s.scale,
        }
    }
}

impl FeatureScaler for StandardScaler {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        ModelError::check_width(self.feature_names.len(), row)?;
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}

// ---------------------------------------------------------------------------
// MinMaxScaler
// ---------------------------------------------------------------------------

/// Range scaling: multiply by the fitted scale, add the fitted offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MinMaxParams", into = "MinMaxParams")]
pub struct MinMaxScaler {
    feature_names: Vec<String>,
    min: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MinMaxParams {
    feature_names: Vec<String>,
    min: Vec<f64>,
    scale: Vec<f64>,
}

impl MinMaxScaler {
    /// Build a validated min-max scaler.
    pub fn new(
        feature_names: Vec<String>,
        min: Vec<f64>,
        scale: Vec<f64>,
    ) -> Result<Self, ModelError> {
        const KIND: &str = "min-max scaler";
        validate_names(KIND, &feature_names)?;
        validate_params(KIND, "min", &feature_names, &min)?;
        validate_params(KIND, "scale", &feature_names, &scale)?;
        Ok(Self {
            feature_names,
            min,
            scale,
        })
    }
}

impl TryFrom<MinMaxParams> for MinMaxScaler {
    type Error = ModelError;

    fn try_from(p: MinMaxParams) -> Result<Self, Self::Error> {
        Self::new(p.feature_names, p.min, p.scale)
    }
}

impl From<MinMaxScaler> for MinMaxParams {
    fn from(s: MinMaxScaler) -> Self {
        Self {
            feature_names: s.feature_names,
            min: s.min,
            scale: s.scale,
        }
    }
}

impl FeatureScaler for MinMaxScaler {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        ModelError::check_width(self.feature_names.len(), row)?;
        Ok(row
            .iter()
            .zip(self.scale.iter().zip(&self.min))
            .map(|(x, (scale, min))| x * scale + min)
            .collect())
    }
}

// ---------------------------------------------------------------------------
// ScalerArtifact
// ---------------------------------------------------------------------------

/// Any supported scaler, as read from a `kind`-tagged JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

impl ScalerArtifact {
    /// Short name of the parameterization, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Standard(_) => "standard",
            Self::MinMax(_) => "min_max",
        }
    }
}

impl FeatureScaler for ScalerArtifact {
    fn feature_names(&self) -> &[String] {
        match self {
            Self::Standard(s) => s.feature_names(),
            Self::MinMax(s) => s.feature_names(),
        }
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        match self {
            Self::Standard(s) => s.transform(row),
            Self::MinMax(s) => s.transform(row),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_names(kind: &'static str, names: &[String]) -> Result<(), ModelError> {
    if names.is_empty() {
        return Err(ModelError::invalid(kind, "feature_names is empty"));
    }
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(ModelError::invalid(
                kind,
                format!("duplicate feature name {name:?}"),
            ));
        }
    }
    Ok(())
}

fn validate_params(
    kind: &'static str,
    param: &str,
    names: &[String],
    values: &[f64],
) -> Result<(), ModelError> {
    if values.len() != names.len() {
        return Err(ModelError::invalid(
            kind,
            format!(
                "{param} has {} values for {} features",
                values.len(),
                names.len()
            ),
        ));
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(ModelError::invalid(
            kind,
            format!("{param} for {:?} is not finite", names[i]),
        ));
    }
    Ok(())
}
