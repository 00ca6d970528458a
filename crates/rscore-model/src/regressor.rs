//! # Regressors
//!
//! The store model maps a scaled feature row to one raw prediction. The
//! pipeline only relies on the [`Regressor`] contract; the concrete
//! representations here are what the shipped artifacts use.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::tree::TreeEnsemble;

/// A fitted single-output regression model.
pub trait Regressor: Send + Sync + fmt::Debug {
    /// Width of the rows `predict` accepts.
    fn n_features(&self) -> usize;

    /// Predict one row.
    fn predict(&self, row: &[f64]) -> Result<f64, ModelError>;
}

/// Ordinary linear model: `intercept + Σ coefficients[i] * x[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LinearParams", into = "LinearParams")]
pub struct LinearRegressor {
    coefficients: Vec<f64>,
    intercept: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinearParams {
    n_features: usize,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegressor {
    /// Build a validated linear model.
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ModelError> {
        const KIND: &str = "linear regressor";
        if coefficients.is_empty() {
            return Err(ModelError::invalid(KIND, "no coefficients"));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::invalid(KIND, "parameters must be finite"));
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }
}

impl TryFrom<LinearParams> for LinearRegressor {
    type Error = ModelError;

    fn try_from(p: LinearParams) -> Result<Self, Self::Error> {
        if p.coefficients.len() != p.n_features {
            return Err(ModelError::invalid(
                "linear regressor",
                format!(
                    "n_features is {} but {} coefficients were given",
                    p.n_features,
                    p.coefficients.len()
                ),
            ));
        }
        Self::new(p.coefficients, p.intercept)
    }
}

impl From<LinearRegressor> for LinearParams {
    fn from(m: LinearRegressor) -> Self {
        Self {
            n_features: m.coefficients.len(),
            coefficients: m.coefficients,
            intercept: m.intercept,
        }
    }
}

impl Regressor for LinearRegressor {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        ModelError::check_width(self.coefficients.len(), row)?;
        Ok(row
            .iter()
            .zip(&self.coefficients)
            .fold(self.intercept, |acc, (x, c)| acc + x * c))
    }
}

impl Regressor for TreeEnsemble {
    fn n_features(&self) -> usize {
        TreeEnsemble::n_features(self)
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        TreeEnsemble::predict(self, row)
    }
}

/// Any supported regressor, as read from a `kind`-tagged JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorArtifact {
    Linear(LinearRegressor),
    TreeEnsemble(TreeEnsemble),
}

impl RegressorArtifact {
    /// Short name of the representation, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::TreeEnsemble(_) => "tree_ensemble",
        }
    }
}

impl Regressor for RegressorArtifact {
    fn n_features(&self) -> usize {
        match self {
            Self::Linear(m) => m.n_features(),
            Self::TreeEnsemble(m) => Regressor::n_features(m),
        }
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        match self {
            Self::Linear(m) => m.predict(row),
            Self::TreeEnsemble(m) => Regressor::predict(m, row),
        }
    }
}
