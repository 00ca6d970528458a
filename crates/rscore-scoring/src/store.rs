//! # Store Scorer
//!
//! ```text
//! StoreFeatures ─► store scaler (its columns only) ─► regressor ─► raw
//!     raw ─► business rules ─► adjusted ─► scale_to_1000 ─► store_score
//! ```
//!
//! The store scaler may be fit on a subset of [`MODEL_FEATURES`]. Its
//! columns are gathered in its declared order, scaled, and written back to
//! their model positions; every other column reaches the regressor as is.

use std::sync::Arc;

use rscore_core::PredictionRequest;
use rscore_model::{FeatureScaler, Regressor};
use serde::Serialize;

use crate::error::{ContractError, ScoringError};
use crate::features::{model_feature_index, StoreFeatures, FEATURE_COUNT};
use crate::rules::{apply_business_rules, scale_to_1000};

/// Every stage of one store score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StoreScore {
    /// Regressor output before any adjustment.
    pub raw_prediction: f64,
    /// After the competition penalty and urban premium.
    pub adjusted_prediction: f64,
    /// Final score on the 0 to 1000 scale.
    pub store_score: f64,
}

/// Scores a store configuration at a known location.
#[derive(Debug, Clone)]
pub struct StoreScorer {
    scaler: Arc<dyn FeatureScaler>,
    model: Arc<dyn Regressor>,
    /// Model position of each scaler column, in scaler order.
    scaled_positions: Vec<usize>,
}

impl StoreScorer {
    pub fn new(
        scaler: Arc<dyn FeatureScaler>,
        model: Arc<dyn Regressor>,
    ) -> Result<Self, ContractError> {
        let mut scaled_positions = Vec::with_capacity(scaler.n_features());
        for name in scaler.feature_names() {
            let position = model_feature_index(name)
                .filter(|p| !scaled_positions.contains(p))
                .ok_or_else(|| ContractError::UnknownFeature {
                    artifact: "store scaler",
                    name: name.clone(),
                })?;
            scaled_positions.push(position);
        }
        if model.n_features() != FEATURE_COUNT {
            return Err(ContractError::WidthMismatch {
                artifact: "store model",
                expected: FEATURE_COUNT,
                actual: model.n_features(),
            });
        }
        Ok(Self {
            scaler,
            model,
            scaled_positions,
        })
    }

    /// Columns the store scaler consumes, in its order.
    pub fn scaled_columns(&self) -> &[String] {
        self.scaler.feature_names()
    }

    pub fn score(
        &self,
        features: &StoreFeatures,
        request: &PredictionRequest,
    ) -> Result<StoreScore, ScoringError> {
        let mut row = features.to_array();
        let subset: Vec<f64> = self.scaled_positions.iter().map(|&p| row[p]).collect();
        let scaled = self.scaler.transform(&subset)?;
        for (&position, value) in self.scaled_positions.iter().zip(scaled) {
            row[position] = value;
        }

        let raw_prediction = self.model.predict(&row)?;
        let adjusted_prediction =
            apply_business_rules(raw_prediction, request.competitors, &request.area_type);
        let store_score = scale_to_1000(adjusted_prediction);
        tracing::debug!(
            raw_prediction,
            adjusted_prediction,
            store_score,
            "store prediction"
        );
        Ok(StoreScore {
            raw_prediction,
            adjusted_prediction,
            store_score,
        })
    }
}
