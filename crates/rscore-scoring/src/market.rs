//! # Market Scorer
//!
//! Summarizes a location's demographics as one number: the arithmetic mean
//! of the market scaler's output, rounded to 2 decimals. The row is built in
//! the order the scaler declares, from [`MARKET_FEATURES`] columns only.

use std::sync::Arc;

use rscore_model::FeatureScaler;

use crate::error::{ContractError, ScoringError};
use crate::features::{MarketFeatures, MARKET_FEATURES};
use crate::rules::round2;

const ARTIFACT: &str = "market scaler";

/// Scores the demographic potential of a location.
#[derive(Debug, Clone)]
pub struct MarketScorer {
    scaler: Arc<dyn FeatureScaler>,
}

impl MarketScorer {
    /// Wire a scaler in, rejecting one fit on columns the registry cannot
    /// supply.
    pub fn new(scaler: Arc<dyn FeatureScaler>) -> Result<Self, ContractError> {
        if let Some(name) = scaler
            .feature_names()
            .iter()
            .find(|name| !MARKET_FEATURES.contains(&name.as_str()))
        {
            return Err(ContractError::UnknownFeature {
                artifact: ARTIFACT,
                name: name.clone(),
            });
        }
        if scaler.n_features() == 0 {
            return Err(ContractError::WidthMismatch {
                artifact: ARTIFACT,
                expected: MARKET_FEATURES.len(),
                actual: 0,
            });
        }
        Ok(Self { scaler })
    }

    /// Columns the scaler consumes, in row order.
    pub fn feature_names(&self) -> &[String] {
        self.scaler.feature_names()
    }

    pub fn score(&self, features: &MarketFeatures) -> Result<f64, ScoringError> {
        let row: Vec<f64> = self
            .scaler
            .feature_names()
            .iter()
            .filter_map(|name| features.get(name))
            .collect();
        let scaled = self.scaler.transform(&row)?;
        let mean = scaled.iter().sum::<f64>() / scaled.len() as f64;
        tracing::debug!(market_score = mean, "market features scaled");
        Ok(round2(mean))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rscore_model::{MinMaxScaler, StandardScaler};

    fn names(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    fn features() -> MarketFeatures {
        MarketFeatures {
            total_population: 500_000.0,
            male_population: 260_000.0,
            female_population: 240_000.0,
            population_density: 12_500.0,
            area_type_encoded: 3.0,
        }
    }

    #[test]
    fn mean_of_scaled_features_rounded() {
        let scaler = StandardScaler::new(
            names(&MARKET_FEATURES),
            vec![400_000.0, 200_000.0, 200_000.0, 10_000.0, 2.0],
            vec![100_000.0, 50_000.0, 40_000.0, 5_000.0, 1.0],
        )
        .unwrap();
        let scorer = MarketScorer::new(Arc::new(scaler)).unwrap();
        // scaled: 1.0, 1.2, 1.0, 0.5, 1.0 -> mean 0.94
        assert_eq!(scorer.score(&features()).unwrap(), 0.94);
    }

    #[test]
    fn row_follows_scaler_order() {
        // density first, then area type: 12500 * 0.0001 = 1.25, 3 * 0.25 = 0.75
        let scaler = MinMaxScaler::new(
            names(&["population_density", "area_type_encoded"]),
            vec![0.0, 0.0],
            vec![0.0001, 0.25],
        )
        .unwrap();
        let scorer = MarketScorer::new(Arc::new(scaler)).unwrap();
        assert_eq!(scorer.feature_names(), ["population_density", "area_type_encoded"]);
        assert_eq!(scorer.score(&features()).unwrap(), 1.0);
    }

    #[test]
    fn rejects_store_only_column() {
        let scaler = StandardScaler::new(
            names(&["total_population", "Competitors"]),
            vec![0.0, 0.0],
            vec![1.0, 1.0],
        )
        .unwrap();
        let err = MarketScorer::new(Arc::new(scaler)).unwrap_err();
        assert_eq!(
            err,
            ContractError::UnknownFeature {
                artifact: "market scaler",
                name: "Competitors".into()
            }
        );
    }
}
