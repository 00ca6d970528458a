//! # Prediction Orchestrator
//!
//! [`ScoringContext`] holds everything a prediction reads: the location
//! registry and the two scorers. It is immutable after construction and
//! `Send + Sync`, so one instance is shared across threads behind an `Arc`.
//!
//! A prediction looks the pincode up first. An unknown pincode returns
//! [`PredictionOutcome::InvalidPincode`] without touching either scorer.

use std::sync::Arc;

use rayon::prelude::*;
use rscore_core::{AreaType, Demographics, Pincode, PredictionRequest};
use rscore_model::{FeatureScaler, Regressor};
use rscore_registry::LocationRegistry;
use serde::{Deserialize, Serialize};

use crate::error::{ContractError, ScoringError};
use crate::features::{MarketFeatures, StoreFeatures};
use crate::market::MarketScorer;
use crate::store::StoreScorer;

/// Error string returned for an unknown pincode.
pub const INVALID_PINCODE: &str = "Invalid pincode";

/// A scored prediction, in its external shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub pincode: Pincode,
    pub area_type: AreaType,
    pub market_score: f64,
    pub store_score: f64,
    pub demographics: Demographics,
}

/// The result of one prediction.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Scored(PredictionResult),
    /// The pincode is not in the registry.
    InvalidPincode(Pincode),
}

impl PredictionOutcome {
    pub fn is_scored(&self) -> bool {
        matches!(self, Self::Scored(_))
    }

    pub fn into_response(self) -> PredictionResponse {
        match self {
            Self::Scored(result) => PredictionResponse::Scored(result),
            Self::InvalidPincode(_) => PredictionResponse::Error {
                error: INVALID_PINCODE.to_string(),
            },
        }
    }
}

/// Response body: either the scored result or `{"error": "Invalid pincode"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Scored(PredictionResult),
    Error { error: String },
}

/// Shared, read-only prediction state.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    registry: Arc<LocationRegistry>,
    market: MarketScorer,
    store: StoreScorer,
}

impl ScoringContext {
    /// Wire the registry and artifacts together, checking each artifact
    /// against the feature contract.
    pub fn new(
        registry: LocationRegistry,
        market_scaler: Arc<dyn FeatureScaler>,
        store_scaler: Arc<dyn FeatureScaler>,
        store_model: Arc<dyn Regressor>,
    ) -> Result<Self, ContractError> {
        Ok(Self {
            registry: Arc::new(registry),
            market: MarketScorer::new(market_scaler)?,
            store: StoreScorer::new(store_scaler, store_model)?,
        })
    }

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    pub fn market_scorer(&self) -> &MarketScorer {
        &self.market
    }

    pub fn store_scorer(&self) -> &StoreScorer {
        &self.store
    }

    /// Score one request.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionOutcome, ScoringError> {
        let Some(location) = self.registry.lookup(request.pincode) else {
            tracing::debug!(pincode = %request.pincode, "pincode not in registry");
            return Ok(PredictionOutcome::InvalidPincode(request.pincode));
        };

        let market_features = MarketFeatures::new(location, request.area_type.encoded());
        let market_score = self.market.score(&market_features)?;
        let store_features = StoreFeatures::new(&market_features, request, market_score);
        let store = self.store.score(&store_features, request)?;

        tracing::debug!(
            pincode = %request.pincode,
            market_score,
            store_score = store.store_score,
            "prediction scored"
        );
        Ok(PredictionOutcome::Scored(PredictionResult {
            pincode: request.pincode,
            area_type: request.area_type.clone(),
            market_score,
            store_score: store.store_score,
            demographics: location.demographics(),
        }))
    }

    /// Score independent requests in parallel. Outcomes keep input order.
    pub fn predict_batch(
        &self,
        requests: &[PredictionRequest],
    ) -> Vec<Result<PredictionOutcome, ScoringError>> {
        requests.par_iter().map(|r| self.predict(r)).collect()
    }

    /// Score one request into its external response shape.
    pub fn predict_store_success(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, ScoringError> {
        self.predict(request).map(PredictionOutcome::into_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COUNT;
    use crate::rules::{COMPETITION_PENALTY, URBAN_PREMIUM};
    use rscore_core::{LocationRecord, ShopSize};
    use rscore_model::ModelError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct CountingScaler {
        names: Vec<String>,
        calls: AtomicUsize,
    }

    impl CountingScaler {
        fn identity(cols: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                names: cols.iter().map(|c| c.to_string()).collect(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl FeatureScaler for CountingScaler {
        fn feature_names(&self) -> &[String] {
            &self.names
        }

        fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(row.to_vec())
        }
    }

    /// Always predicts the same raw value.
    #[derive(Debug)]
    struct ConstantRegressor {
        value: f64,
        calls: AtomicUsize,
    }

    impl Regressor for ConstantRegressor {
        fn n_features(&self) -> usize {
            FEATURE_COUNT
        }

        fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
            assert_eq!(row.len(), FEATURE_COUNT);
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.value)
        }
    }

    fn pune() -> LocationRecord {
        LocationRecord {
            pincode: Pincode::new(411001),
            place_name: "Pune".into(),
            total_population: 500_000,
            male_population: 260_000,
            female_population: 240_000,
            population_density: 12_500.0,
            coordinates: "18.52,73.85".into(),
        }
    }

    struct Fixture {
        context: ScoringContext,
        market: Arc<CountingScaler>,
        store: Arc<CountingScaler>,
        model: Arc<ConstantRegressor>,
    }

    fn fixture(raw: f64) -> Fixture {
        let market = CountingScaler::identity(&["area_type_encoded"]);
        let store = CountingScaler::identity(&["shop_size"]);
        let model = Arc::new(ConstantRegressor {
            value: raw,
            calls: AtomicUsize::new(0),
        });
        let context = ScoringContext::new(
            LocationRegistry::from_records([pune()]),
            market.clone(),
            store.clone(),
            model.clone(),
        )
        .unwrap();
        Fixture {
            context,
            market,
            store,
            model,
        }
    }

    fn request(pincode: u32, competitors: u32, area_type: AreaType) -> PredictionRequest {
        PredictionRequest {
            pincode: Pincode::new(pincode),
            area_type,
            competitors,
            employee_count: 12,
            stock_availability: 75.0,
            shop_size: ShopSize::Label("Large".into()),
        }
    }

    fn scored(outcome: PredictionOutcome) -> PredictionResult {
        match outcome {
            PredictionOutcome::Scored(result) => result,
            other => panic!("expected a scored outcome, got {other:?}"),
        }
    }

    #[test]
    fn unknown_pincode_invokes_no_scorer() {
        let f = fixture(700.0);
        let outcome = f.context.predict(&request(999_999, 0, AreaType::Urban)).unwrap();
        assert_eq!(outcome, PredictionOutcome::InvalidPincode(Pincode::new(999_999)));
        assert_eq!(f.market.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.store.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_pincode_response_is_exact() {
        let f = fixture(700.0);
        let response = f
            .context
            .predict_store_success(&request(1, 0, AreaType::Rural))
            .unwrap();
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            serde_json::json!({"error": "Invalid pincode"})
        );
    }

    #[test]
    fn scored_result_carries_demographics() {
        let f = fixture(700.0);
        let result = scored(f.context.predict(&request(411001, 3, AreaType::Rural)).unwrap());
        // identity market scaler over area_type_encoded: Rural -> 1.0
        assert_eq!(result.market_score, 1.0);
        assert_eq!(result.store_score, 500.0);
        assert_eq!(result.area_type, AreaType::Rural);
        assert_eq!(result.demographics.place, "Pune");
        assert_eq!(result.demographics.population_density, 12_500.0);
        assert_eq!(result.demographics.coordinates, "18.52,73.85");
        assert_eq!(f.market.calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.store.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rules_compound_under_stubbed_model() {
        let raw = 700.0;
        let f = fixture(raw);
        let penalized = scored(f.context.predict(&request(411001, 20, AreaType::Urban)).unwrap());
        let plain = scored(f.context.predict(&request(411001, 5, AreaType::Rural)).unwrap());
        assert_eq!(plain.store_score, 500.0);
        let expected = crate::rules::scale_to_1000(raw * COMPETITION_PENALTY * URBAN_PREMIUM);
        assert_eq!(penalized.store_score, expected);
        assert_eq!(penalized.store_score, 480.4);
    }

    #[test]
    fn prediction_is_idempotent() {
        let f = fixture(812.345);
        let req = request(411001, 16, AreaType::SemiUrban);
        let a = f.context.predict(&req).unwrap();
        let b = f.context.predict(&req).unwrap();
        assert_eq!(a, b);
        let (a, b) = (scored(a), scored(b));
        assert_eq!(a.store_score.to_bits(), b.store_score.to_bits());
        assert_eq!(a.market_score.to_bits(), b.market_score.to_bits());
    }

    #[test]
    fn batch_matches_sequential_in_order() {
        let f = fixture(900.0);
        let requests: Vec<_> = (0..64)
            .map(|i| {
                let pincode = if i % 3 == 0 { 1 } else { 411001 };
                let area = if i % 2 == 0 { AreaType::Urban } else { AreaType::Rural };
                request(pincode, i, area)
            })
            .collect();
        let batch: Vec<_> = f
            .context
            .predict_batch(&requests)
            .into_iter()
            .map(Result::unwrap)
            .collect();
        let sequential: Vec<_> = requests
            .iter()
            .map(|r| f.context.predict(r).unwrap())
            .collect();
        assert_eq!(batch, sequential);
        assert!(!batch[0].is_scored());
        assert!(batch[1].is_scored());
    }

    #[test]
    fn context_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScoringContext>();
    }
}
