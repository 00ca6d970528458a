//! # rscore-scoring: Store Viability Pipeline
//!
//! Turns a [`PredictionRequest`](rscore_core::PredictionRequest) into a
//! market score and a 0 to 1000 store score.
//!
//! ## Pipeline
//!
//! ```text
//! request ─► registry lookup ──(absent)──► InvalidPincode
//!                  │
//!                  ▼
//!          MarketFeatures ─► MarketScorer ─► market_score
//!                  │                              │
//!                  ▼                              ▼
//!          StoreFeatures (9 columns, fixed order) ─► StoreScorer
//!                  ─► raw ─► business rules ─► scale_to_1000
//! ```
//!
//! ## Modules
//!
//! - [`features`]: the fixed column layout artifacts are checked against.
//! - [`market`], [`store`]: the two scorers.
//! - [`rules`]: competition penalty, urban premium, score scaling.
//! - [`context`]: [`ScoringContext`], the shared read-only orchestrator.
//! - [`config`], [`bootstrap`]: locating and loading startup inputs.
//!
//! All state is loaded once by [`bootstrap()`] and never mutated, so a
//! context is shared across threads without locks.

pub mod bootstrap;
pub mod config;
pub mod context;
pub mod error;
pub mod features;
pub mod market;
pub mod rules;
pub mod store;

pub use bootstrap::bootstrap;
pub use config::{ConfigOverlay, ScoringConfig};
pub use context::{
    PredictionOutcome, PredictionResponse, PredictionResult, ScoringContext, INVALID_PINCODE,
};
pub use error::{BootstrapError, ConfigError, ContractError, ScoringError};
pub use features::{MarketFeatures, StoreFeatures, FEATURE_COUNT, MARKET_FEATURES, MODEL_FEATURES};
pub use market::MarketScorer;
pub use rules::{apply_business_rules, round2, scale_to_1000};
pub use store::{StoreScore, StoreScorer};
