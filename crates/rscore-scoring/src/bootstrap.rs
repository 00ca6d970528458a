//! # Startup Bootstrap
//!
//! Builds a [`ScoringContext`] from a [`ScoringConfig`].
//!
//! ## Bootstrap Sequence
//!
//! 1. **Load Registry**: read and index the location CSV.
//! 2. **Load Artifacts**: market scaler, store scaler, store regressor.
//! 3. **Check Contract**: artifact columns and widths against the feature
//!    layout.
//! 4. **Log Summary**: one structured startup line.
//!
//! Any failure aborts; a partially loaded context is never returned.

use std::path::Path;
use std::sync::Arc;

use rscore_model::{load_regressor, load_scaler, FeatureScaler, ModelError, Regressor};
use rscore_registry::LocationRegistry;

use crate::config::ScoringConfig;
use crate::context::ScoringContext;
use crate::error::BootstrapError;

struct Artifacts {
    market_scaler: Arc<dyn FeatureScaler>,
    store_scaler: Arc<dyn FeatureScaler>,
    store_model: Arc<dyn Regressor>,
}

/// Load every startup input and wire the scoring context.
pub fn bootstrap(config: &ScoringConfig) -> Result<ScoringContext, BootstrapError> {
    let registry = load_registry(config)?;
    let artifacts = load_artifacts(config)?;
    // Phase 3: the scorers check their artifacts as they are wired.
    let context = ScoringContext::new(
        registry,
        artifacts.market_scaler,
        artifacts.store_scaler,
        artifacts.store_model,
    )?;
    log_summary(config, &context);
    Ok(context)
}

// ---------------------------------------------------------------------------
// Phase 1: Load Registry
// ---------------------------------------------------------------------------

fn load_registry(config: &ScoringConfig) -> Result<LocationRegistry, BootstrapError> {
    Ok(LocationRegistry::load_csv(&config.data_path)?)
}

// ---------------------------------------------------------------------------
// Phase 2: Load Artifacts
// ---------------------------------------------------------------------------

fn load_artifacts(config: &ScoringConfig) -> Result<Artifacts, BootstrapError> {
    let market_path = config.market_scaler_path();
    let store_path = config.store_scaler_path();
    let model_path = config.store_model_path();

    let market_scaler = load_scaler(&market_path).map_err(artifact_error(&market_path))?;
    let store_scaler = load_scaler(&store_path).map_err(artifact_error(&store_path))?;
    let store_model = load_regressor(&model_path).map_err(artifact_error(&model_path))?;

    Ok(Artifacts {
        market_scaler: Arc::new(market_scaler),
        store_scaler: Arc::new(store_scaler),
        store_model: Arc::new(store_model),
    })
}

fn artifact_error(path: &Path) -> impl FnOnce(ModelError) -> BootstrapError + '_ {
    move |source| BootstrapError::Artifact {
        path: path.display().to_string(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Phase 4: Log Summary
// ---------------------------------------------------------------------------

fn log_summary(config: &ScoringConfig, context: &ScoringContext) {
    let registry = context.registry();
    tracing::info!(
        data_path = %config.data_path.display(),
        model_dir = %config.model_dir.display(),
        locations = registry.len(),
        duplicates_skipped = registry.duplicate_count(),
        market_columns = ?context.market_scorer().feature_names(),
        store_scaled_columns = ?context.store_scorer().scaled_columns(),
        "scoring context ready"
    );
}
