//! # Check Subcommand
//!
//! Runs the full startup bootstrap and prints what was loaded. Useful in
//! deployment pipelines to validate a registry and artifact set together.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use rscore_scoring::{bootstrap, ScoringConfig, ScoringContext};

use crate::{write_json, EXIT_OK};

/// What a successful bootstrap loaded.
#[derive(Debug, Serialize)]
pub struct CheckSummary {
    pub data_path: String,
    pub model_dir: String,
    pub locations: usize,
    pub duplicates_skipped: usize,
    pub market_columns: Vec<String>,
    pub store_scaled_columns: Vec<String>,
}

impl CheckSummary {
    pub fn new(config: &ScoringConfig, context: &ScoringContext) -> Self {
        Self {
            data_path: config.data_path.display().to_string(),
            model_dir: config.model_dir.display().to_string(),
            locations: context.registry().len(),
            duplicates_skipped: context.registry().duplicate_count(),
            market_columns: context.market_scorer().feature_names().to_vec(),
            store_scaled_columns: context.store_scorer().scaled_columns().to_vec(),
        }
    }
}

/// Execute `rscore check`.
pub fn run_check<W: Write>(config: &ScoringConfig, out: &mut W) -> Result<u8> {
    let context = bootstrap(config).context("bootstrap failed")?;
    write_json(out, &CheckSummary::new(config, &context))?;
    Ok(EXIT_OK)
}
