//! # Lookup Subcommand
//!
//! Prints the registered demographics for one pincode. Only the registry is
//! loaded; model artifacts are not needed.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use rscore_core::Pincode;
use rscore_registry::LocationRegistry;
use rscore_scoring::{ScoringConfig, INVALID_PINCODE};

use crate::{write_json, EXIT_NOT_FOUND, EXIT_OK};

/// Arguments for `rscore lookup`.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Postal code to look up.
    #[arg(value_name = "PINCODE")]
    pub pincode: Pincode,
}

/// Execute `rscore lookup`.
pub fn run_lookup<W: Write>(
    args: &LookupArgs,
    config: &ScoringConfig,
    out: &mut W,
) -> Result<u8> {
    let registry = LocationRegistry::load_csv(&config.data_path)
        .with_context(|| format!("failed to load registry: {}", config.data_path.display()))?;
    lookup_in(&registry, args.pincode, out)
}

fn lookup_in<W: Write>(registry: &LocationRegistry, pincode: Pincode, out: &mut W) -> Result<u8> {
    match registry.lookup(pincode) {
        Some(record) => {
            write_json(out, &record.demographics())?;
            Ok(EXIT_OK)
        }
        None => {
            write_json(out, &serde_json::json!({ "error": INVALID_PINCODE }))?;
            Ok(EXIT_NOT_FOUND)
        }
    }
}
