//! # rscore-cli: Retail Store Scoring CLI
//!
//! Provides the `rscore` command-line interface over the scoring pipeline.
//!
//! ## Subcommands
//!
//! - `rscore predict`: score one request, or a batch from a JSON array.
//! - `rscore lookup`: print the demographics registered for a pincode.
//! - `rscore check`: load every startup input and print a summary.
//!
//! ```bash
//! rscore predict --pincode 411001 --area-type Urban --competitors 4 \
//!     --employee-count 12 --stock-availability 80 --shoe-size Medium
//! rscore --model-dir artifacts/ predict --payload requests.json
//! rscore lookup 411001
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | configuration or runtime error |
//! | 2 | pincode not in the registry |

pub mod check;
pub mod lookup;
pub mod predict;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use rscore_scoring::{ConfigOverlay, ScoringConfig};

/// Command completed.
pub const EXIT_OK: u8 = 0;

/// The requested pincode is not registered.
pub const EXIT_NOT_FOUND: u8 = 2;

/// Resolve the scoring configuration from the global flags, an optional
/// YAML file and the environment.
pub fn resolve_config(
    config_file: Option<&Path>,
    data: Option<PathBuf>,
    model_dir: Option<PathBuf>,
) -> Result<ScoringConfig> {
    let flags = ConfigOverlay {
        data_path: data,
        model_dir,
        ..ConfigOverlay::default()
    };
    let config = ScoringConfig::resolve(config_file, flags)
        .context("failed to resolve configuration")?;
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

/// Pretty-print a value as JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to serialize output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let c = resolve_config(None, Some("fixtures/retail.csv".into()), None).unwrap();
        assert_eq!(c.data_path, PathBuf::from("fixtures/retail.csv"));
        assert_eq!(c.market_scaler_file, "market_scaler.json");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = resolve_config(Some(Path::new("/nonexistent/rscore.yaml")), None, None)
            .unwrap_err();
        assert!(format!("{err:#}").contains("rscore.yaml"));
    }

    #[test]
    fn write_json_appends_newline() {
        let mut buf = Vec::new();
        write_json(&mut buf, &serde_json::json!({"a": 1})).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
    }
}
