//! Fixture helpers for the cross-crate scenarios under `tests/`.
//!
//! `fixtures/` holds a small registry CSV and one artifact set. Scenarios
//! that need a different artifact copy the set into a temporary directory
//! and overwrite single files there.

use std::path::{Path, PathBuf};

use rscore_scoring::ScoringConfig;
use tempfile::TempDir;

/// The `fixtures/` directory of this crate.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

pub fn fixture_csv() -> PathBuf {
    fixtures_dir().join("retail_data_with_area_type.csv")
}

pub fn fixture_models() -> PathBuf {
    fixtures_dir().join("models")
}

/// Configuration pointing at the shipped fixtures.
pub fn fixture_config() -> ScoringConfig {
    ScoringConfig {
        data_path: fixture_csv(),
        model_dir: fixture_models(),
        ..ScoringConfig::default()
    }
}

/// Copy the fixture artifacts into a fresh directory, then write each
/// `(file name, contents)` override on top.
pub fn model_dir_with(overrides: &[(&str, &str)]) -> std::io::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    for entry in std::fs::read_dir(fixture_models())? {
        let entry = entry?;
        std::fs::copy(entry.path(), dir.path().join(entry.file_name()))?;
    }
    for (name, contents) in overrides {
        std::fs::write(dir.path().join(name), contents)?;
    }
    Ok(dir)
}
