//! # Configuration
//!
//! Where the registry table and model artifacts live. Layers, lowest
//! priority first:
//!
//! 1. built-in defaults;
//! 2. environment (`RETAILSCORE_DATA_PATH`, `RETAILSCORE_MODEL_DIR`);
//! 3. a YAML file;
//! 4. explicit overrides (command-line flags).
//!
//! Each layer is a [`ConfigOverlay`]; unset fields fall through.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DATA_PATH_ENV: &str = "RETAILSCORE_DATA_PATH";
pub const MODEL_DIR_ENV: &str = "RETAILSCORE_MODEL_DIR";

pub const DEFAULT_DATA_PATH: &str = "data/retail_data_with_area_type.csv";
pub const DEFAULT_MODEL_DIR: &str = "models";
pub const DEFAULT_MARKET_SCALER_FILE: &str = "market_scaler.json";
pub const DEFAULT_STORE_SCALER_FILE: &str = "store_scaler.json";
pub const DEFAULT_STORE_MODEL_FILE: &str = "store_model.json";

/// Resolved locations of every startup input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoringConfig {
    /// Registry CSV.
    pub data_path: PathBuf,
    /// Directory holding the three artifacts.
    pub model_dir: PathBuf,
    pub market_scaler_file: String,
    pub store_scaler_file: String,
    pub store_model_file: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            market_scaler_file: DEFAULT_MARKET_SCALER_FILE.to_string(),
            store_scaler_file: DEFAULT_STORE_SCALER_FILE.to_string(),
            store_model_file: DEFAULT_STORE_MODEL_FILE.to_string(),
        }
    }
}

impl ScoringConfig {
    /// Apply overlays in order; later overlays win.
    pub fn layered(overlays: impl IntoIterator<Item = ConfigOverlay>) -> Self {
        let mut config = Self::default();
        for overlay in overlays {
            config.apply(overlay);
        }
        config
    }

    /// Resolve from the process environment, an optional YAML file, and
    /// explicit overrides.
    pub fn resolve(
        config_file: Option<&Path>,
        overrides: ConfigOverlay,
    ) -> Result<Self, ConfigError> {
        let file = config_file
            .map(ConfigOverlay::from_yaml_file)
            .transpose()?
            .unwrap_or_default();
        Ok(Self::layered([ConfigOverlay::from_env(), file, overrides]))
    }

    fn apply(&mut self, overlay: ConfigOverlay) {
        if let Some(v) = overlay.data_path {
            self.data_path = v;
        }
        if let Some(v) = overlay.model_dir {
            self.model_dir = v;
        }
        if let Some(v) = overlay.market_scaler_file {
            self.market_scaler_file = v;
        }
        if let Some(v) = overlay.store_scaler_file {
            self.store_scaler_file = v;
        }
        if let Some(v) = overlay.store_model_file {
            self.store_model_file = v;
        }
    }

    pub fn market_scaler_path(&self) -> PathBuf {
        self.model_dir.join(&self.market_scaler_file)
    }

    pub fn store_scaler_path(&self) -> PathBuf {
        self.model_dir.join(&self.store_scaler_file)
    }

    pub fn store_model_path(&self) -> PathBuf {
        self.model_dir.join(&self.store_model_file)
    }
}

/// A partial configuration. Also the schema of the YAML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverlay {
    pub data_path: Option<PathBuf>,
    pub model_dir: Option<PathBuf>,
    pub market_scaler_file: Option<String>,
    pub store_scaler_file: Option<String>,
    pub store_model_file: Option<String>,
}

impl ConfigOverlay {
    /// Read the environment layer through `lookup`. Empty values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            data_path: get(DATA_PATH_ENV).map(PathBuf::from),
            model_dir: get(MODEL_DIR_ENV).map(PathBuf::from),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_yaml_str(path: &Path, yaml: &str) -> Result<Self, ConfigError> {
        // An empty file parses as YAML null.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(path, &yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults() {
        let c = ScoringConfig::default();
        assert_eq!(c.data_path, PathBuf::from("data/retail_data_with_area_type.csv"));
        assert_eq!(c.market_scaler_path(), PathBuf::from("models/market_scaler.json"));
        assert_eq!(c.store_scaler_path(), PathBuf::from("models/store_scaler.json"));
        assert_eq!(c.store_model_path(), PathBuf::from("models/store_model.json"));
    }

    #[test]
    fn env_layer_reads_both_keys_and_skips_empty() {
        let env: HashMap<&str, &str> =
            HashMap::from([(DATA_PATH_ENV, "/srv/retail.csv"), (MODEL_DIR_ENV, "")]);
        let overlay = ConfigOverlay::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(overlay.data_path, Some(PathBuf::from("/srv/retail.csv")));
        assert_eq!(overlay.model_dir, None);
    }

    #[test]
    fn later_layers_win() {
        let env = ConfigOverlay {
            data_path: Some("env.csv".into()),
            model_dir: Some("env_models".into()),
            ..Default::default()
        };
        let file = ConfigOverlay {
            model_dir: Some("file_models".into()),
            store_model_file: Some("forest.json".into()),
            ..Default::default()
        };
        let flags = ConfigOverlay {
            model_dir: Some("flag_models".into()),
            ..Default::default()
        };
        let c = ScoringConfig::layered([env, file, flags]);
        assert_eq!(c.data_path, PathBuf::from("env.csv"));
        assert_eq!(c.model_dir, PathBuf::from("flag_models"));
        assert_eq!(c.store_model_path(), PathBuf::from("flag_models/forest.json"));
        assert_eq!(c.market_scaler_file, "market_scaler.json");
    }

    #[test]
    fn yaml_overlay() {
        let path = Path::new("rscore.yaml");
        let o = ConfigOverlay::from_yaml_str(
            path,
            "data_path: /data/retail.csv\nstore_scaler_file: scaler_v2.json\n",
        )
        .unwrap();
        assert_eq!(o.data_path, Some(PathBuf::from("/data/retail.csv")));
        assert_eq!(o.store_scaler_file.as_deref(), Some("scaler_v2.json"));
        assert_eq!(o.model_dir, None);

        assert_eq!(ConfigOverlay::from_yaml_str(path, "\n").unwrap(), ConfigOverlay::default());
    }

    #[test]
    fn yaml_unknown_key_is_rejected() {
        let err = ConfigOverlay::from_yaml_str(Path::new("bad.yaml"), "model_path: x\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn yaml_file_on_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"model_dir: artifacts\n").unwrap();
        let o = ConfigOverlay::from_yaml_file(f.path()).unwrap();
        assert_eq!(o.model_dir, Some(PathBuf::from("artifacts")));

        assert!(matches!(
            ConfigOverlay::from_yaml_file(Path::new("/nonexistent/rscore.yaml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
