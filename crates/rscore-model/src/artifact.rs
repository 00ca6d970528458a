//! # Artifact Loading
//!
//! Reads a JSON artifact from disk into its validated in-memory form.
//! Loading happens once at startup; any error here is fatal.

use std::path::Path;

use crate::error::ModelError;
use crate::regressor::{Regressor, RegressorArtifact};
use crate::scaler::{FeatureScaler, ScalerArtifact};

/// Load a scaler artifact (`kind` = `standard` | `min_max`).
pub fn load_scaler(path: impl AsRef<Path>) -> Result<ScalerArtifact, ModelError> {
    let path = path.as_ref();
    let scaler: ScalerArtifact = read_json(path)?;
    tracing::info!(
        path = %path.display(),
        kind = scaler.kind(),
        features = scaler.n_features(),
        "scaler artifact loaded"
    );
    Ok(scaler)
}

/// Load a regressor artifact (`kind` = `linear` | `tree_ensemble`).
pub fn load_regressor(path: impl AsRef<Path>) -> Result<RegressorArtifact, ModelError> {
    let path = path.as_ref();
    let model: RegressorArtifact = read_json(path)?;
    tracing::info!(
        path = %path.display(),
        kind = model.kind(),
        features = model.n_features(),
        "regressor artifact loaded"
    );
    Ok(model)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let bytes = std::fs::read(path).map_err(|source| ModelError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ModelError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_scaler_from_disk() {
        let f = write_temp(
            r#"{"kind":"standard","feature_names":["a","b"],"mean":[0,0],"scale":[1,2]}"#,
        );
        let s = load_scaler(f.path()).unwrap();
        assert_eq!(s.feature_names(), ["a", "b"]);
        assert_eq!(s.transform(&[3.0, 4.0]).unwrap(), vec![3.0, 2.0]);
    }

    #[test]
    fn loads_regressor_from_disk() {
        let f = write_temp(r#"{"kind":"linear","n_features":1,"coefficients":[3],"intercept":1}"#);
        let m = load_regressor(f.path()).unwrap();
        assert_eq!(m.predict(&[2.0]).unwrap(), 7.0);
    }

    #[test]
    fn missing_file_is_read_error() {
        assert!(matches!(
            load_scaler("/nonexistent/market_scaler.json"),
            Err(ModelError::Read { .. })
        ));
    }

    #[test]
    fn corrupt_file_is_parse_error() {
        let f = write_temp("{ not json");
        assert!(matches!(load_regressor(f.path()), Err(ModelError::Parse { .. })));
    }

    #[test]
    fn invalid_parameters_surface_as_parse_error_with_reason() {
        let f = write_temp(r#"{"kind":"standard","feature_names":["a"],"mean":[0],"scale":[0]}"#);
        let err = load_scaler(f.path()).unwrap_err();
        assert!(err.to_string().contains("zero"), "{err}");
    }
}
