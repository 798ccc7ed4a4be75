use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::info;

use super::linear::LinearRegressor;
use super::metrics::RegressionReport;
use super::preprocess::Preprocessor;
use crate::catalog::PhoneRecord;
use crate::pipeline::recommend::Scorer;

/// Bumped whenever the serialized layout changes.
pub const ARTIFACT_VERSION: u32 = 1;

/// Fitted rating pipeline: preprocessing plus linear regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    pub version: u32,
    pub preprocessor: Preprocessor,
    pub regressor: LinearRegressor,
    pub report: RegressionReport,
}

impl TrainedModel {
    /// Predicted average rating for one phone.
    pub fn predict(&self, record: &PhoneRecord) -> f64 {
        self.regressor.predict(&self.preprocessor.transform(record))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        write_artifact(self, path)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let model: Self = read_artifact(path)?;
        check_version(model.version, path)?;
        info!(path = %path.display(), report = %model.report, "Model loaded");
        Ok(model)
    }
}

impl Scorer for TrainedModel {
    fn score(&self, record: &PhoneRecord) -> f64 {
        self.predict(record)
    }
}

pub(crate) fn check_version(version: u32, path: &Path) -> anyhow::Result<()> {
    anyhow::ensure!(
        version == ARTIFACT_VERSION,
        "Model artifact {} has version {version}, expected {ARTIFACT_VERSION}. Run `smartpick train` again.",
        path.display()
    );
    Ok(())
}

pub(crate) fn write_artifact<T: Serialize>(value: &T, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize model")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write model to {}", path.display()))?;
    info!(path = %path.display(), "Model saved");
    Ok(())
}

pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let json = fs::read_to_string(path).with_context(|| {
        format!(
            "Model not found at {}. Run `smartpick train` first.",
            path.display()
        )
    })?;
    serde_json::from_str(&json)
        .with_context(|| format!("Model artifact at {} is corrupt", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::features::{FeatureSchema, NumericFeature};

    fn tiny_model() -> TrainedModel {
        let a = PhoneRecord {
            ram_capacity: Some(4.0),
            ..PhoneRecord::default()
        };
        let b = PhoneRecord {
            ram_capacity: Some(8.0),
            ..PhoneRecord::default()
        };
        let schema = FeatureSchema {
            numeric: vec![NumericFeature::RamCapacity],
            categorical: Vec::new(),
        };
        let preprocessor = Preprocessor::fit(&schema, &[&a, &b]);
        let x = preprocessor.transform_all(&[&a, &b]);
        let regressor = LinearRegressor::fit(&x, &[3.0, 4.0]).unwrap();
        TrainedModel {
            version: ARTIFACT_VERSION,
            preprocessor,
            regressor,
            report: RegressionReport::evaluate(2, &[], &[]).unwrap(),
        }
    }

    #[test]
    fn predict_follows_scaled_inputs() {
        let model = tiny_model();
        let phone = PhoneRecord {
            ram_capacity: Some(12.0),
            ..PhoneRecord::default()
        };
        assert!((model.predict(&phone) - 5.0).abs() < 1e-9);
        // Missing RAM imputes the training mean.
        assert!((model.predict(&PhoneRecord::default()) - 3.5).abs() < 1e-9);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("model.json");
        let model = tiny_model();

        model.save(&path).unwrap();
        assert_eq!(TrainedModel::load(&path).unwrap(), model);
    }

    #[test]
    fn load_missing_file_suggests_training() {
        let err = TrainedModel::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Model not found at /nonexistent/model.json. Run `smartpick train` first."
        );
    }

    #[test]
    fn load_rejects_other_versions() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("model.json");
        let mut model = tiny_model();
        model.version = ARTIFACT_VERSION + 1;
        model.save(&path).unwrap();

        let err = TrainedModel::load(&path).unwrap_err();
        assert!(err.to_string().contains("expected 1"));
    }

    #[test]
    fn load_rejects_garbage() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("model.json");
        fs::write(&path, "not json").unwrap();

        let err = TrainedModel::load(&path).unwrap_err();
        assert!(err.to_string().ends_with("is corrupt"));
    }
}
