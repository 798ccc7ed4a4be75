use std::path::Path;

use tracing::info;

use crate::catalog::Catalog;
use crate::model::TrainedModel;
use crate::pipeline::{Recommendation, recommend};

/// Process-wide read-only state: the dataset and the trained model.
///
/// Loaded once at startup and shared (by reference or `Arc`) with every
/// entry point. Nothing mutates it afterwards.
#[derive(Debug)]
pub struct Runtime {
    pub catalog: Catalog,
    pub model: TrainedModel,
}

impl Runtime {
    pub fn load(dataset_path: &Path, model_path: &Path) -> anyhow::Result<Self> {
        let catalog = Catalog::load(dataset_path)?;
        let model = TrainedModel::load(model_path)?;
        info!(
            phones = catalog.len(),
            missing_columns = catalog.missing_columns().len(),
            "Runtime ready"
        );
        Ok(Self { catalog, model })
    }

    /// Recommend up to `top_n` phones for `query`, ranked by predicted rating.
    pub fn recommend(&self, query: &str, top_n: usize) -> Recommendation {
        recommend(&self.catalog, &self.model, query, top_n)
    }
}
