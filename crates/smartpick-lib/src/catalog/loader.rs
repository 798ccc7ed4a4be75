use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, info, warn};

use super::{Catalog, PhoneRecord};
use crate::model::features::FeatureSchema;

/// Columns the filter engine and result projection cannot work without.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "brand_name",
    "model",
    "price",
    "ram_capacity",
    "battery_capacity",
    "primary_camera_rear",
    "num_rear_cameras",
    "avg_rating",
];

impl Catalog {
    /// Load the dataset from a CSV file with a header row.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset at {}", path.display()))?;
        let catalog = Self::from_reader(file)
            .with_context(|| format!("Failed to load dataset from {}", path.display()))?;
        info!(
            path = %path.display(),
            rows = catalog.len(),
            brands = catalog.brands().len(),
            "Dataset loaded"
        );
        Ok(catalog)
    }

    /// Parse CSV text from any reader.
    ///
    /// Fails when a required column is absent. Absent feature columns are
    /// recorded in [`Catalog::missing_columns`] and logged once here; the
    /// model imputes them at scoring time.
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = reader.headers().context("Failed to read CSV header")?.clone();
        let has_column = |name: &str| headers.iter().any(|h| h == name);

        let missing_required: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !has_column(c))
            .collect();
        if !missing_required.is_empty() {
            anyhow::bail!(
                "Dataset is missing required columns: {}",
                missing_required.join(", ")
            );
        }

        let missing_features: Vec<&'static str> = FeatureSchema::regression()
            .column_names()
            .filter(|c| !has_column(c))
            .collect();
        for column in &missing_features {
            warn!(column = %column, "Feature column missing from dataset; model defaults apply");
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<PhoneRecord>().enumerate() {
            // Row numbers are 1-based and count the header.
            let record = row.with_context(|| format!("Malformed dataset row {}", index + 2))?;
            records.push(record);
        }
        debug!(rows = records.len(), "Parsed dataset rows");

        Ok(Self::new(records).with_missing_columns(missing_features))
    }
}
