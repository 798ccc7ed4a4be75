//! In-memory phone catalog.
//!
//! The dataset is read once at startup and never mutated afterwards. Request
//! handlers borrow records from the catalog; nothing is copied until the
//! final projection into [`crate::pipeline::recommend::PhoneSummary`].

pub mod loader;
pub mod record;

pub use loader::REQUIRED_COLUMNS;
pub use record::PhoneRecord;

/// Loaded dataset plus the metadata derived from it at load time.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<PhoneRecord>,
    brands: Vec<String>,
    missing_columns: Vec<&'static str>,
}

impl Catalog {
    /// Build a catalog from already-parsed records.
    ///
    /// Brands are collected in first-seen order so brand matching is
    /// deterministic across runs.
    pub fn new(records: Vec<PhoneRecord>) -> Self {
        let mut brands: Vec<String> = Vec::new();
        for record in &records {
            if !brands.iter().any(|b| b == &record.brand_name) {
                brands.push(record.brand_name.clone());
            }
        }
        Self {
            records,
            brands,
            missing_columns: Vec::new(),
        }
    }

    pub(crate) fn with_missing_columns(mut self, missing: Vec<&'static str>) -> Self {
        self.missing_columns = missing;
        self
    }

    pub fn records(&self) -> &[PhoneRecord] {
        &self.records
    }

    /// Distinct brand names in first-seen order.
    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    /// Declared feature columns absent from the dataset header.
    pub fn missing_columns(&self) -> &[&'static str] {
        &self.missing_columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
