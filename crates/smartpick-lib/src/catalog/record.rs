use serde::Deserialize;

/// One row of the smartphone dataset.
///
/// Every numeric cell may be empty in the source file, so numeric columns are
/// `Option<f64>`. Categorical columns are kept as text; some of them hold
/// numbers (`5G_or_not`, `fast_charging`) but the model treats them as labels.
/// Columns missing from the file header deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PhoneRecord {
    pub brand_name: String,
    pub model: String,
    pub price: Option<f64>,
    pub avg_rating: Option<f64>,
    #[serde(rename = "5G_or_not", default)]
    pub five_g: Option<String>,
    #[serde(default)]
    pub processor_brand: Option<String>,
    #[serde(default)]
    pub num_cores: Option<f64>,
    #[serde(default)]
    pub processor_speed: Option<f64>,
    pub battery_capacity: Option<f64>,
    #[serde(default)]
    pub fast_charging_available: Option<String>,
    #[serde(default)]
    pub fast_charging: Option<String>,
    pub ram_capacity: Option<f64>,
    #[serde(default)]
    pub internal_memory: Option<f64>,
    #[serde(default)]
    pub screen_size: Option<f64>,
    #[serde(default)]
    pub refresh_rate: Option<f64>,
    pub num_rear_cameras: Option<f64>,
    #[serde(default)]
    pub os: Option<String>,
    pub primary_camera_rear: Option<f64>,
    #[serde(default)]
    pub primary_camera_front: Option<f64>,
    #[serde(default)]
    pub extended_memory_available: Option<String>,
    #[serde(default)]
    pub resolution_height: Option<f64>,
    #[serde(default)]
    pub resolution_width: Option<f64>,
}

impl PhoneRecord {
    /// Whether this phone was made by `brand`, ignoring case.
    ///
    /// Lowercases both sides the same way brand matching lowercases the
    /// query, so non-ASCII brand names agree between the two steps.
    pub fn is_brand(&self, brand: &str) -> bool {
        self.brand_name.to_lowercase() == brand.to_lowercase()
    }
}
