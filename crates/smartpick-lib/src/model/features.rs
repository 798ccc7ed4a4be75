//! Declared model input schema.
//!
//! Each feature knows its dataset column name and how to read itself from a
//! [`PhoneRecord`]. The schema is fixed at compile time and checked against
//! the dataset header once, when the catalog loads.

use serde::{Deserialize, Serialize};

use crate::catalog::PhoneRecord;

/// Numeric model inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericFeature {
    Price,
    RamCapacity,
    BatteryCapacity,
    InternalMemory,
    PrimaryCameraRear,
    PrimaryCameraFront,
    ProcessorSpeed,
    ScreenSize,
    RefreshRate,
    NumCores,
    ResolutionHeight,
    ResolutionWidth,
}

impl NumericFeature {
    pub const ALL: [Self; 12] = [
        Self::Price,
        Self::RamCapacity,
        Self::BatteryCapacity,
        Self::InternalMemory,
        Self::PrimaryCameraRear,
        Self::PrimaryCameraFront,
        Self::ProcessorSpeed,
        Self::ScreenSize,
        Self::RefreshRate,
        Self::NumCores,
        Self::ResolutionHeight,
        Self::ResolutionWidth,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::RamCapacity => "ram_capacity",
            Self::BatteryCapacity => "battery_capacity",
            Self::InternalMemory => "internal_memory",
            Self::PrimaryCameraRear => "primary_camera_rear",
            Self::PrimaryCameraFront => "primary_camera_front",
            Self::ProcessorSpeed => "processor_speed",
            Self::ScreenSize => "screen_size",
            Self::RefreshRate => "refresh_rate",
            Self::NumCores => "num_cores",
            Self::ResolutionHeight => "resolution_height",
            Self::ResolutionWidth => "resolution_width",
        }
    }

    pub fn value(self, record: &PhoneRecord) -> Option<f64> {
        match self {
            Self::Price => record.price,
            Self::RamCapacity => record.ram_capacity,
            Self::BatteryCapacity => record.battery_capacity,
            Self::InternalMemory => record.internal_memory,
            Self::PrimaryCameraRear => record.primary_camera_rear,
            Self::PrimaryCameraFront => record.primary_camera_front,
            Self::ProcessorSpeed => record.processor_speed,
            Self::ScreenSize => record.screen_size,
            Self::RefreshRate => record.refresh_rate,
            Self::NumCores => record.num_cores,
            Self::ResolutionHeight => record.resolution_height,
            Self::ResolutionWidth => record.resolution_width,
        }
        .filter(|v| v.is_finite())
    }
}

/// Categorical model inputs, one-hot encoded by the preprocessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalFeature {
    #[serde(rename = "5G_or_not")]
    FiveG,
    FastChargingAvailable,
    FastCharging,
    ExtendedMemoryAvailable,
    ProcessorBrand,
    Os,
}

impl CategoricalFeature {
    pub const ALL: [Self; 6] = [
        Self::FiveG,
        Self::FastChargingAvailable,
        Self::FastCharging,
        Self::ExtendedMemoryAvailable,
        Self::ProcessorBrand,
        Self::Os,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            Self::FiveG => "5G_or_not",
            Self::FastChargingAvailable => "fast_charging_available",
            Self::FastCharging => "fast_charging",
            Self::ExtendedMemoryAvailable => "extended_memory_available",
            Self::ProcessorBrand => "processor_brand",
            Self::Os => "os",
        }
    }

    /// Raw category label, or `None` when the cell is empty.
    pub fn value(self, record: &PhoneRecord) -> Option<&str> {
        let raw = match self {
            Self::FiveG => record.five_g.as_deref(),
            Self::FastChargingAvailable => record.fast_charging_available.as_deref(),
            Self::FastCharging => record.fast_charging.as_deref(),
            Self::ExtendedMemoryAvailable => record.extended_memory_available.as_deref(),
            Self::ProcessorBrand => record.processor_brand.as_deref(),
            Self::Os => record.os.as_deref(),
        };
        raw.map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Ordered set of features a model consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub numeric: Vec<NumericFeature>,
    pub categorical: Vec<CategoricalFeature>,
}

impl FeatureSchema {
    /// Every declared feature. Used by the rating regressor.
    pub fn regression() -> Self {
        Self {
            numeric: NumericFeature::ALL.to_vec(),
            categorical: CategoricalFeature::ALL.to_vec(),
        }
    }

    /// Every feature except price, which the price-bucket label derives from.
    pub fn price_bucket() -> Self {
        Self {
            numeric: NumericFeature::ALL
                .into_iter()
                .filter(|f| *f != NumericFeature::Price)
                .collect(),
            categorical: CategoricalFeature::ALL.to_vec(),
        }
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.numeric
            .iter()
            .map(|f| f.column())
            .chain(self.categorical.iter().map(|f| f.column()))
    }
}
