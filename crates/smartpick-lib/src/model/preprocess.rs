#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

use super::features::{CategoricalFeature, FeatureSchema, NumericFeature};
use crate::catalog::PhoneRecord;
use crate::config::MISSING_CATEGORY;

/// Mean imputation followed by standard scaling for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericScaler {
    pub feature: NumericFeature,
    pub mean: f64,
    pub scale: f64,
}

impl NumericScaler {
    fn fit(feature: NumericFeature, rows: &[&PhoneRecord]) -> Self {
        let values: Vec<f64> = rows.iter().filter_map(|r| feature.value(r)).collect();
        if values.is_empty() {
            return Self {
                feature,
                mean: 0.0,
                scale: 1.0,
            };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        Self {
            feature,
            mean,
            // Constant columns would divide by zero.
            scale: if std > f64::EPSILON { std } else { 1.0 },
        }
    }

    fn transform(&self, record: &PhoneRecord) -> f64 {
        let value = self.feature.value(record).unwrap_or(self.mean);
        (value - self.mean) / self.scale
    }
}

/// One-hot encoding for one categorical column.
///
/// Categories are sorted. A category unseen during fitting encodes as an
/// all-zero block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotColumn {
    pub feature: CategoricalFeature,
    pub categories: Vec<String>,
}

impl OneHotColumn {
    fn fit(feature: CategoricalFeature, rows: &[&PhoneRecord]) -> Self {
        let mut categories: Vec<String> = rows
            .iter()
            .map(|r| feature.value(r).unwrap_or(MISSING_CATEGORY).to_string())
            .collect();
        categories.sort();
        categories.dedup();
        Self {
            feature,
            categories,
        }
    }

    fn write(&self, record: &PhoneRecord, out: &mut Vec<f64>) {
        let label = self.feature.value(record).unwrap_or(MISSING_CATEGORY);
        let hit = self
            .categories
            .binary_search_by(|c| c.as_str().cmp(label))
            .ok();
        out.extend((0..self.categories.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
    }
}

/// Turns a [`PhoneRecord`] into a dense feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    pub numeric: Vec<NumericScaler>,
    pub categorical: Vec<OneHotColumn>,
}

impl Preprocessor {
    /// Learn imputation means, scales and category vocabularies from `rows`.
    pub fn fit(schema: &FeatureSchema, rows: &[&PhoneRecord]) -> Self {
        Self {
            numeric: schema
                .numeric
                .iter()
                .map(|f| NumericScaler::fit(*f, rows))
                .collect(),
            categorical: schema
                .categorical
                .iter()
                .map(|f| OneHotColumn::fit(*f, rows))
                .collect(),
        }
    }

    /// Length of the vectors produced by [`Preprocessor::transform`].
    pub fn width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    pub fn transform(&self, record: &PhoneRecord) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.width());
        out.extend(self.numeric.iter().map(|s| s.transform(record)));
        for column in &self.categorical {
            column.write(record, &mut out);
        }
        out
    }

    pub fn transform_all(&self, rows: &[&PhoneRecord]) -> Vec<Vec<f64>> {
        rows.iter().map(|r| self.transform(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(price: Option<f64>, os: Option<&str>) -> PhoneRecord {
        PhoneRecord {
            price,
            os: os.map(str::to_string),
            ..PhoneRecord::default()
        }
    }

    fn price_and_os() -> FeatureSchema {
        FeatureSchema {
            numeric: vec![NumericFeature::Price],
            categorical: vec![CategoricalFeature::Os],
        }
    }

    #[test]
    fn scaler_uses_population_std() {
        let a = phone(Some(10.0), None);
        let b = phone(Some(30.0), None);
        let scaler = NumericScaler::fit(NumericFeature::Price, &[&a, &b]);
        assert!((scaler.mean - 20.0).abs() < 1e-12);
        assert!((scaler.scale - 10.0).abs() < 1e-12);
        assert!((scaler.transform(&b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_numeric_imputes_to_zero_after_scaling() {
        let a = phone(Some(10.0), None);
        let b = phone(Some(30.0), None);
        let scaler = NumericScaler::fit(NumericFeature::Price, &[&a, &b]);
        assert!(scaler.transform(&phone(None, None)).abs() < 1e-12);
    }

    #[test]
    fn constant_column_keeps_unit_scale() {
        let a = phone(Some(5.0), None);
        let scaler = NumericScaler::fit(NumericFeature::Price, &[&a, &a]);
        assert!((scaler.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn one_hot_sorted_with_missing_category() {
        let a = phone(Some(1.0), Some("ios"));
        let b = phone(Some(2.0), Some("android"));
        let c = phone(Some(3.0), None);
        let pre = Preprocessor::fit(&price_and_os(), &[&a, &b, &c]);

        assert_eq!(pre.categorical[0].categories, ["0", "android", "ios"]);
        assert_eq!(pre.width(), 4);

        let encoded = pre.transform(&a);
        assert_eq!(&encoded[1..], &[0.0, 0.0, 1.0]);
        let encoded = pre.transform(&c);
        assert_eq!(&encoded[1..], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn unknown_category_encodes_as_zeros() {
        let a = phone(Some(1.0), Some("ios"));
        let b = phone(Some(2.0), Some("android"));
        let pre = Preprocessor::fit(&price_and_os(), &[&a, &b]);

        let encoded = pre.transform(&phone(Some(1.5), Some("harmonyos")));
        assert_eq!(&encoded[1..], &[0.0, 0.0]);
    }
}
