#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::info;

use super::artifact::{ARTIFACT_VERSION, TrainedModel};
use super::features::FeatureSchema;
use super::forest::{ForestParams, PriceBucket, PriceBucketModel, RandomForest};
use super::linear::LinearRegressor;
use super::metrics::{RegressionReport, accuracy};
use super::preprocess::Preprocessor;
use crate::catalog::{Catalog, PhoneRecord};
use crate::config::{
    FOREST_MAX_DEPTH, FOREST_MIN_SAMPLES_SPLIT, FOREST_TREES, RANDOM_SEED, TEST_FRACTION,
};

/// Shuffle `0..n` with `seed` and hold out `ceil(n * test_fraction)` indices.
///
/// Returns `(train, test)`. At least one row stays on each side when `n >= 2`.
pub fn split_indices(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));

    let test_len = ((n as f64) * test_fraction).ceil() as usize;
    let test_len = test_len.clamp(usize::from(n >= 2), n.saturating_sub(1));
    let test = indices.split_off(n - test_len);
    (indices, test)
}

/// Fit the rating regressor on every catalog row that has a rating.
///
/// Rows are split 80/20 with a fixed seed; the preprocessor is fitted on the
/// training split only and the report is computed on the held-out split.
pub fn train_regressor(catalog: &Catalog) -> anyhow::Result<TrainedModel> {
    let rows: Vec<(&PhoneRecord, f64)> = catalog
        .records()
        .iter()
        .filter_map(|r| r.avg_rating.filter(|v| v.is_finite()).map(|y| (r, y)))
        .collect();
    anyhow::ensure!(
        rows.len() >= 2,
        "Need at least 2 rated phones to train, found {}",
        rows.len()
    );

    let (train_idx, test_idx) = split_indices(rows.len(), TEST_FRACTION, RANDOM_SEED);
    let (train, y_train) = pick(&rows, &train_idx);
    let (test, y_test) = pick(&rows, &test_idx);

    let preprocessor = Preprocessor::fit(&FeatureSchema::regression(), &train);
    let regressor = LinearRegressor::fit(&preprocessor.transform_all(&train), &y_train)?;

    let predicted: Vec<f64> = preprocessor
        .transform_all(&test)
        .iter()
        .map(|x| regressor.predict(x))
        .collect();
    let report = RegressionReport::evaluate(train.len(), &y_test, &predicted)?;
    info!(
        train_rows = report.train_rows,
        test_rows = report.test_rows,
        width = preprocessor.width(),
        r2 = report.r2,
        mae = report.mae,
        rmse = report.rmse,
        "Rating regressor trained"
    );

    Ok(TrainedModel {
        version: ARTIFACT_VERSION,
        preprocessor,
        regressor,
        report,
    })
}

/// Fit the price-bucket forest on every catalog row that has a price.
pub fn train_price_buckets(catalog: &Catalog) -> anyhow::Result<PriceBucketModel> {
    let rows: Vec<(&PhoneRecord, usize)> = catalog
        .records()
        .iter()
        .filter_map(|r| {
            r.price
                .filter(|p| p.is_finite())
                .map(|p| (r, PriceBucketModel::label(PriceBucket::from_price(p))))
        })
        .collect();
    anyhow::ensure!(
        rows.len() >= 2,
        "Need at least 2 priced phones to train, found {}",
        rows.len()
    );

    let (train_idx, test_idx) = split_indices(rows.len(), TEST_FRACTION, RANDOM_SEED);
    let (train, y_train) = pick(&rows, &train_idx);
    let (test, y_test) = pick(&rows, &test_idx);

    let preprocessor = Preprocessor::fit(&FeatureSchema::price_bucket(), &train);
    let params = ForestParams {
        trees: FOREST_TREES,
        max_depth: FOREST_MAX_DEPTH,
        min_samples_split: FOREST_MIN_SAMPLES_SPLIT,
        seed: RANDOM_SEED,
    };
    let forest = RandomForest::fit(
        &preprocessor.transform_all(&train),
        &y_train,
        PriceBucket::ALL.len(),
        params,
    )?;

    let predicted: Vec<usize> = preprocessor
        .transform_all(&test)
        .iter()
        .map(|x| forest.predict(x))
        .collect();
    let accuracy = accuracy(&y_test, &predicted)?;
    info!(
        train_rows = train.len(),
        test_rows = test.len(),
        accuracy,
        "Price-bucket forest trained"
    );

    Ok(PriceBucketModel::new(
        preprocessor,
        forest,
        train.len(),
        test.len(),
        accuracy,
    ))
}

fn pick<'a, T: Copy>(rows: &[(&'a PhoneRecord, T)], indices: &[usize]) -> (Vec<&'a PhoneRecord>, Vec<T>) {
    indices.iter().map(|&i| rows[i]).unzip()
}

#[cfg(test)]
mod tests {
    use smartpick_test_util::dataset::{PhoneRow, mixed_catalog, to_csv};

    use super::*;
    use crate::pipeline::recommend::Scorer;

    fn catalog(rows: &[PhoneRow]) -> Catalog {
        Catalog::from_reader(to_csv(rows).as_bytes()).unwrap()
    }

    #[test]
    fn split_holds_out_ceil_fraction() {
        let (train, test) = split_indices(10, 0.2, 42);
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);

        let (train, test) = split_indices(11, 0.2, 42);
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 3);
    }

    #[test]
    fn split_is_a_seeded_permutation() {
        let (train, test) = split_indices(25, 0.2, 42);
        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..25).collect::<Vec<_>>());

        assert_eq!(split_indices(25, 0.2, 42), (train, test));
        assert_ne!(split_indices(25, 0.2, 42), split_indices(25, 0.2, 43));
    }

    #[test]
    fn split_keeps_both_sides_non_empty() {
        let (train, test) = split_indices(2, 0.2, 42);
        assert_eq!((train.len(), test.len()), (1, 1));

        let (train, test) = split_indices(1, 0.2, 42);
        assert_eq!((train.len(), test.len()), (1, 0));
    }

    #[test]
    fn regressor_trains_on_rated_rows() {
        let mut rows = mixed_catalog();
        rows.push(PhoneRow::new("nokia", "G42", 11999, 0.0).without_rating());
        let model = train_regressor(&catalog(&rows)).unwrap();

        assert_eq!(model.report.train_rows + model.report.test_rows, 10);
        assert_eq!(model.report.test_rows, 2);
        assert_eq!(model.preprocessor.numeric.len(), 12);
        assert_eq!(model.regressor.coefficients.len(), model.preprocessor.width());
        assert!(model.report.rmse.is_finite());
    }

    #[test]
    fn regressor_training_is_deterministic() {
        let catalog = catalog(&mixed_catalog());
        let a = train_regressor(&catalog).unwrap();
        let b = train_regressor(&catalog).unwrap();
        assert_eq!(a, b);

        let phone = &catalog.records()[0];
        assert!((a.score(phone) - b.score(phone)).abs() < f64::EPSILON);
    }

    #[test]
    fn regressor_needs_two_rated_rows() {
        let rows = vec![PhoneRow::new("samsung", "Galaxy M34", 12000, 4.2)];
        let err = train_regressor(&catalog(&rows)).unwrap_err();
        assert_eq!(err.to_string(), "Need at least 2 rated phones to train, found 1");
    }

    #[test]
    fn price_buckets_train_and_predict_known_bucket() {
        let model = train_price_buckets(&catalog(&mixed_catalog())).unwrap();
        assert_eq!(model.train_rows, 8);
        assert_eq!(model.test_rows, 2);
        assert!((0.0..=1.0).contains(&model.accuracy));

        let prediction = model.predict(&catalog(&mixed_catalog()).records()[0]);
        assert!(PriceBucket::ALL.contains(&prediction));
    }

    #[test]
    fn price_buckets_skip_unpriced_rows() {
        let rows = vec![
            PhoneRow::new("samsung", "Galaxy M34", 12000, 4.2),
            PhoneRow::new("nokia", "G42", 0, 4.0).without_price(),
        ];
        let err = train_price_buckets(&catalog(&rows)).unwrap_err();
        assert_eq!(err.to_string(), "Need at least 2 priced phones to train, found 1");
    }
}
