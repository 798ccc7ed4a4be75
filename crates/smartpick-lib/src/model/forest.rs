//! Price-bucket classifier.
//!
//! A bagged ensemble of `linfa-trees` decision trees over the preprocessed
//! feature vectors. Each tree sees a bootstrap sample of the training rows
//! and a random subset of √d feature columns. Training is deterministic for a
//! fixed seed.

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use std::fmt;
use std::path::Path;

use anyhow::Context;
use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::artifact::{ARTIFACT_VERSION, check_version, read_artifact, write_artifact};
use super::preprocess::Preprocessor;
use crate::catalog::PhoneRecord;

/// Coarse price segment derived from a phone's listed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBucket {
    Budget,
    Mid,
    Premium,
    Flagship,
}

impl PriceBucket {
    pub const ALL: [Self; 4] = [Self::Budget, Self::Mid, Self::Premium, Self::Flagship];

    /// `budget` < 15000 ≤ `mid` < 30000 ≤ `premium` < 50000 ≤ `flagship`.
    pub fn from_price(price: f64) -> Self {
        if price < 15_000.0 {
            Self::Budget
        } else if price < 30_000.0 {
            Self::Mid
        } else if price < 50_000.0 {
            Self::Premium
        } else {
            Self::Flagship
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Budget => 0,
            Self::Mid => 1,
            Self::Premium => 2,
            Self::Flagship => 3,
        }
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Budget => "budget",
            Self::Mid => "mid",
            Self::Premium => "premium",
            Self::Flagship => "flagship",
        };
        f.write_str(name)
    }
}

/// Forest hyper-parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub seed: u64,
}

/// One bagged tree and the feature columns it was trained on.
#[derive(Debug, Serialize, Deserialize)]
struct Member {
    features: Vec<usize>,
    tree: DecisionTree<f64, usize>,
}

/// Bagged Gini decision trees over class indices `0..classes`.
///
/// Every tree is fitted on a bootstrap sample of the rows and a random
/// subspace of √d feature columns.
#[derive(Debug, Serialize, Deserialize)]
pub struct RandomForest {
    classes: usize,
    members: Vec<Member>,
}

impl RandomForest {
    pub fn fit(
        x: &[Vec<f64>],
        y: &[usize],
        classes: usize,
        params: ForestParams,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(!x.is_empty(), "Cannot fit a forest on zero rows");
        anyhow::ensure!(x.len() == y.len(), "Feature rows and labels differ in length");
        anyhow::ensure!(
            x.iter().all(|row| row.len() == x[0].len()),
            "Feature rows have inconsistent widths"
        );
        anyhow::ensure!(
            y.iter().all(|&c| c < classes),
            "Label outside of 0..{classes}"
        );

        let dataset = Dataset::new(to_matrix(x), Array1::from(y.to_vec()));
        let width = dataset.nfeatures();
        let max_features = ((width as f64).sqrt().round() as usize).clamp(1, width.max(1));
        let tree_params = DecisionTree::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(Some(params.max_depth))
            .min_weight_split(params.min_samples_split as f32);

        let mut row_rng = StdRng::seed_from_u64(params.seed);
        let mut feature_rng = StdRng::seed_from_u64(params.seed.wrapping_add(1));
        let members = dataset
            .bootstrap_samples(dataset.nsamples(), &mut row_rng)
            .take(params.trees.max(1))
            .map(|bag| {
                let mut features = sample(&mut feature_rng, width, max_features).into_vec();
                features.sort_unstable();
                let subset = Dataset::new(
                    bag.records().select(Axis(1), &features),
                    bag.targets().to_owned(),
                );
                let tree = tree_params
                    .fit(&subset)
                    .context("Failed to fit decision tree")?;
                Ok(Member { features, tree })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        debug!(
            trees = members.len(),
            rows = x.len(),
            width,
            max_features,
            "Fitted random forest"
        );
        Ok(Self { classes, members })
    }

    /// Majority vote across trees; ties go to the lowest class index.
    pub fn predict(&self, x: &[f64]) -> usize {
        let row = Array1::from(x.to_vec()).insert_axis(Axis(0));
        let mut votes = vec![0; self.classes];
        for member in &self.members {
            let predicted = member.tree.predict(&row.select(Axis(1), &member.features));
            if let Some(&class) = predicted.get(0) {
                if let Some(count) = votes.get_mut(class) {
                    *count += 1;
                }
            }
        }
        majority(&votes)
    }
}

fn to_matrix(rows: &[Vec<f64>]) -> Array2<f64> {
    let width = rows.first().map_or(0, Vec::len);
    Array2::from_shape_fn((rows.len(), width), |(i, j)| rows[i][j])
}

/// Index of the largest count; ties go to the lowest index.
fn majority(counts: &[usize]) -> usize {
    let mut best = 0;
    for (i, &c) in counts.iter().enumerate() {
        if c > counts[best] {
            best = i;
        }
    }
    best
}

/// Fitted price-bucket pipeline with its held-out accuracy.
#[derive(Debug, Serialize, Deserialize)]
pub struct PriceBucketModel {
    pub version: u32,
    pub preprocessor: Preprocessor,
    pub forest: RandomForest,
    pub train_rows: usize,
    pub test_rows: usize,
    pub accuracy: f64,
}

impl PriceBucketModel {
    pub fn predict(&self, record: &PhoneRecord) -> PriceBucket {
        let class = self.forest.predict(&self.preprocessor.transform(record));
        PriceBucket::ALL[class]
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        write_artifact(self, path)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let model: Self = read_artifact(path)?;
        check_version(model.version, path)?;
        info!(path = %path.display(), accuracy = model.accuracy, "Price-bucket model loaded");
        Ok(model)
    }

    pub(crate) fn label(bucket: PriceBucket) -> usize {
        bucket.index()
    }

    pub(crate) fn new(
        preprocessor: Preprocessor,
        forest: RandomForest,
        train_rows: usize,
        test_rows: usize,
        accuracy: f64,
    ) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            preprocessor,
            forest,
            train_rows,
            test_rows,
            accuracy,
        }
    }
}
