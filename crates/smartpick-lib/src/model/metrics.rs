use std::fmt;

use linfa::prelude::*;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Held-out evaluation of the rating regressor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    pub train_rows: usize,
    pub test_rows: usize,
    pub r2: f64,
    pub mae: f64,
    pub rmse: f64,
}

impl RegressionReport {
    /// Score `predicted` against `actual`. Fails when either is empty or the
    /// lengths differ.
    pub fn evaluate(train_rows: usize, actual: &[f64], predicted: &[f64]) -> anyhow::Result<Self> {
        let truth = ArrayView1::from(actual);
        let guess = ArrayView1::from(predicted);
        Ok(Self {
            train_rows,
            test_rows: actual.len(),
            r2: r2_score(truth, guess)?,
            mae: guess.mean_absolute_error(&truth)?,
            rmse: guess.mean_squared_error(&truth)?.sqrt(),
        })
    }
}

impl fmt::Display for RegressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "train={} test={} r2={:.4} mae={:.4} rmse={:.4}",
            self.train_rows, self.test_rows, self.r2, self.mae, self.rmse
        )
    }
}

/// Coefficient of determination.
///
/// A constant target gives 1.0 for a perfect fit and 0.0 otherwise instead
/// of dividing by zero.
fn r2_score(truth: ArrayView1<'_, f64>, guess: ArrayView1<'_, f64>) -> anyhow::Result<f64> {
    if truth.len() < 2 || truth.var(0.0) <= f64::EPSILON {
        let mse = guess.mean_squared_error(&truth)?;
        return Ok(if mse <= f64::EPSILON { 1.0 } else { 0.0 });
    }
    Ok(guess.r2(&truth)?)
}

/// Fraction of class labels predicted exactly.
pub fn accuracy(actual: &[usize], predicted: &[usize]) -> anyhow::Result<f64> {
    let matrix = ArrayView1::from(predicted).confusion_matrix(ArrayView1::from(actual))?;
    Ok(f64::from(matrix.accuracy()))
}
