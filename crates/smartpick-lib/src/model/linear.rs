#![allow(clippy::cast_precision_loss)]

use anyhow::Context;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Singular values below this are treated as zero.
const SVD_EPSILON: f64 = 1e-10;

/// Ordinary least squares with an intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearRegressor {
    /// Fit on the rows of `x` against `y`.
    ///
    /// Inputs are centred so the intercept is not shrunk, then solved through
    /// the SVD. Rank-deficient designs (one-hot blocks, constant columns,
    /// fewer rows than features) get the minimum-norm solution.
    pub fn fit(x: &[Vec<f64>], y: &[f64]) -> anyhow::Result<Self> {
        anyhow::ensure!(!x.is_empty(), "Cannot fit a regressor on zero rows");
        anyhow::ensure!(
            x.len() == y.len(),
            "Feature rows ({}) and targets ({}) differ in length",
            x.len(),
            y.len()
        );
        let width = x[0].len();
        anyhow::ensure!(
            x.iter().all(|row| row.len() == width),
            "Feature rows have inconsistent widths"
        );

        let n = x.len() as f64;
        let x_mean: Vec<f64> = (0..width)
            .map(|j| x.iter().map(|row| row[j]).sum::<f64>() / n)
            .collect();
        let y_mean = y.iter().sum::<f64>() / n;

        let design = DMatrix::from_fn(x.len(), width, |i, j| x[i][j] - x_mean[j]);
        let target = DVector::from_iterator(y.len(), y.iter().map(|v| v - y_mean));

        let coefficients = design
            .svd(true, true)
            .solve(&target, SVD_EPSILON)
            .map_err(anyhow::Error::msg)
            .context("Least-squares solve failed")?;
        let coefficients: Vec<f64> = coefficients.iter().copied().collect();

        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(c, m)| c * m)
                .sum::<f64>();

        debug!(rows = x.len(), width, intercept, "Fitted linear regressor");
        Ok(Self {
            intercept,
            coefficients,
        })
    }

    pub fn predict(&self, x: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(c, v)| c * v)
                .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_linear_relation() {
        // y = 1.5 + 2a - 0.5b
        let x = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![2.0, 3.0],
            vec![-1.0, 4.0],
        ];
        let y: Vec<f64> = x.iter().map(|r| 1.5 + 2.0 * r[0] - 0.5 * r[1]).collect();

        let model = LinearRegressor::fit(&x, &y).unwrap();
        assert!((model.intercept - 1.5).abs() < 1e-9);
        assert!((model.coefficients[0] - 2.0).abs() < 1e-9);
        assert!((model.coefficients[1] + 0.5).abs() < 1e-9);
        assert!((model.predict(&[10.0, 2.0]) - 20.5).abs() < 1e-9);
    }

    #[test]
    fn collinear_columns_still_fit() {
        // Second column duplicates the first.
        let x = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]];
        let y = vec![2.0, 4.0, 6.0];

        let model = LinearRegressor::fit(&x, &y).unwrap();
        assert!((model.coefficients[0] - model.coefficients[1]).abs() < 1e-9);
        assert!((model.predict(&[4.0, 4.0]) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn single_row_predicts_its_target() {
        let model = LinearRegressor::fit(&[vec![3.0, 7.0]], &[4.2]).unwrap();
        assert!((model.predict(&[3.0, 7.0]) - 4.2).abs() < 1e-12);
        assert!((model.predict(&[100.0, -5.0]) - 4.2).abs() < 1e-12);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = LinearRegressor::fit(&[vec![1.0]], &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Feature rows (1) and targets (2) differ in length"
        );
    }

    #[test]
    fn rejects_empty_input() {
        let err = LinearRegressor::fit(&[], &[]).unwrap_err();
        assert_eq!(err.to_string(), "Cannot fit a regressor on zero rows");
    }
}
