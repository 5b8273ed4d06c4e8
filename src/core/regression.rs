//! Ordinary least squares with an intercept.
//!
//! Columns and target are centred, the centred problem is solved with an SVD
//! and the intercept is recovered from the means. The SVD solve gives the
//! minimum-norm solution, so a full one-hot block (collinear with the
//! intercept) and data with fewer rows than features both fit.

use crate::utils::error::{PredictorError, Result};
use nalgebra::{DMatrix, DVector};

/// Singular values below this fraction of the largest one count as zero.
const RELATIVE_CUTOFF: f64 = 1e-12;

#[derive(Debug, Clone, Default)]
pub struct LinearRegression;

#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: DVector<f64>,
}

fn fit_error(reason: impl Into<String>) -> PredictorError {
    PredictorError::FitError {
        reason: reason.into(),
    }
}

impl LinearRegression {
    pub fn new() -> Self {
        Self
    }

    pub fn fit(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<LinearModel> {
        let (n, p) = x.shape();
        if n == 0 || p == 0 {
            return Err(fit_error(format!("empty design matrix ({}x{})", n, p)));
        }
        if y.len() != n {
            return Err(fit_error(format!(
                "feature rows ({}) and targets ({}) differ",
                n,
                y.len()
            )));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(fit_error("input contains non-finite values"));
        }

        let x_mean = x.row_mean();
        let y_mean = y.mean();

        let centred = DMatrix::from_fn(n, p, |i, j| x[(i, j)] - x_mean[j]);
        let y_centred = y.add_scalar(-y_mean);

        let svd = centred.svd(true, true);
        let largest = svd.singular_values.max();
        let tolerance = largest * (n.max(p) as f64 * f64::EPSILON).max(RELATIVE_CUTOFF);

        let coefficients = svd.solve(&y_centred, tolerance).map_err(fit_error)?;
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(fit_error("solver produced non-finite coefficients"));
        }

        let intercept = y_mean - (&x_mean * &coefficients)[(0, 0)];
        if !intercept.is_finite() {
            return Err(fit_error("solver produced a non-finite intercept"));
        }

        tracing::debug!(
            rows = n,
            features = p,
            rank = svd.rank(tolerance),
            intercept,
            "fitted linear regression"
        );

        Ok(LinearModel {
            intercept,
            coefficients,
        })
    }
}

impl LinearModel {
    pub fn predict_row(&self, row: &DVector<f64>) -> f64 {
        self.intercept + self.coefficients.dot(row)
    }

    pub fn predict(&self, x: &DMatrix<f64>) -> DVector<f64> {
        (x * &self.coefficients).add_scalar(self.intercept)
    }

    /// Coefficient of determination on the given data.
    pub fn r_squared(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> f64 {
        let predicted = self.predict(x);
        let y_mean = y.mean();
        let residual: f64 = (y - predicted).iter().map(|r| r * r).sum();
        let total: f64 = y.iter().map(|v| (v - y_mean).powi(2)).sum();
        if total == 0.0 {
            if residual == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - residual / total
        }
    }
}
