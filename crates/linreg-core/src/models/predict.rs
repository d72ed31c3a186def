//! Prediction from a fitted model
//!
//! Evaluates the fitted line at arbitrary x. Extrapolation outside the range of
//! the fitted data is allowed.

use crate::types::FitResult;

/// Predict y for a single x: `intercept + slope * x`
pub fn predict(fit: &FitResult, x: f64) -> f64 {
    fit.intercept + fit.slope * x
}

impl FitResult {
    /// Predict y for a single x
    pub fn predict(&self, x: f64) -> f64 {
        predict(self, x)
    }

    /// Predict y for each x, in order
    pub fn predict_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| predict(self, x)).collect()
    }

    /// Pearson correlation coefficient, carrying the sign of the slope
    pub fn correlation(&self) -> f64 {
        self.slope.signum() * self.r_squared.max(0.0).sqrt()
    }
}
