//! Simple linear regression by closed-form least squares
//!
//! The fit makes three passes over the rows: sums for the means, centered
//! cross-products for the slope and total variance, then residual and
//! explained sums of squares. Each pass is an independent reduction, run
//! sequentially or with rayon.

use rayon::prelude::*;
use tracing::debug;

use super::inference::compute_inference;
use crate::errors::{Degeneracy, StatsError, StatsResult};
use crate::table::Table;
use crate::types::{ColumnPair, FitOptions, FitResult};

/// Fewest rows for which the standard error of estimate is defined
pub const MIN_OBSERVATIONS: usize = 3;

/// Sums the inference step needs beyond the coefficients
#[derive(Debug, Clone, Copy)]
pub(crate) struct Spread {
    pub x_bar: f64,
    /// Σ (x - x̄)²
    pub sxx: f64,
    /// Σ (y' - ȳ)²
    pub ess: f64,
}

/// Fit `y = intercept + slope * x` on the selected columns
///
/// # Arguments
/// * `table` - Rectangular numeric table
/// * `columns` - Indices of the x and y columns (may be equal)
/// * `options` - Fitting options
///
/// # Returns
/// * `FitResult` with intercept, slope, standard error of estimate and R-squared
///
/// # Errors
/// * `InvalidColumnIndex` if either column is outside the row width
/// * `InsufficientData` for fewer than 3 rows
/// * `DegenerateInput` if x or y is constant
/// * `NumericOverflow` if a sum or statistic leaves the finite `f64` range
/// * `NumericUnderflow` if x or y varies, but its squared deviations all
///   round to zero
pub fn fit(table: &Table, columns: ColumnPair, options: &FitOptions) -> StatsResult<FitResult> {
    table.validate_columns(columns)?;

    if !(options.confidence_level > 0.0 && options.confidence_level < 1.0) {
        return Err(StatsError::InvalidConfidenceLevel(options.confidence_level));
    }

    let n_obs = table.n_rows();
    if n_obs < MIN_OBSERVATIONS {
        return Err(StatsError::InsufficientData {
            rows: n_obs,
            required: MIN_OBSERVATIONS,
        });
    }

    let rows = table.rows();
    if is_constant(rows, columns.x) {
        return Err(StatsError::DegenerateInput(Degeneracy::ConstantX));
    }
    if is_constant(rows, columns.y) {
        return Err(StatsError::DegenerateInput(Degeneracy::ConstantY));
    }

    let parallel = options.parallel && n_obs >= options.min_parallel_rows;
    let (x, y) = (columns.x, columns.y);
    let n = n_obs as f64;

    // Pass 1: means
    let [sum_x, sum_y] = accumulate(rows, parallel, |row| [row[x], row[y]]);
    ensure_finite("means", &[sum_x, sum_y])?;
    let x_bar = sum_x / n;
    let y_bar = sum_y / n;

    // Pass 2: centered sums
    let [sxx, sxy, syy] = accumulate(rows, parallel, |row| {
        let dx = row[x] - x_bar;
        let dy = row[y] - y_bar;
        [dx * dx, dx * dy, dy * dy]
    });
    ensure_finite("centered sums", &[sxx, sxy, syy])?;
    // Both columns vary, so a zero sum of squares can only be underflow
    if sxx == 0.0 || syy == 0.0 {
        return Err(StatsError::NumericUnderflow {
            stage: "centered sums",
        });
    }

    let slope = sxy / sxx;
    let intercept = y_bar - slope * x_bar;
    ensure_finite("coefficients", &[slope, intercept])?;

    // Pass 3: residual and explained sums of squares
    let [rss, ess] = accumulate(rows, parallel, |row| {
        let y_prime = intercept + slope * row[x];
        let residual = y_prime - row[y];
        let explained = y_prime - y_bar;
        [residual * residual, explained * explained]
    });
    ensure_finite("residual sums", &[rss, ess])?;

    let df = n_obs - 2;
    let r_squared = ess / syy;
    let standard_error = (rss / df as f64).sqrt();
    let adj_r_squared = 1.0 - (1.0 - r_squared) * (n - 1.0) / df as f64;
    ensure_finite("fit statistics", &[standard_error, r_squared, adj_r_squared])?;

    debug!(
        n_obs,
        parallel, intercept, slope, standard_error, r_squared, "fitted simple regression"
    );

    let inference = if options.compute_inference {
        let spread = Spread { x_bar, sxx, ess };
        Some(compute_inference(
            intercept,
            slope,
            standard_error,
            &spread,
            n_obs,
            options.confidence_level,
        )?)
    } else {
        None
    };

    Ok(FitResult {
        intercept,
        slope,
        standard_error,
        r_squared,
        adj_r_squared,
        n_observations: n_obs,
        inference,
    })
}

/// True if every row holds the same value in `column`
fn is_constant(rows: &[Vec<f64>], column: usize) -> bool {
    match rows.first() {
        Some(first) => rows.iter().all(|row| row[column] == first[column]),
        None => true,
    }
}

fn ensure_finite(stage: &'static str, values: &[f64]) -> StatsResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(StatsError::NumericOverflow { stage })
    }
}

/// Sum per-row terms over all rows
fn accumulate<const N: usize, F>(rows: &[Vec<f64>], parallel: bool, term: F) -> [f64; N]
where
    F: Fn(&[f64]) -> [f64; N] + Sync + Send,
{
    if parallel {
        rows.par_iter()
            .map(|row| term(row.as_slice()))
            .reduce(|| [0.0; N], add_terms)
    } else {
        rows.iter()
            .map(|row| term(row.as_slice()))
            .fold([0.0; N], add_terms)
    }
}

fn add_terms<const N: usize>(mut acc: [f64; N], terms: [f64; N]) -> [f64; N] {
    for (a, t) in acc.iter_mut().zip(terms) {
        *a += t;
    }
    acc
}
