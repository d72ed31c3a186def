//! Residual computation for a fitted simple regression

use serde::Serialize;

use crate::errors::{Degeneracy, StatsError, StatsResult};
use crate::table::Table;
use crate::types::{ColumnPair, FitResult};

/// Residuals and leverage, one entry per table row
#[derive(Debug, Clone, Serialize)]
pub struct ResidualsResult {
    /// Raw residuals: e = y - y_hat
    pub raw: Vec<f64>,
    /// Standardized residuals: e / s (raw when s = 0)
    pub standardized: Vec<f64>,
    /// Leverage values (hat diagonal)
    pub leverage: Vec<f64>,
    /// Studentized residuals: e / (s * sqrt(1 - h_ii))
    pub studentized: Vec<f64>,
}

/// Compute residuals of `fit` over the rows of `table`
///
/// For a single regressor the hat diagonal has the closed form
/// `h_ii = 1/n + (x_i - x̄)² / Σ (x - x̄)²`, so no matrix inversion is needed.
pub fn compute_residuals(
    table: &Table,
    columns: ColumnPair,
    fit: &FitResult,
) -> StatsResult<ResidualsResult> {
    let n = table.n_rows();
    if n == 0 {
        return Err(StatsError::EmptyInput { field: "table" });
    }

    let n_f = n as f64;
    let x_bar = table.pairs(columns)?.map(|(x, _)| x).sum::<f64>() / n_f;
    let sxx: f64 = table
        .pairs(columns)?
        .map(|(x, _)| (x - x_bar) * (x - x_bar))
        .sum();
    if sxx == 0.0 {
        return Err(StatsError::DegenerateInput(Degeneracy::ConstantX));
    }

    let raw: Vec<f64> = table
        .pairs(columns)?
        .map(|(x, y)| y - fit.predict(x))
        .collect();

    let s = fit.standard_error;
    let standardized = if s > 0.0 {
        raw.iter().map(|e| e / s).collect()
    } else {
        raw.clone()
    };

    let leverage: Vec<f64> = table
        .pairs(columns)?
        .map(|(x, _)| 1.0 / n_f + (x - x_bar) * (x - x_bar) / sxx)
        .collect();

    let studentized = raw
        .iter()
        .zip(&leverage)
        .map(|(e, h)| {
            if s > 0.0 {
                e / (s * (1.0 - h).max(1e-10).sqrt())
            } else {
                *e
            }
        })
        .collect();

    Ok(ResidualsResult {
        raw,
        standardized,
        leverage,
        studentized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fit;
    use crate::types::FitOptions;
    use approx::assert_abs_diff_eq;

    fn noisy() -> Table {
        Table::from_pairs(&[(1.0, 2.0), (2.0, 3.0), (3.0, 5.0), (4.0, 4.0), (5.0, 6.0)]).unwrap()
    }

    #[test]
    fn test_residuals_basic() {
        let table = noisy();
        let columns = ColumnPair::new(0, 1);
        let result = fit(&table, columns, &FitOptions::default()).unwrap();
        let residuals = compute_residuals(&table, columns, &result).unwrap();

        assert_eq!(residuals.raw.len(), 5);
        // y_hat = 1.3 + 0.9x → residuals -0.2, -0.1, 1.0, -0.9, 0.2
        let expected = [-0.2, -0.1, 1.0, -0.9, 0.2];
        for (r, e) in residuals.raw.iter().zip(expected) {
            assert_abs_diff_eq!(*r, e, epsilon = 1e-10);
        }
        assert_abs_diff_eq!(residuals.raw.iter().sum::<f64>(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_leverage_sums_to_parameter_count() {
        let table = noisy();
        let columns = ColumnPair::new(0, 1);
        let result = fit(&table, columns, &FitOptions::default()).unwrap();
        let residuals = compute_residuals(&table, columns, &result).unwrap();

        assert_abs_diff_eq!(residuals.leverage.iter().sum::<f64>(), 2.0, epsilon = 1e-12);
        // Endpoints carry the most leverage
        assert!(residuals.leverage[0] > residuals.leverage[2]);
        assert_abs_diff_eq!(residuals.leverage[2], 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_standardized_and_studentized() {
        let table = noisy();
        let columns = ColumnPair::new(0, 1);
        let result = fit(&table, columns, &FitOptions::default()).unwrap();
        let residuals = compute_residuals(&table, columns, &result).unwrap();

        let s = result.standard_error;
        assert_abs_diff_eq!(residuals.standardized[2], 1.0 / s, epsilon = 1e-10);
        assert_abs_diff_eq!(
            residuals.studentized[2],
            1.0 / (s * 0.8f64.sqrt()),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_residuals_perfect_fit() {
        let table = Table::from_pairs(&[(1.0, 3.0), (2.0, 5.0), (3.0, 7.0)]).unwrap();
        let columns = ColumnPair::new(0, 1);
        let result = fit(&table, columns, &FitOptions::default()).unwrap();
        let residuals = compute_residuals(&table, columns, &result).unwrap();

        assert!(residuals.raw.iter().all(|r| r.abs() < 1e-10));
        assert_eq!(residuals.standardized, residuals.raw);
    }

    #[test]
    fn test_residuals_invalid_column() {
        let table = noisy();
        let result = fit(&table, ColumnPair::new(0, 1), &FitOptions::default()).unwrap();
        assert!(matches!(
            compute_residuals(&table, ColumnPair::new(3, 1), &result),
            Err(StatsError::InvalidColumnIndex { index: 3, .. })
        ));
    }
}
