//! Coefficient inference for simple regression
//!
//! t-tests and confidence intervals for slope and intercept, plus the overall
//! F-test, all with n - 2 residual degrees of freedom.

use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use super::simple::Spread;
use crate::errors::{StatsError, StatsResult};
use crate::types::{CoefficientInference, FitInference};

pub(crate) fn compute_inference(
    intercept: f64,
    slope: f64,
    standard_error: f64,
    spread: &Spread,
    n_obs: usize,
    confidence_level: f64,
) -> StatsResult<FitInference> {
    let df = n_obs - 2;
    let df_f = df as f64;
    let n = n_obs as f64;

    let t_dist = StudentsT::new(0.0, 1.0, df_f)
        .map_err(|e| StatsError::Distribution(e.to_string()))?;
    let t_crit = t_dist.inverse_cdf(1.0 - (1.0 - confidence_level) / 2.0);

    let slope_se = standard_error / spread.sxx.sqrt();
    let intercept_se =
        standard_error * (1.0 / n + spread.x_bar * spread.x_bar / spread.sxx).sqrt();

    let slope_inf = coefficient(slope, slope_se, &t_dist, t_crit);
    let intercept_inf = coefficient(intercept, intercept_se, &t_dist, t_crit);

    // F = ESS / (RSS / df); with a single regressor F = t²
    let residual_variance = standard_error * standard_error;
    let (f_statistic, f_pvalue) = if residual_variance > 0.0 {
        let f = spread.ess / residual_variance;
        let f_dist = FisherSnedecor::new(1.0, df_f)
            .map_err(|e| StatsError::Distribution(e.to_string()))?;
        (f, (1.0 - f_dist.cdf(f)).clamp(0.0, 1.0))
    } else {
        (f64::INFINITY, 0.0)
    };

    Ok(FitInference {
        intercept: intercept_inf,
        slope: slope_inf,
        confidence_level,
        df,
        f_statistic,
        f_pvalue,
    })
}

fn coefficient(
    estimate: f64,
    std_error: f64,
    t_dist: &StudentsT,
    t_crit: f64,
) -> CoefficientInference {
    let (t_value, p_value) = if std_error > 0.0 {
        let t = estimate / std_error;
        (t, (2.0 * (1.0 - t_dist.cdf(t.abs()))).clamp(0.0, 1.0))
    } else if estimate == 0.0 {
        // Perfect fit through zero: no evidence against the null
        (0.0, 1.0)
    } else {
        (estimate.signum() * f64::INFINITY, 0.0)
    };

    CoefficientInference {
        estimate,
        std_error,
        t_value,
        p_value,
        ci_lower: estimate - t_crit * std_error,
        ci_upper: estimate + t_crit * std_error,
    }
}

#[cfg(test)]
mod tests {
    use crate::models::fit;
    use crate::table::Table;
    use crate::types::{ColumnPair, FitOptions};
    use approx::assert_abs_diff_eq;

    fn options() -> FitOptions {
        FitOptions {
            compute_inference: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_inference_noisy() {
        let table = Table::from_pairs(&[
            (1.0, 2.1),
            (2.0, 4.0),
            (3.0, 5.9),
            (4.0, 8.1),
            (5.0, 10.0),
            (6.0, 11.9),
            (7.0, 14.1),
            (8.0, 16.0),
            (9.0, 17.9),
            (10.0, 20.1),
        ])
        .unwrap();

        let result = fit(&table, ColumnPair::new(0, 1), &options()).unwrap();
        let inference = result.inference.unwrap();

        assert_eq!(inference.df, 8);
        assert!(inference.slope.p_value < 0.05);
        assert!(inference.slope.ci_lower < result.slope && result.slope < inference.slope.ci_upper);
        assert!(inference.intercept.std_error > inference.slope.std_error);

        // F = t² in simple regression, and the p-values agree
        assert_abs_diff_eq!(
            inference.f_statistic,
            inference.slope.t_value * inference.slope.t_value,
            epsilon = 1e-6 * inference.f_statistic
        );
        assert_abs_diff_eq!(inference.f_pvalue, inference.slope.p_value, epsilon = 1e-8);
    }

    #[test]
    fn test_inference_textbook_values() {
        let table =
            Table::from_pairs(&[(1.0, 2.0), (2.0, 3.0), (3.0, 5.0), (4.0, 4.0), (5.0, 6.0)])
                .unwrap();
        let result = fit(&table, ColumnPair::new(0, 1), &options()).unwrap();
        let inference = result.inference.unwrap();

        // s = sqrt(1.9 / 3), se(b1) = s / sqrt(10)
        let s = (1.9f64 / 3.0).sqrt();
        assert_abs_diff_eq!(inference.slope.std_error, s / 10f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            inference.intercept.std_error,
            s * (0.2f64 + 0.9).sqrt(),
            epsilon = 1e-12
        );
        // t(3) two-sided p for t = 3.576 is about 0.037
        assert!(inference.slope.p_value > 0.03 && inference.slope.p_value < 0.045);
    }

    #[test]
    fn test_inference_perfect_fit() {
        let table = Table::from_pairs(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0), (4.0, 8.0)]).unwrap();
        let result = fit(&table, ColumnPair::new(0, 1), &options()).unwrap();
        let inference = result.inference.unwrap();

        assert_eq!(inference.slope.std_error, 0.0);
        assert_eq!(inference.slope.p_value, 0.0);
        assert!(inference.slope.t_value.is_infinite());
        assert!(inference.f_statistic.is_infinite());
        assert_eq!(inference.f_pvalue, 0.0);
    }
}
