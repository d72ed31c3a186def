use serde::{Deserialize, Serialize};

/// Zero-based indices of the independent (x) and dependent (y) columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPair {
    pub x: usize,
    pub y: usize,
}

impl ColumnPair {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The same pair with x and y exchanged
    pub fn swapped(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

/// Result of a simple linear regression `y' = intercept + slope * x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Intercept (b0)
    pub intercept: f64,
    /// Slope (b1)
    pub slope: f64,
    /// Standard error of estimate, sqrt(RSS / (n - 2))
    pub standard_error: f64,
    /// R-squared (coefficient of determination)
    pub r_squared: f64,
    /// Adjusted R-squared
    pub adj_r_squared: f64,
    /// Number of observations used
    pub n_observations: usize,
    /// Inference statistics, only computed if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference: Option<FitInference>,
}

/// Significance statistics for one coefficient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientInference {
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
    pub p_value: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// Inference results for a simple regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitInference {
    pub intercept: CoefficientInference,
    pub slope: CoefficientInference,
    /// Confidence level used for the intervals (e.g., 0.95)
    pub confidence_level: f64,
    /// Residual degrees of freedom (n - 2)
    pub df: usize,
    /// F-statistic for overall model significance
    pub f_statistic: f64,
    /// p-value for the F-statistic
    pub f_pvalue: f64,
}

/// Options for fitting
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Reduce each pass over the rows in parallel
    pub parallel: bool,
    /// Tables shorter than this are always reduced sequentially
    pub min_parallel_rows: usize,
    /// Whether to compute inference statistics (std errors, p-values, etc.)
    pub compute_inference: bool,
    /// Confidence level for confidence intervals (default: 0.95)
    pub confidence_level: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            min_parallel_rows: 10_000,
            compute_inference: false,
            confidence_level: 0.95,
        }
    }
}

/// Options for reading delimited text into a table
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// First record holds column names
    pub has_headers: bool,
    /// Field delimiter
    pub delimiter: u8,
    /// Trim whitespace around fields
    pub trim: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
            trim: true,
        }
    }
}
