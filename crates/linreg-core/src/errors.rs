use std::fmt;

use thiserror::Error;

/// Which column of a fit carried no variance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// All x values are identical, so the slope is undefined
    ConstantX,
    /// All y values are identical, so R-squared is undefined
    ConstantY,
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degeneracy::ConstantX => write!(f, "x has zero variance, slope is undefined"),
            Degeneracy::ConstantY => write!(f, "y has zero variance, R-squared is undefined"),
        }
    }
}

/// Errors that can occur while loading tables or fitting a regression
#[derive(Error, Debug)]
pub enum StatsError {
    // Column selection errors
    #[error("Column index {index} is out of bounds for rows of width {width}")]
    InvalidColumnIndex { index: usize, width: usize },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    // Fit errors
    #[error("Insufficient data: {rows} rows (need at least {required})")]
    InsufficientData { rows: usize, required: usize },

    #[error("Degenerate input: {0}")]
    DegenerateInput(Degeneracy),

    // Numerical errors
    #[error("Numeric overflow while computing {stage}")]
    NumericOverflow { stage: &'static str },

    #[error("Numeric underflow while computing {stage}: values are too close to zero")]
    NumericUnderflow { stage: &'static str },

    #[error("Invalid confidence level: {0} (must be in (0, 1))")]
    InvalidConfidenceLevel(f64),

    // Table shape errors
    #[error("Empty input: {field} cannot be empty")]
    EmptyInput { field: &'static str },

    #[error("Ragged table: row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Dimension mismatch: expected {expected} columns, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Invalid value {value} at row {row}, column {column} (must be finite)")]
    InvalidValue { row: usize, column: usize, value: f64 },

    // Ingestion errors
    #[error("Line {line}, column {column}: cannot parse {value:?} as a number")]
    Parse {
        line: u64,
        column: usize,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Distribution error: {0}")]
    Distribution(String),
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;
