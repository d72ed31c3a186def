//! Diagnostic functions for fitted regressions

mod residuals;

pub use residuals::{compute_residuals, ResidualsResult};
