//! linreg-core: simple linear regression engine
//!
//! Fits `y = b0 + b1 * x` between two columns of a rectangular numeric table by
//! closed-form least squares, reporting the standard error of estimate and
//! R-squared. Tables are built in memory or read from delimited text.

pub mod diagnostics;
pub mod errors;
pub mod ingest;
pub mod models;
pub mod table;
pub mod types;

pub use errors::{Degeneracy, StatsError, StatsResult};
pub use ingest::{read_table, read_table_from_path};
pub use models::{fit, predict};
pub use table::Table;
pub use types::*;
