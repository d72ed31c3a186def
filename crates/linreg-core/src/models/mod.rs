//! Regression model implementations

mod inference;
mod predict;
mod simple;

pub use predict::predict;
pub use simple::{fit, MIN_OBSERVATIONS};
