//! Rectangular numeric table
//!
//! Every constructor enforces that all rows have the same width and that all
//! values are finite, so the regression engine can index rows without checks.

use crate::errors::{StatsError, StatsResult};
use crate::types::ColumnPair;

/// Ordered rows of finite `f64` values, all of the same width
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    headers: Option<Vec<String>>,
    rows: Vec<Vec<f64>>,
    width: usize,
}

impl Table {
    /// Build a table without column names
    pub fn new(rows: Vec<Vec<f64>>) -> StatsResult<Self> {
        let width = rows.first().map_or(0, Vec::len);
        validate_rows(&rows, width)?;
        Ok(Self {
            headers: None,
            rows,
            width,
        })
    }

    /// Build a table with column names; the name count fixes the width
    pub fn with_headers(headers: Vec<String>, rows: Vec<Vec<f64>>) -> StatsResult<Self> {
        let width = headers.len();
        if let Some(first) = rows.first() {
            if first.len() != width {
                return Err(StatsError::DimensionMismatch {
                    expected: width,
                    found: first.len(),
                });
            }
        }
        validate_rows(&rows, width)?;
        Ok(Self {
            headers: Some(headers),
            rows,
            width,
        })
    }

    /// Build a table from (x, y) pairs, x in column 0 and y in column 1
    pub fn from_pairs(pairs: &[(f64, f64)]) -> StatsResult<Self> {
        Self::new(pairs.iter().map(|&(x, y)| vec![x, y]).collect())
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of values per row (0 for an empty table without headers)
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check both indices against the row width
    pub fn validate_columns(&self, columns: ColumnPair) -> StatsResult<()> {
        for index in [columns.x, columns.y] {
            if index >= self.width {
                return Err(StatsError::InvalidColumnIndex {
                    index,
                    width: self.width,
                });
            }
        }
        Ok(())
    }

    /// Resolve a column given either as a zero-based index or a header name
    pub fn resolve_column(&self, selector: &str) -> StatsResult<usize> {
        let selector = selector.trim();
        if let Ok(index) = selector.parse::<usize>() {
            if index >= self.width {
                return Err(StatsError::InvalidColumnIndex {
                    index,
                    width: self.width,
                });
            }
            return Ok(index);
        }
        self.headers
            .as_ref()
            .and_then(|names| names.iter().position(|name| name == selector))
            .ok_or_else(|| StatsError::UnknownColumn(selector.to_string()))
    }

    /// Iterate the (x, y) pairs selected by `columns`, in row order
    pub fn pairs(
        &self,
        columns: ColumnPair,
    ) -> StatsResult<impl Iterator<Item = (f64, f64)> + '_> {
        self.validate_columns(columns)?;
        Ok(self
            .rows
            .iter()
            .map(move |row| (row[columns.x], row[columns.y])))
    }

    /// Values of one column, in row order
    pub fn column(&self, index: usize) -> StatsResult<Vec<f64>> {
        if index >= self.width {
            return Err(StatsError::InvalidColumnIndex {
                index,
                width: self.width,
            });
        }
        Ok(self.rows.iter().map(|row| row[index]).collect())
    }
}

fn validate_rows(rows: &[Vec<f64>], width: usize) -> StatsResult<()> {
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(StatsError::RaggedRow {
                row: i,
                expected: width,
                found: row.len(),
            });
        }
        if let Some((j, &value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(StatsError::InvalidValue {
                row: i,
                column: j,
                value,
            });
        }
    }
    Ok(())
}
