//! Delimited text ingestion
//!
//! Reads CSV-like sources into a [`Table`]. Every field must parse as a finite
//! number; the first failing field is reported with its source line.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::errors::{StatsError, StatsResult};
use crate::table::Table;
use crate::types::ReadOptions;

/// Read a table from any reader
pub fn read_table<R: Read>(reader: R, options: &ReadOptions) -> StatsResult<Table> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(options.has_headers)
        .delimiter(options.delimiter)
        .trim(if options.trim { Trim::All } else { Trim::None })
        // Ragged rows are reported by Table with row context
        .flexible(true)
        .from_reader(reader);

    let headers = if options.has_headers {
        let names: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        Some(names)
    } else {
        None
    };

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        rows.push(parse_record(&record, rows.len())?);
    }

    if rows.is_empty() {
        return Err(StatsError::EmptyInput { field: "table" });
    }

    debug!(
        rows = rows.len(),
        width = rows[0].len(),
        has_headers = options.has_headers,
        "read table"
    );

    match headers {
        Some(names) => Table::with_headers(names, rows),
        None => Table::new(rows),
    }
}

/// Read a table from a file on disk
pub fn read_table_from_path<P: AsRef<Path>>(path: P, options: &ReadOptions) -> StatsResult<Table> {
    let file = File::open(path.as_ref())?;
    debug!(path = %path.as_ref().display(), "opened data file");
    read_table(file, options)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn parse_record(record: &StringRecord, row: usize) -> StatsResult<Vec<f64>> {
    let line = record.position().map_or(0, |pos| pos.line());
    record
        .iter()
        .enumerate()
        .map(|(column, field)| {
            let value: f64 = field.trim().parse().map_err(|_| StatsError::Parse {
                line,
                column,
                value: field.to_string(),
            })?;
            if !value.is_finite() {
                return Err(StatsError::InvalidValue { row, column, value });
            }
            Ok(value)
        })
        .collect()
}
