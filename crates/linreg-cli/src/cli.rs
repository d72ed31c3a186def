use std::path::PathBuf;

use clap::Parser;
use linreg_core::{FitOptions, ReadOptions};

#[derive(Parser, Debug, Clone)]
#[command(name = "linreg")]
#[command(about = "Least-squares linear regression between two CSV columns", long_about = None)]
pub struct Args {
    /// Dataset CSV file (prompted for when omitted)
    pub file: Option<PathBuf>,

    /// Column holding the independent variable x (index from 0, or header name)
    #[arg(short = 'x', long = "x-column")]
    pub x_column: Option<String>,

    /// Column holding the dependent variable y (index from 0, or header name)
    #[arg(short = 'y', long = "y-column")]
    pub y_column: Option<String>,

    /// The first line of the file holds column names
    #[arg(long, conflicts_with = "no_headers")]
    pub headers: bool,

    /// The file has no header line
    #[arg(long)]
    pub no_headers: bool,

    /// Field delimiter
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Reduce the fit passes in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Report standard errors, t-tests and confidence intervals
    #[arg(long)]
    pub inference: bool,

    /// Confidence level for intervals
    #[arg(long, default_value = "0.95")]
    pub confidence_level: f64,

    /// Print the fitted model as JSON
    #[arg(long)]
    pub json: bool,

    /// Predict y at these x values instead of prompting
    #[arg(long, num_args = 1.., allow_negative_numbers = true)]
    pub predict: Vec<f64>,

    /// Log level (overridden by RUST_LOG)
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Header choice from flags, if one was given
    pub fn has_headers(&self) -> Option<bool> {
        match (self.headers, self.no_headers) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// True when nothing needs to be prompted for
    pub fn is_batch(&self) -> bool {
        self.file.is_some()
            && self.x_column.is_some()
            && self.y_column.is_some()
            && self.has_headers().is_some()
            && !self.predict.is_empty()
    }

    pub fn read_options(&self, has_headers: bool) -> ReadOptions {
        ReadOptions {
            has_headers,
            delimiter: self.delimiter,
            ..Default::default()
        }
    }

    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            parallel: self.parallel,
            compute_inference: self.inference,
            confidence_level: self.confidence_level,
            ..Default::default()
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => {
            let bytes = s.as_bytes();
            if bytes.len() == 1 && bytes[0].is_ascii() {
                Ok(bytes[0])
            } else {
                Err(format!("delimiter must be a single ASCII character, got {:?}", s))
            }
        }
    }
}
