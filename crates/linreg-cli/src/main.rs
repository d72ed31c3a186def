//! Linear Regression Modeler
//!
//! Fits a least-squares line between two columns of a CSV file and answers
//! what-if predictions from the fitted model.

mod cli;
mod report;
mod session;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Args;
use session::Session;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(args, stdin.lock(), stdout.lock()).run()
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
