//! Interactive modeler session
//!
//! Prompts for whatever the command line left out, loads the table, reports
//! the fit, then answers what-if predictions until the user quits. Any
//! rejected input sends the session back to the file prompt.

use std::fs::File;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use linreg_core::{fit, read_table, ColumnPair, FitResult, StatsError, Table};
use tracing::{debug, info, warn};

use crate::cli::Args;
use crate::report::{write_json, write_model, write_prediction};

const WELCOME_MSG: &str = "\n-- Linear Regression Modeler --\n";
const QUIT: &str = "q";

/// Outcome of one pass through the modeler
enum Pass {
    Restart,
    Quit,
}

pub struct Session<R, W> {
    args: Args,
    input: R,
    output: W,
    first_pass: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(args: Args, input: R, output: W) -> Self {
        Self {
            args,
            input,
            output,
            first_pass: true,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME_MSG)?;

        if self.args.is_batch() {
            return self.run_batch();
        }

        loop {
            match self.pass()? {
                Pass::Restart => continue,
                Pass::Quit => return Ok(()),
            }
        }
    }

    /// Single non-interactive pass; every failure is an error exit
    fn run_batch(&mut self) -> Result<()> {
        let path = self.args.file.clone().context("no input file")?;
        let has_headers = self.args.has_headers().unwrap_or(true);
        let file =
            File::open(&path).with_context(|| format!("Failed to open file: {:?}", path))?;
        let table = read_table(file, &self.args.read_options(has_headers))
            .with_context(|| format!("Failed to read table from {:?}", path))?;

        let x_sel = self.args.x_column.clone().unwrap_or_default();
        let y_sel = self.args.y_column.clone().unwrap_or_default();
        let columns = resolve(&table, &x_sel, &y_sel)?;

        let model = fit(&table, columns, &self.args.fit_options())?;
        self.report(&table, columns, &model)?;
        for &x in &self.args.predict {
            write_prediction(&mut self.output, x, model.predict(x))?;
        }
        Ok(())
    }

    fn pass(&mut self) -> Result<Pass> {
        // Command-line values only seed the first pass
        let from_args = std::mem::replace(&mut self.first_pass, false);

        let Some((path, file)) = self.acquire_file(from_args)? else {
            return Ok(Pass::Quit);
        };
        let Some((x_sel, y_sel)) = self.acquire_columns(&path, from_args)? else {
            return Ok(Pass::Quit);
        };
        let Some(has_headers) = self.acquire_header_choice(from_args)? else {
            return Ok(Pass::Quit);
        };

        let table = match read_table(file, &self.args.read_options(has_headers)) {
            Ok(table) => table,
            Err(StatsError::EmptyInput { .. }) => {
                writeln!(self.output, "ERROR: File contained no data.\n")?;
                return Ok(Pass::Restart);
            }
            Err(e) => {
                warn!(error = %e, path = ?path, "failed to read table");
                writeln!(self.output, "ERROR: Data file contains invalid data: {}", e)?;
                if !has_headers && matches!(e, StatsError::Parse { line: 1, .. }) {
                    writeln!(
                        self.output,
                        "   Possible cause: headers were declared absent but the file has a header row."
                    )?;
                }
                writeln!(self.output)?;
                return Ok(Pass::Restart);
            }
        };

        let columns = match resolve(&table, &x_sel, &y_sel) {
            Ok(columns) => columns,
            Err(e) => {
                debug!(error = %e, "column selection rejected");
                match e.downcast_ref::<StatsError>() {
                    Some(StatsError::InvalidColumnIndex { .. }) => writeln!(
                        self.output,
                        "ERROR: One or more column indexes are out of bounds.\n"
                    )?,
                    _ => writeln!(self.output, "ERROR: {}\n", e)?,
                }
                return Ok(Pass::Restart);
            }
        };

        writeln!(self.output, "\nFile contains the following x and y values: ")?;
        for (x, y) in table.pairs(columns)? {
            writeln!(self.output, "x: {} y: {}", x, y)?;
        }

        let model = match fit(&table, columns, &self.args.fit_options()) {
            Ok(model) => model,
            Err(e) => {
                warn!(error = %e, "fit failed");
                writeln!(self.output, "\nERROR: {}\n", e)?;
                return Ok(Pass::Restart);
            }
        };
        info!(
            rows = model.n_observations,
            slope = model.slope,
            intercept = model.intercept,
            "model fitted"
        );
        self.report(&table, columns, &model)?;

        if self.args.predict.is_empty() {
            if !self.prediction_loop(|x| model.predict(x))? {
                return Ok(Pass::Quit);
            }
        } else {
            for &x in &self.args.predict {
                write_prediction(&mut self.output, x, model.predict(x))?;
            }
        }

        match self.prompt("Enter 'q' to quit, or any other key to restart: ")? {
            Some(answer) if answer != QUIT => Ok(Pass::Restart),
            _ => Ok(Pass::Quit),
        }
    }

    fn report(&mut self, table: &Table, columns: ColumnPair, model: &FitResult) -> Result<()> {
        if let Some(names) = table.headers() {
            debug!(x = %names[columns.x], y = %names[columns.y], "reporting fit");
        }
        if self.args.json {
            write_json(&mut self.output, model)
        } else {
            write_model(&mut self.output, model)
        }
    }

    /// Returns `Ok(false)` when input ends
    fn prediction_loop<F: Fn(f64) -> f64>(&mut self, predict: F) -> Result<bool> {
        writeln!(
            self.output,
            "Enter an arbitrary x to get an estimate of y (or '{}' to break)",
            QUIT
        )?;
        loop {
            let Some(answer) = self.prompt("x: ")? else {
                return Ok(false);
            };
            if answer == QUIT {
                return Ok(true);
            }
            match answer.parse::<f64>() {
                Ok(x) if x.is_finite() => write_prediction(&mut self.output, x, predict(x))?,
                _ => writeln!(self.output, "Error: {:?} is not a number.", answer)?,
            }
        }
    }

    fn acquire_file(&mut self, from_args: bool) -> Result<Option<(PathBuf, File)>> {
        if from_args {
            if let Some(path) = self.args.file.clone() {
                match File::open(&path) {
                    Ok(file) => return Ok(Some((path, file))),
                    Err(e) => {
                        warn!(error = %e, path = ?path, "cannot open file");
                        writeln!(self.output, "Error: File could not be opened.")?;
                    }
                }
            }
        }

        loop {
            let Some(name) = self.prompt("Enter dataset CSV file, or 'q' to quit: ")? else {
                return Ok(None);
            };
            if name == QUIT {
                return Ok(None);
            }
            if name.is_empty() {
                continue;
            }
            let path = PathBuf::from(name);
            match File::open(&path) {
                Ok(file) => return Ok(Some((path, file))),
                Err(e) => {
                    debug!(error = %e, path = ?path, "cannot open file");
                    writeln!(self.output, "Error: File could not be opened.")?;
                }
            }
        }
    }

    fn acquire_columns(
        &mut self,
        path: &Path,
        from_args: bool,
    ) -> Result<Option<(String, String)>> {
        let (x_arg, y_arg) = if from_args {
            (self.args.x_column.clone(), self.args.y_column.clone())
        } else {
            (None, None)
        };

        let name = path.display().to_string();
        let x_sel = match x_arg {
            Some(sel) => sel,
            None => match self.prompt_column(&format!(
                "Enter the column index (starting from 0) in {} containing the independent variable x: ",
                name
            ))? {
                Some(sel) => sel,
                None => return Ok(None),
            },
        };
        let y_sel = match y_arg {
            Some(sel) => sel,
            None => match self.prompt_column(&format!(
                "Enter the column index (starting from 0) in {} containing the dependent variable y: ",
                name
            ))? {
                Some(sel) => sel,
                None => return Ok(None),
            },
        };
        Ok(Some((x_sel, y_sel)))
    }

    fn acquire_header_choice(&mut self, from_args: bool) -> Result<Option<bool>> {
        if from_args {
            if let Some(choice) = self.args.has_headers() {
                return Ok(Some(choice));
            }
        }
        loop {
            match self
                .prompt("Does your data file contain column headers (y/n): ")?
                .as_deref()
            {
                Some("y") => return Ok(Some(true)),
                Some("n") => return Ok(Some(false)),
                Some(_) => continue,
                None => return Ok(None),
            }
        }
    }

    /// Re-prompts until the answer could name a column
    fn prompt_column(&mut self, message: &str) -> Result<Option<String>> {
        loop {
            match self.prompt(message)? {
                Some(answer) if !is_column_selector(&answer) => {
                    if !answer.is_empty() {
                        writeln!(
                            self.output,
                            "Error: {:?} is neither a column index nor a column name.",
                            answer
                        )?;
                    }
                }
                other => return Ok(other),
            }
        }
    }

    /// Print `message` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Zero-based index, or text that cannot be read as a number (a header name)
fn is_column_selector(answer: &str) -> bool {
    !answer.is_empty() && (answer.parse::<usize>().is_ok() || answer.parse::<f64>().is_err())
}

fn resolve(table: &Table, x_sel: &str, y_sel: &str) -> Result<ColumnPair> {
    if x_sel.is_empty() || y_sel.is_empty() {
        bail!("both x and y columns must be given");
    }
    let x = table.resolve_column(x_sel)?;
    let y = table.resolve_column(y_sel)?;
    Ok(ColumnPair::new(x, y))
}
