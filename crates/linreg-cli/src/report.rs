//! Text rendering of fitted models

use std::io::Write;

use anyhow::Result;
use linreg_core::{CoefficientInference, FitResult};

/// Format a number with at most six decimals and no trailing zeros
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let s = format!("{:.6}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub fn write_model<W: Write>(out: &mut W, fit: &FitResult) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "model = {} + {}x",
        fmt_num(fit.intercept),
        fmt_num(fit.slope)
    )?;
    writeln!(out, "std error = {}", fmt_num(fit.standard_error))?;
    writeln!(out, "correlation coef: {}", fmt_num(fit.r_squared))?;

    if let Some(inference) = &fit.inference {
        writeln!(out)?;
        writeln!(
            out,
            "{:<10} {:>12} {:>12} {:>12} {:>12}   {:.0}% CI",
            "",
            "estimate",
            "std error",
            "t value",
            "p value",
            inference.confidence_level * 100.0
        )?;
        write_coefficient(out, "intercept", &inference.intercept)?;
        write_coefficient(out, "slope", &inference.slope)?;
        writeln!(
            out,
            "F = {} on 1 and {} df, p = {}",
            fmt_num(inference.f_statistic),
            inference.df,
            fmt_num(inference.f_pvalue)
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_coefficient<W: Write>(out: &mut W, name: &str, c: &CoefficientInference) -> Result<()> {
    writeln!(
        out,
        "{:<10} {:>12} {:>12} {:>12} {:>12}   [{}, {}]",
        name,
        fmt_num(c.estimate),
        fmt_num(c.std_error),
        fmt_num(c.t_value),
        fmt_num(c.p_value),
        fmt_num(c.ci_lower),
        fmt_num(c.ci_upper)
    )?;
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, fit: &FitResult) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, fit)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_prediction<W: Write>(out: &mut W, x: f64, y: f64) -> Result<()> {
    writeln!(out, "x = {} gives y = {}", fmt_num(x), fmt_num(y))?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> FitResult {
        FitResult {
            intercept: 1.2999999999999998,
            slope: 0.9,
            standard_error: 0.7958224257542215,
            r_squared: 0.81,
            adj_r_squared: 0.7466666666666666,
            n_observations: 5,
            inference: None,
        }
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(2.0), "2");
        assert_eq!(fmt_num(1.2999999999999998), "1.3");
        assert_eq!(fmt_num(-0.0000001), "0");
        assert_eq!(fmt_num(0.7958224257542215), "0.795822");
        assert_eq!(fmt_num(-12.5), "-12.5");
        assert_eq!(fmt_num(f64::INFINITY), "inf");
    }

    #[test]
    fn test_write_model() {
        let mut out = Vec::new();
        write_model(&mut out, &model()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("model = 1.3 + 0.9x"));
        assert!(text.contains("std error = 0.795822"));
        assert!(text.contains("correlation coef: 0.81"));
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_json(&mut out, &model()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["slope"], 0.9);
        assert_eq!(value["n_observations"], 5);
        assert!(value.get("inference").is_none());
    }

    #[test]
    fn test_write_prediction() {
        let mut out = Vec::new();
        write_prediction(&mut out, 10.0, 20.0).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x = 10 gives y = 20\n\n");
    }
}
