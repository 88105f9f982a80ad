//! Sweep command implementation
//!
//! Prices the configured put at every step count in the sweep range.
//! European sweeps are reported against the Black-Scholes price; American
//! sweeps list the lattice values alone.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lattice_core::types::ExerciseStyle;
use lattice_pricing::analytical::european_put;
use lattice_pricing::sweep::{sweep, ConvergencePoint, SkippedStep, SweepReport, SweepRequest};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::output::OutputFormat;
use crate::{CliError, Result};

/// Flat record for CSV output
#[derive(Debug, Serialize)]
struct SweepRow {
    steps: usize,
    value: f64,
    black_scholes_european: Option<f64>,
    error: Option<f64>,
}

#[derive(Debug, Serialize)]
struct SweepSummary<'a> {
    ticker: &'a str,
    exercise: ExerciseStyle,
    start: usize,
    end: usize,
    black_scholes_european: Option<f64>,
    points: Vec<SweepRow>,
    skipped: &'a [SkippedStep],
}

/// Run the sweep command
pub fn run(config: &CliConfig, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let request = SweepRequest::new(
        config.ticker.clone(),
        config.contract_spec()?,
        config.market_params()?,
        config.step_range()?,
    );

    info!("Starting sweep...");
    info!("  Ticker: {}", request.ticker);
    info!("  Exercise: {}", request.contract.exercise());
    info!(
        "  Steps: {}..={}",
        request.range.start(),
        request.range.end()
    );
    info!("  Output format: {}", format);

    let report = sweep(&request);
    for skipped in report.skipped() {
        warn!("  h = {} skipped: {}", skipped.steps, skipped.error);
    }
    if report.points().is_empty() {
        return Err(CliError::EmptySweep {
            start: request.range.start(),
            end: request.range.end(),
            skipped: report.skipped().len(),
        });
    }

    let reference = convergence_reference(&request);

    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            render(&mut writer, &report, reference, format)?;
            writer.flush()?;
            info!("  Wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            render(&mut stdout.lock(), &report, reference, format)?;
        }
    }

    info!("Sweep complete");
    Ok(())
}

/// Black-Scholes target for European sweeps; American sweeps have none.
fn convergence_reference(request: &SweepRequest) -> Option<f64> {
    match request.contract.exercise() {
        ExerciseStyle::European => european_put(&request.contract, &request.market).ok(),
        ExerciseStyle::American => None,
    }
}

fn rows(report: &SweepReport, reference: Option<f64>) -> Vec<SweepRow> {
    match reference {
        Some(reference) => report
            .convergence(reference)
            .into_iter()
            .map(|ConvergencePoint { steps, value, reference, error }| SweepRow {
                steps,
                value,
                black_scholes_european: Some(reference),
                error: Some(error),
            })
            .collect(),
        None => report
            .points()
            .iter()
            .map(|point| SweepRow {
                steps: point.steps,
                value: point.value,
                black_scholes_european: None,
                error: None,
            })
            .collect(),
    }
}

fn render<W: Write>(
    writer: &mut W,
    report: &SweepReport,
    reference: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let rows = rows(report, reference);

    match format {
        OutputFormat::Json => {
            let summary = SweepSummary {
                ticker: report.ticker(),
                exercise: report.exercise(),
                start: report.range().start(),
                end: report.range().end(),
                black_scholes_european: reference,
                points: rows,
                skipped: report.skipped(),
            };
            serde_json::to_writer_pretty(&mut *writer, &summary)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            for row in &rows {
                csv.serialize(row)?;
            }
            csv.flush()?;
        }
        OutputFormat::Table => {
            writeln!(
                writer,
                "{} {} put, h = {}..={}",
                report.ticker(),
                report.exercise(),
                report.range().start(),
                report.range().end()
            )?;
            if let Some(reference) = reference {
                writeln!(writer, "Black-Scholes European: {:.6}", reference)?;
            }
            let width = if reference.is_some() { 48 } else { 21 };
            writeln!(writer, "{}", "-".repeat(width))?;
            if reference.is_some() {
                writeln!(
                    writer,
                    "{:>6} {:>14} {:>14} {:>10}",
                    "Steps", "Lattice", "Black-Scholes", "Error"
                )?;
            } else {
                writeln!(writer, "{:>6} {:>14}", "Steps", "Lattice")?;
            }
            writeln!(writer, "{}", "-".repeat(width))?;
            for row in &rows {
                match (row.black_scholes_european, row.error) {
                    (Some(bs), Some(error)) => writeln!(
                        writer,
                        "{:>6} {:>14.6} {:>14.6} {:>10.6}",
                        row.steps, row.value, bs, error
                    )?,
                    _ => writeln!(writer, "{:>6} {:>14.6}", row.steps, row.value)?,
                }
            }
            writeln!(writer, "{}", "-".repeat(width))?;
            if !report.is_complete() {
                writeln!(writer, "{} step count(s) skipped", report.skipped().len())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lattice_pricing::sweep::StepRange;

    fn small_report(exercise: ExerciseStyle) -> (SweepReport, Option<f64>) {
        let mut config = CliConfig::default();
        config.contract.exercise = exercise;
        let request = SweepRequest::new(
            "MSFT",
            config.contract_spec().unwrap(),
            config.market_params().unwrap(),
            StepRange::new(2, 12).unwrap(),
        );
        let reference = convergence_reference(&request);
        (sweep(&request), reference)
    }

    fn render_to_string(report: &SweepReport, reference: Option<f64>, format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        render(&mut buffer, report, reference, format).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_csv_has_one_row_per_step() {
        let (report, reference) = small_report(ExerciseStyle::European);
        let text = render_to_string(&report, reference, OutputFormat::Csv);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "steps,value,black_scholes_european,error");
        assert_eq!(lines.len(), 1 + 11);
        assert!(lines[1].starts_with("2,"));
        assert!(lines[11].starts_with("12,"));
    }

    #[test]
    fn test_json_errors_match_reference() {
        let (report, reference) = small_report(ExerciseStyle::European);
        let text = render_to_string(&report, reference, OutputFormat::Json);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["exercise"], "european");
        assert_eq!(json["start"], 2);
        assert_eq!(json["end"], 12);
        let points = json["points"].as_array().unwrap();
        assert_eq!(points.len(), 11);

        let bs = json["black_scholes_european"].as_f64().unwrap();
        for point in points {
            let value = point["value"].as_f64().unwrap();
            let error = point["error"].as_f64().unwrap();
            assert_relative_eq!(error, value - bs, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_american_table_has_no_error_column() {
        let (report, reference) = small_report(ExerciseStyle::American);
        assert_eq!(reference, None);

        let text = render_to_string(&report, reference, OutputFormat::Table);
        assert!(text.contains("MSFT American put, h = 2..=12"));
        assert!(!text.contains("Black-Scholes"));
        assert!(!text.contains("Error"));
        assert!(!text.contains("skipped"));
    }

    #[test]
    fn test_european_table_has_error_column() {
        let (report, reference) = small_report(ExerciseStyle::European);
        assert!(reference.is_some());

        let text = render_to_string(&report, reference, OutputFormat::Table);
        assert!(text.contains("Black-Scholes European: 4.07598"));
        assert!(text.contains("Error"));
    }

    #[test]
    fn test_american_rows_carry_no_convergence_error() {
        let (report, reference) = small_report(ExerciseStyle::American);
        let text = render_to_string(&report, reference, OutputFormat::Json);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert!(json["black_scholes_european"].is_null());
        for point in json["points"].as_array().unwrap() {
            assert!(point["error"].is_null());
            assert!(point["black_scholes_european"].is_null());
        }
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.csv");
        let mut config = CliConfig::default();
        config.sweep.end = 20;

        run(&config, OutputFormat::Csv, Some(&path)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1 + 19);
    }

    #[test]
    fn test_run_zero_volatility_is_empty_sweep() {
        let mut config = CliConfig::default();
        config.market.volatility = 0.0;
        config.sweep.end = 5;

        let err = run(&config, OutputFormat::Table, None).unwrap_err();
        assert!(matches!(
            err,
            CliError::EmptySweep {
                start: 2,
                end: 5,
                skipped: 4
            }
        ));
    }
}
