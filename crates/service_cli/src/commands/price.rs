//! Price command implementation
//!
//! Prices a single put on the lattice and reports it next to the
//! Black-Scholes European value.

use std::io::Write;

use lattice_core::types::ExerciseStyle;
use lattice_pricing::analytical::european_put;
use lattice_pricing::{price, PricingResult, TreeParameters};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::output::OutputFormat;
use crate::Result;

/// Critical stock price at one step of the early-exercise boundary
#[derive(Debug, Serialize)]
struct BoundaryPoint {
    step: usize,
    time: f64,
    critical_price: f64,
}

#[derive(Debug, Serialize)]
struct PriceSummary<'a> {
    ticker: &'a str,
    exercise: ExerciseStyle,
    steps: usize,
    value: f64,
    black_scholes_european: Option<f64>,
    parameters: &'a TreeParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    exercise_boundary: Option<Vec<BoundaryPoint>>,
}

/// Flat record for CSV output
#[derive(Debug, Serialize)]
struct PriceRow<'a> {
    ticker: &'a str,
    exercise: &'static str,
    steps: usize,
    value: f64,
    black_scholes_european: Option<f64>,
}

/// Run the price command
pub fn run(config: &CliConfig, format: OutputFormat, show_boundary: bool) -> Result<()> {
    let contract = config.contract_spec()?;
    let market = config.market_params()?;
    let lattice = config.lattice_config()?;

    info!("Starting pricing...");
    info!("  Ticker: {}", config.ticker);
    info!("  Exercise: {}", contract.exercise());
    info!("  Steps: {}", lattice.steps());
    info!("  Output format: {}", format);

    let result = price(&contract, &market, &lattice)?;
    let reference = european_put(&contract, &market).ok();

    let stdout = std::io::stdout();
    render(
        &mut stdout.lock(),
        &config.ticker,
        &result,
        reference,
        format,
        show_boundary,
    )?;

    info!("Pricing complete");
    Ok(())
}

fn boundary_points(result: &PricingResult) -> Vec<BoundaryPoint> {
    let dt = result.parameters().dt();
    result
        .exercise_boundary()
        .iter()
        .enumerate()
        .filter_map(|(step, critical)| {
            critical.map(|critical_price| BoundaryPoint {
                step,
                time: step as f64 * dt,
                critical_price,
            })
        })
        .collect()
}

fn render<W: Write>(
    writer: &mut W,
    ticker: &str,
    result: &PricingResult,
    reference: Option<f64>,
    format: OutputFormat,
    show_boundary: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let summary = PriceSummary {
                ticker,
                exercise: result.exercise(),
                steps: result.steps(),
                value: result.value(),
                black_scholes_european: reference,
                parameters: result.parameters(),
                exercise_boundary: show_boundary.then(|| boundary_points(result)),
            };
            serde_json::to_writer_pretty(&mut *writer, &summary)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            csv.serialize(PriceRow {
                ticker,
                exercise: result.exercise().name(),
                steps: result.steps(),
                value: result.value(),
                black_scholes_european: reference,
            })?;
            csv.flush()?;
        }
        OutputFormat::Table => {
            let params = result.parameters();
            writeln!(writer, "┌──────────────────────────┬────────────────┐")?;
            writeln!(writer, "│ {:<24} │ {:>14} │", "Ticker", ticker)?;
            writeln!(writer, "│ {:<24} │ {:>14} │", "Exercise", result.exercise())?;
            writeln!(writer, "│ {:<24} │ {:>14} │", "Steps", result.steps())?;
            writeln!(writer, "│ {:<24} │ {:>14.6} │", "dt", params.dt())?;
            writeln!(writer, "│ {:<24} │ {:>14.6} │", "u", params.up())?;
            writeln!(writer, "│ {:<24} │ {:>14.6} │", "d", params.down())?;
            writeln!(writer, "│ {:<24} │ {:>14.6} │", "p", params.probability())?;
            writeln!(writer, "├──────────────────────────┼────────────────┤")?;
            writeln!(writer, "│ {:<24} │ {:>14.6} │", "Lattice value", result.value())?;
            if let Some(reference) = reference {
                writeln!(writer, "│ {:<24} │ {:>14.6} │", "Black-Scholes European", reference)?;
            }
            writeln!(writer, "└──────────────────────────┴────────────────┘")?;

            if show_boundary {
                let points = boundary_points(result);
                if points.is_empty() {
                    writeln!(writer, "\nNo early exercise on this lattice")?;
                } else {
                    writeln!(writer, "\n{:>6} {:>10} {:>16}", "Step", "Time", "Critical price")?;
                    for point in points {
                        writeln!(
                            writer,
                            "{:>6} {:>10.6} {:>16.6}",
                            point.step, point.time, point.critical_price
                        )?;
                    }
                }
            }
        }
    }
    Ok(())
}
