//! Step-count sweeps for convergence studies.
//!
//! Each step count is priced independently. With the `parallel` feature
//! (default) the calls run on the Rayon pool; results are sorted by step
//! count afterwards, so completion order never shows up in the report.
//!
//! Failing step counts are skipped and recorded, never replaced by a value.
//!
//! # Usage
//!
//! ```rust
//! use lattice_core::types::{ContractSpec, ExerciseStyle, MarketParams};
//! use lattice_pricing::sweep::{sweep, StepRange, SweepRequest};
//!
//! let request = SweepRequest::new(
//!     "MSFT",
//!     ContractSpec::new(50.0, 5.0 / 12.0, ExerciseStyle::American).unwrap(),
//!     MarketParams::new(50.0, 0.40, 0.10).unwrap(),
//!     StepRange::new(2, 40).unwrap(),
//! );
//!
//! let report = sweep(&request);
//! assert_eq!(report.points().len(), 39);
//! assert!(report.is_complete());
//! ```

pub mod range;
pub mod report;

pub use range::{RangeError, StepRange, DEFAULT_END, DEFAULT_START};
pub use report::{ConvergencePoint, SkippedStep, SweepPoint, SweepReport};

use lattice_core::types::{ContractSpec, LatticeConfig, LatticeError, MarketParams};
use tracing::{debug, info, warn};

use crate::lattice::LatticePricer;

/// One contract, one market, many step counts.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRequest {
    /// Display label; has no numeric effect
    pub ticker: String,
    /// Contract terms
    pub contract: ContractSpec,
    /// Market inputs
    pub market: MarketParams,
    /// Step counts to price
    pub range: StepRange,
}

impl SweepRequest {
    /// Creates a sweep request.
    pub fn new(
        ticker: impl Into<String>,
        contract: ContractSpec,
        market: MarketParams,
        range: StepRange,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            contract,
            market,
            range,
        }
    }
}

/// Prices the request's contract at every step count in its range.
pub fn sweep(request: &SweepRequest) -> SweepReport {
    info!(
        ticker = %request.ticker,
        exercise = %request.contract.exercise(),
        start = request.range.start(),
        end = request.range.end(),
        "Starting lattice sweep"
    );

    let outcomes = price_each(&request.contract, &request.market, request.range);

    let mut points = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();
    for (steps, outcome) in outcomes {
        match outcome {
            Ok(value) => {
                debug!(steps, value, "Priced step count");
                points.push(SweepPoint { steps, value });
            }
            Err(error) => {
                warn!(steps, %error, "Skipping step count");
                skipped.push(SkippedStep { steps, error });
            }
        }
    }

    info!(
        priced = points.len(),
        skipped = skipped.len(),
        "Lattice sweep complete"
    );

    SweepReport::new(
        request.ticker.clone(),
        request.contract.exercise(),
        request.range,
        points,
        skipped,
    )
}

/// Root value at one step count; the lattices are dropped straight away.
fn price_at(
    contract: &ContractSpec,
    market: &MarketParams,
    steps: usize,
) -> Result<f64, LatticeError> {
    let config = LatticeConfig::new(steps)?;
    LatticePricer::new(config)
        .price(contract, market)
        .map(|result| result.value())
}

#[cfg(feature = "parallel")]
fn price_each(
    contract: &ContractSpec,
    market: &MarketParams,
    range: StepRange,
) -> Vec<(usize, Result<f64, LatticeError>)> {
    use rayon::prelude::*;

    range
        .iter()
        .into_par_iter()
        .map(|steps| (steps, price_at(contract, market, steps)))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn price_each(
    contract: &ContractSpec,
    market: &MarketParams,
    range: StepRange,
) -> Vec<(usize, Result<f64, LatticeError>)> {
    range
        .iter()
        .map(|steps| (steps, price_at(contract, market, steps)))
        .collect()
}
