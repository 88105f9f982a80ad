//! Analytical comparison tests for lattice pricing.
//!
//! These tests verify that European lattice prices converge to the
//! Black-Scholes closed form as the step count grows, and that the
//! reference American scenario reproduces its pinned value.
//!
//! # Test Categories
//!
//! 1. **Regression fixtures**: K=50, r=0.10, S0=50, σ=0.40, T=5/12, h=5
//! 2. **Convergence**: European lattice vs Black-Scholes
//! 3. **Sweep convergence**: error shrinks across the reference sweep

use approx::assert_relative_eq;
use lattice_core::types::{ContractSpec, ExerciseStyle, LatticeConfig, MarketParams};
use lattice_pricing::analytical::european_put;
use lattice_pricing::sweep::{sweep, StepRange, SweepRequest};
use lattice_pricing::price;

/// Reference scenario: spot, strike, rate, vol, maturity.
fn reference_params() -> (f64, f64, f64, f64, f64) {
    (50.0, 50.0, 0.10, 0.40, 5.0 / 12.0)
}

fn reference_inputs(exercise: ExerciseStyle) -> (ContractSpec, MarketParams) {
    let (spot, strike, rate, vol, maturity) = reference_params();
    (
        ContractSpec::new(strike, maturity, exercise).unwrap(),
        MarketParams::new(spot, vol, rate).unwrap(),
    )
}

// ============================================================================
// Regression Fixtures
// ============================================================================

#[test]
fn test_american_reference_scenario() {
    let (contract, market) = reference_inputs(ExerciseStyle::American);
    let result = price(&contract, &market, &LatticeConfig::new(5).unwrap()).unwrap();
    assert_relative_eq!(result.value(), 4.488458534725916, max_relative = 1e-9);
}

#[test]
fn test_european_reference_scenario() {
    let (contract, market) = reference_inputs(ExerciseStyle::European);
    let result = price(&contract, &market, &LatticeConfig::new(5).unwrap()).unwrap();
    assert_relative_eq!(result.value(), 4.319018716515818, max_relative = 1e-9);
}

// ============================================================================
// Convergence to Black-Scholes
// ============================================================================

#[test]
fn test_european_converges_at_1000_steps() {
    let (contract, market) = reference_inputs(ExerciseStyle::European);
    let analytical = european_put(&contract, &market).unwrap();
    let lattice = price(&contract, &market, &LatticeConfig::new(1000).unwrap()).unwrap();

    let error = (lattice.value() - analytical).abs();
    assert!(
        error < 1e-2,
        "Lattice={:.6}, Analytical={:.6}, Error={:.6}",
        lattice.value(),
        analytical,
        error
    );
}

#[test]
fn test_textbook_put_converges() {
    // S=100, K=100, r=5%, σ=20%, T=1
    let contract = ContractSpec::new(100.0, 1.0, ExerciseStyle::European).unwrap();
    let market = MarketParams::new(100.0, 0.2, 0.05).unwrap();
    let analytical = european_put(&contract, &market).unwrap();
    let lattice = price(&contract, &market, &LatticeConfig::new(1000).unwrap()).unwrap();

    assert!((lattice.value() - analytical).abs() < 1e-2);
}

#[test]
fn test_error_shrinks_with_resolution() {
    let (contract, market) = reference_inputs(ExerciseStyle::European);
    let analytical = european_put(&contract, &market).unwrap();

    let coarse = price(&contract, &market, &LatticeConfig::new(10).unwrap()).unwrap();
    let fine = price(&contract, &market, &LatticeConfig::new(800).unwrap()).unwrap();

    assert!((fine.value() - analytical).abs() < (coarse.value() - analytical).abs());
}

#[test]
fn test_american_above_european_closed_form() {
    let (contract, market) = reference_inputs(ExerciseStyle::American);
    let analytical = european_put(&contract, &market).unwrap();
    let lattice = price(&contract, &market, &LatticeConfig::new(500).unwrap()).unwrap();

    // Early exercise premium is positive for a put with r > 0
    assert!(lattice.value() > analytical);
}

// ============================================================================
// Sweep Convergence
// ============================================================================

#[test]
fn test_reference_sweep_converges() {
    let (contract, market) = reference_inputs(ExerciseStyle::European);
    let analytical = european_put(&contract, &market).unwrap();
    let request = SweepRequest::new("MSFT", contract, market, StepRange::default());

    let report = sweep(&request);
    assert!(report.is_complete());
    assert_eq!(report.points().len(), 498);

    let convergence = report.convergence(analytical);
    let first = convergence.first().unwrap();
    let last = convergence.last().unwrap();
    assert_eq!(first.steps, 2);
    assert_eq!(last.steps, 499);
    assert!(last.abs_error() < first.abs_error());
    assert!(last.abs_error() < 1e-2);
}
