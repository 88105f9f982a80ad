//! Check command implementation
//!
//! Validates the configuration and prices the reference scenario as a
//! self-test.

use std::path::Path;

use lattice_core::types::{ContractSpec, ExerciseStyle, LatticeConfig, MarketParams};
use lattice_pricing::price;
use tracing::{error, info};

use crate::config::CliConfig;
use crate::{CliError, Result};

/// American put, K = S0 = 50, T = 5/12, sigma = 0.40, r = 0.10, h = 5
const SELF_TEST_VALUE: f64 = 4.488458534725916;
const SELF_TEST_TOLERANCE: f64 = 1e-10;

/// Run the check command
pub fn run(config_path: &Path, config: &CliConfig) -> Result<()> {
    info!("Checking system configuration...");

    if config_path.exists() {
        info!("  Configuration file: {}", config_path.display());
    } else {
        info!(
            "  Configuration file: {} (not found, using defaults)",
            config_path.display()
        );
    }

    match config.validate() {
        Ok(()) => info!("  Configuration: OK"),
        Err(e) => {
            error!("  Configuration: {}", e);
            return Err(e.into());
        }
    }

    info!("  Worker threads: {}", num_cpus::get());

    let value = self_test()?;
    if let Err(e) = verify(value, SELF_TEST_VALUE) {
        error!("  Self-test: {}", e);
        return Err(e);
    }
    info!("  Self-test: OK ({:.6})", value);

    info!("Check complete");
    Ok(())
}

fn verify(value: f64, expected: f64) -> Result<()> {
    if (value - expected).abs() > SELF_TEST_TOLERANCE {
        return Err(CliError::SelfTest { value, expected });
    }
    Ok(())
}

fn self_test() -> Result<f64> {
    let contract = ContractSpec::new(50.0, 5.0 / 12.0, ExerciseStyle::American)?;
    let market = MarketParams::new(50.0, 0.40, 0.10)?;
    let result = price(&contract, &market, &LatticeConfig::new(5)?)?;
    Ok(result.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_self_test_value() {
        assert_relative_eq!(self_test().unwrap(), SELF_TEST_VALUE, epsilon = SELF_TEST_TOLERANCE);
    }

    #[test]
    fn test_verify_accepts_reference_value() {
        assert!(verify(self_test().unwrap(), SELF_TEST_VALUE).is_ok());
    }

    #[test]
    fn test_verify_rejects_mismatch() {
        let value = self_test().unwrap();
        let err = verify(value, 4.5).unwrap_err();
        match err {
            CliError::SelfTest { value: got, expected } => {
                assert_relative_eq!(got, SELF_TEST_VALUE, epsilon = SELF_TEST_TOLERANCE);
                assert_eq!(expected, 4.5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_rejects_invalid_config() {
        let mut config = CliConfig::default();
        config.lattice.steps = 0;
        assert!(run(Path::new("absent.toml"), &config).is_err());
    }

    #[test]
    fn test_check_passes_with_defaults() {
        assert!(run(Path::new("absent.toml"), &CliConfig::default()).is_ok());
    }
}
