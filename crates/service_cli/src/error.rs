//! Error types for the lattice CLI.

use lattice_core::types::LatticeError;
use lattice_pricing::sweep::RangeError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pricing error
    #[error("Pricing error: {0}")]
    Pricing(#[from] LatticeError),

    /// Sweep range error
    #[error("Sweep error: {0}")]
    Range(#[from] RangeError),

    /// Every step count in a sweep failed
    #[error("No step count in {start}..={end} could be priced ({skipped} skipped)")]
    EmptySweep {
        start: usize,
        end: usize,
        skipped: usize,
    },

    /// Reference pricing returned the wrong value
    #[error("Self-test failed: priced {value}, expected {expected}")]
    SelfTest { value: f64, expected: f64 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialisation error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
