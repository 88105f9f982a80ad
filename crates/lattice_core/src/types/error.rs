//! Error types for structured error handling.
//!
//! This module provides:
//! - `LatticeError`: Errors from parameter validation and lattice construction

use thiserror::Error;

/// Categorised lattice pricing errors.
///
/// A failed call never leaves partial state behind.
///
/// # Variants
/// - `InvalidParameter`: An input violates its documented precondition
/// - `DegenerateProbability`: The derived risk-neutral probability leaves `[0, 1]`
/// - `AllocationFailed`: The allocator refused a lattice grid
///
/// # Examples
/// ```
/// use lattice_core::types::LatticeError;
///
/// let err = LatticeError::InvalidParameter {
///     name: "strike",
///     value: -1.0,
///     constraint: "must be positive",
/// };
/// assert_eq!(format!("{}", err), "Invalid parameter 'strike' = -1: must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LatticeError {
    /// Input parameter outside its valid domain.
    #[error("Invalid parameter '{name}' = {value}: {constraint}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// The offending value
        value: f64,
        /// Human-readable constraint that was violated
        constraint: &'static str,
    },

    /// Risk-neutral up-probability outside `[0, 1]` or not finite.
    ///
    /// The lattice would no longer be arbitrage-free for this
    /// `(sigma, r, dt)` combination.
    #[error("Degenerate risk-neutral probability p = {probability} at {steps} steps: must lie in [0, 1]")]
    DegenerateProbability {
        /// The derived probability
        probability: f64,
        /// Step count that produced it
        steps: usize,
    },

    /// Memory for a lattice grid could not be reserved.
    #[error("Cannot allocate {bytes} bytes for a {steps}-step lattice")]
    AllocationFailed {
        /// Step count of the lattice
        steps: usize,
        /// Requested grid size in bytes
        bytes: usize,
    },
}

impl LatticeError {
    /// Returns the parameter name for `InvalidParameter`, `None` otherwise.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            LatticeError::InvalidParameter { name, .. } => Some(name),
            LatticeError::DegenerateProbability { .. } | LatticeError::AllocationFailed { .. } => {
                None
            }
        }
    }
}

/// Fails with `InvalidParameter` unless `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, LatticeError> {
    // NaN fails the comparison as well
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(LatticeError::InvalidParameter {
            name,
            value,
            constraint: "must be finite and positive",
        })
    }
}

/// Fails with `InvalidParameter` unless `value` is finite and non-negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64, LatticeError> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(LatticeError::InvalidParameter {
            name,
            value,
            constraint: "must be finite and non-negative",
        })
    }
}

/// Fails with `InvalidParameter` unless `value` is finite.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, LatticeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LatticeError::InvalidParameter {
            name,
            value,
            constraint: "must be finite",
        })
    }
}
