//! Lattice resolution.

use super::error::LatticeError;

/// Immutable lattice resolution: the number of time steps `h`.
///
/// # Examples
/// ```
/// use lattice_core::types::LatticeConfig;
///
/// let config = LatticeConfig::new(250).unwrap();
/// assert_eq!(config.steps(), 250);
/// assert_eq!(config.grid_size(), 251);
///
/// assert!(LatticeConfig::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LatticeConfig {
    /// Number of time steps
    steps: usize,
}

impl LatticeConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    /// `LatticeError::InvalidParameter` if `steps < 1`, or if one
    /// `(steps + 1)^2` grid of `f64` cannot be addressed on this platform.
    pub fn new(steps: usize) -> Result<Self, LatticeError> {
        if steps < 1 {
            return Err(LatticeError::InvalidParameter {
                name: "steps",
                value: steps as f64,
                constraint: "must be at least 1",
            });
        }
        if checked_grid_bytes(steps).is_none() {
            return Err(LatticeError::InvalidParameter {
                name: "steps",
                value: steps as f64,
                constraint: "lattice grid exceeds the addressable size",
            });
        }
        Ok(Self { steps })
    }

    /// Returns the number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Side length of the square lattice grid (`steps + 1`).
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.steps + 1
    }

    /// Size in bytes of one `(h + 1) x (h + 1)` grid of `f64`.
    #[inline]
    pub fn grid_bytes(&self) -> usize {
        // Checked in `new`
        checked_grid_bytes(self.steps).unwrap_or(usize::MAX)
    }

    /// Time step `dt = T / h` for the given maturity.
    #[inline]
    pub fn time_step(&self, maturity: f64) -> f64 {
        maturity / self.steps as f64
    }
}

/// Bytes of a `(steps + 1)^2` grid of `f64`, `None` beyond `isize::MAX`.
fn checked_grid_bytes(steps: usize) -> Option<usize> {
    let size = steps.checked_add(1)?;
    size.checked_mul(size)?
        .checked_mul(std::mem::size_of::<f64>())
        .filter(|&bytes| bytes <= isize::MAX as usize)
}
