//! Inclusive range of step counts to sweep.

use thiserror::Error;

/// First step count of the reference sweep.
pub const DEFAULT_START: usize = 2;

/// Last step count of the reference sweep (inclusive).
pub const DEFAULT_END: usize = 499;

/// Invalid sweep range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Start is zero.
    #[error("Invalid sweep start {0}: step counts must be at least 1")]
    ZeroStart(usize),

    /// Start above end.
    #[error("Invalid sweep range {start}..={end}: start exceeds end")]
    Inverted {
        /// First step count
        start: usize,
        /// Last step count
        end: usize,
    },
}

/// Inclusive range of lattice step counts.
///
/// # Examples
/// ```
/// use lattice_pricing::sweep::StepRange;
///
/// let range = StepRange::new(2, 6).unwrap();
/// assert_eq!(range.len(), 5);
/// assert_eq!(range.iter().collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);
///
/// assert!(StepRange::new(0, 10).is_err());
/// assert!(StepRange::new(10, 2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StepRange {
    start: usize,
    end: usize,
}

impl StepRange {
    /// Creates a validated range `start..=end`.
    ///
    /// # Errors
    /// `RangeError` if `start == 0` or `start > end`.
    pub fn new(start: usize, end: usize) -> Result<Self, RangeError> {
        if start == 0 {
            return Err(RangeError::ZeroStart(start));
        }
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// First step count.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last step count (inclusive).
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of step counts in the range.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Iterates over the step counts in ascending order.
    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl Default for StepRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
        }
    }
}
