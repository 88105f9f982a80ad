//! Sweep output: priced points, skipped step counts, convergence errors.

use lattice_core::types::{ExerciseStyle, LatticeError};

use super::range::StepRange;

/// Root value at one step count.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SweepPoint {
    /// Step count `h`
    pub steps: usize,
    /// Root value at `h`
    pub value: f64,
}

/// Step count that failed to price, with the reason.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SkippedStep {
    /// Step count `h`
    pub steps: usize,
    /// Why pricing failed
    pub error: LatticeError,
}

/// Sweep point compared against a reference value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConvergencePoint {
    /// Step count `h`
    pub steps: usize,
    /// Lattice value at `h`
    pub value: f64,
    /// Reference value (usually Black-Scholes)
    pub reference: f64,
    /// `value - reference`
    pub error: f64,
}

impl ConvergencePoint {
    /// Absolute error against the reference.
    #[inline]
    pub fn abs_error(&self) -> f64 {
        self.error.abs()
    }
}

/// Results of pricing one contract across a range of step counts.
///
/// Points and skipped entries are sorted by step count regardless of the
/// order in which the individual calls finished.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SweepReport {
    ticker: String,
    exercise: ExerciseStyle,
    range: StepRange,
    points: Vec<SweepPoint>,
    skipped: Vec<SkippedStep>,
}

impl SweepReport {
    pub(crate) fn new(
        ticker: String,
        exercise: ExerciseStyle,
        range: StepRange,
        mut points: Vec<SweepPoint>,
        mut skipped: Vec<SkippedStep>,
    ) -> Self {
        points.sort_by_key(|p| p.steps);
        skipped.sort_by_key(|s| s.steps);
        Self {
            ticker,
            exercise,
            range,
            points,
            skipped,
        }
    }

    /// Display label of the underlying.
    #[inline]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Exercise style of the swept contract.
    #[inline]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Requested range.
    #[inline]
    pub fn range(&self) -> StepRange {
        self.range
    }

    /// Priced points in ascending step order.
    #[inline]
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    /// Step counts that failed, in ascending order.
    #[inline]
    pub fn skipped(&self) -> &[SkippedStep] {
        &self.skipped
    }

    /// Returns `true` if every step count in the range priced.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Value at a given step count, if it priced.
    pub fn value_at(&self, steps: usize) -> Option<f64> {
        self.points
            .binary_search_by_key(&steps, |p| p.steps)
            .ok()
            .map(|i| self.points[i].value)
    }

    /// Value at the largest priced step count.
    pub fn final_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    /// Pairs every point with its error against `reference`.
    pub fn convergence(&self, reference: f64) -> Vec<ConvergencePoint> {
        self.points
            .iter()
            .map(|p| ConvergencePoint {
                steps: p.steps,
                value: p.value,
                reference,
                error: p.value - reference,
            })
            .collect()
    }
}
