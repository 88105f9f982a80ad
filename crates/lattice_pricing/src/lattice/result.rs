//! Immutable output of a single lattice pricing call.

use lattice_core::types::{ExerciseStyle, LatticeConfig};

use super::node::{Lattice, Node};
use super::parameters::TreeParameters;

/// Fair value today plus the lattices that produced it.
///
/// Constructed once by the pricer and never mutated.
#[derive(Debug, Clone)]
pub struct PricingResult {
    value: f64,
    config: LatticeConfig,
    exercise: ExerciseStyle,
    parameters: TreeParameters,
    stock: Lattice,
    option: Lattice,
    intrinsic: Lattice,
    boundary: Vec<Option<f64>>,
}

impl PricingResult {
    pub(crate) fn new(
        config: LatticeConfig,
        exercise: ExerciseStyle,
        parameters: TreeParameters,
        stock: Lattice,
        option: Lattice,
        intrinsic: Lattice,
        boundary: Vec<Option<f64>>,
    ) -> Self {
        Self {
            value: option[Node::ROOT],
            config,
            exercise,
            parameters,
            stock,
            option,
            intrinsic,
            boundary,
        }
    }

    /// Option value at the root node.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Configuration that produced this result.
    #[inline]
    pub fn config(&self) -> LatticeConfig {
        self.config
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.config.steps()
    }

    /// Exercise style the contract was priced under.
    #[inline]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Derived tree parameters.
    #[inline]
    pub fn parameters(&self) -> &TreeParameters {
        &self.parameters
    }

    /// Stock-price lattice `S`.
    #[inline]
    pub fn stock_lattice(&self) -> &Lattice {
        &self.stock
    }

    /// Option-value lattice `V`.
    #[inline]
    pub fn value_lattice(&self) -> &Lattice {
        &self.option
    }

    /// Immediate-exercise lattice: `max(K - S, 0)` at every node.
    #[inline]
    pub fn intrinsic_lattice(&self) -> &Lattice {
        &self.intrinsic
    }

    /// Highest stock price at which early exercise is optimal, per step.
    ///
    /// One entry per non-terminal step (`0..h`). Empty for European contracts.
    #[inline]
    pub fn exercise_boundary(&self) -> &[Option<f64>] {
        &self.boundary
    }

    /// Returns `true` when exercising today beats holding.
    ///
    /// Always `false` for European contracts.
    pub fn early_exercise_at_root(&self) -> bool {
        self.boundary.first().is_some_and(Option::is_some)
    }
}
