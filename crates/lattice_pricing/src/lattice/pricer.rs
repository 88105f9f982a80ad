//! Backward-induction pricer for vanilla puts.
//!
//! ## Algorithm
//!
//! 1. Derive `TreeParameters` (fails before any allocation if `p ∉ [0, 1]`)
//! 2. Fill the stock lattice `S[(l, s)] = S0 · u^l · d^(s-l)` and the
//!    intrinsic lattice `max(K - S, 0)`
//! 3. Terminal column of `V` = intrinsic value
//! 4. For `s = h-1 .. 0`: `V = exp(-r·dt) · (p·V[up] + (1-p)·V[down])`,
//!    floored at intrinsic value for American contracts
//! 5. `V[(0, 0)]` is the fair value today

use lattice_core::types::{ContractSpec, LatticeConfig, LatticeError, MarketParams};

use super::node::{Lattice, Node};
use super::parameters::TreeParameters;
use super::result::PricingResult;

/// Binomial lattice pricer at a fixed resolution.
///
/// # Examples
///
/// ```rust
/// use lattice_core::types::{ContractSpec, ExerciseStyle, LatticeConfig, MarketParams};
/// use lattice_pricing::lattice::LatticePricer;
///
/// let contract = ContractSpec::new(50.0, 5.0 / 12.0, ExerciseStyle::American).unwrap();
/// let market = MarketParams::new(50.0, 0.40, 0.10).unwrap();
/// let pricer = LatticePricer::new(LatticeConfig::new(5).unwrap());
///
/// let result = pricer.price(&contract, &market).unwrap();
/// assert!((result.value() - 4.4885).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticePricer {
    config: LatticeConfig,
}

impl LatticePricer {
    /// Creates a pricer for the given resolution.
    #[inline]
    pub fn new(config: LatticeConfig) -> Self {
        Self { config }
    }

    /// Returns the lattice configuration.
    #[inline]
    pub fn config(&self) -> LatticeConfig {
        self.config
    }

    /// Prices a put on the lattice.
    ///
    /// # Errors
    /// - `LatticeError::DegenerateProbability` if the derived up-probability
    ///   leaves `[0, 1]`
    /// - `LatticeError::AllocationFailed` if a lattice grid cannot be allocated
    ///
    /// Parameter validation already happened when the inputs were constructed.
    pub fn price(
        &self,
        contract: &ContractSpec,
        market: &MarketParams,
    ) -> Result<PricingResult, LatticeError> {
        let params = TreeParameters::derive(contract, market, &self.config)?;
        let steps = self.config.steps();
        let size = self.config.grid_size();
        let american = contract.exercise().is_american();

        let mut stock = Lattice::zeros(size)?;
        let mut intrinsic = Lattice::zeros(size)?;
        for step in 0..=steps {
            for level in 0..=step {
                let node = Node::new(level, step);
                let price = params.stock_price(market.spot(), node);
                stock.set(node, price);
                intrinsic.set(node, contract.payoff(price));
            }
        }

        let mut option = Lattice::zeros(size)?;
        for level in 0..=steps {
            let node = Node::new(level, steps);
            option.set(node, intrinsic[node]);
        }

        let mut boundary = if american { vec![None; steps] } else { Vec::new() };

        for step in (0..steps).rev() {
            for level in 0..=step {
                let node = Node::new(level, step);
                let continuation = params.continuation(option[node.up()], option[node.down()]);
                let exercise = intrinsic[node];

                let value = if american && exercise > continuation {
                    // Levels ascend with price, so the last hit is the highest
                    boundary[step] = Some(stock[node]);
                    exercise
                } else {
                    continuation
                };
                option.set(node, value);
            }
        }

        Ok(PricingResult::new(
            self.config,
            contract.exercise(),
            params,
            stock,
            option,
            intrinsic,
            boundary,
        ))
    }
}

/// Prices a put at the given resolution.
///
/// Shorthand for `LatticePricer::new(*config).price(contract, market)`.
///
/// # Examples
///
/// ```rust
/// use lattice_core::types::{ContractSpec, ExerciseStyle, LatticeConfig, MarketParams};
/// use lattice_pricing::price;
///
/// let contract = ContractSpec::new(50.0, 5.0 / 12.0, ExerciseStyle::European).unwrap();
/// let market = MarketParams::new(50.0, 0.40, 0.10).unwrap();
///
/// let result = price(&contract, &market, &LatticeConfig::new(5).unwrap()).unwrap();
/// assert!((result.value() - 4.3190).abs() < 1e-4);
/// ```
pub fn price(
    contract: &ContractSpec,
    market: &MarketParams,
    config: &LatticeConfig,
) -> Result<PricingResult, LatticeError> {
    LatticePricer::new(*config).price(contract, market)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lattice_core::types::ExerciseStyle;

    fn reference_inputs(exercise: ExerciseStyle) -> (ContractSpec, MarketParams) {
        (
            ContractSpec::new(50.0, 5.0 / 12.0, exercise).unwrap(),
            MarketParams::new(50.0, 0.40, 0.10).unwrap(),
        )
    }

    fn price_at(exercise: ExerciseStyle, steps: usize) -> PricingResult {
        let (contract, market) = reference_inputs(exercise);
        price(&contract, &market, &LatticeConfig::new(steps).unwrap()).unwrap()
    }

    #[test]
    fn test_american_regression_fixture() {
        let result = price_at(ExerciseStyle::American, 5);
        assert_relative_eq!(result.value(), 4.488458534725916, max_relative = 1e-9);
    }

    #[test]
    fn test_european_regression_fixture() {
        let result = price_at(ExerciseStyle::European, 5);
        assert_relative_eq!(result.value(), 4.319018716515818, max_relative = 1e-9);
    }

    #[test]
    fn test_single_step_by_hand() {
        let result = price_at(ExerciseStyle::European, 1);
        let params = result.parameters();
        let down_payoff = 50.0 - 50.0 * params.down();
        let expected = params.discount() * (1.0 - params.probability()) * down_payoff;
        assert_relative_eq!(result.value(), expected, max_relative = 1e-12);
        assert_relative_eq!(result.value(), 5.268096631662657, max_relative = 1e-9);
    }

    #[test]
    fn test_terminal_column_is_payoff() {
        let result = price_at(ExerciseStyle::American, 7);
        let stock = result.stock_lattice();
        let values = result.value_lattice();
        for level in 0..=7 {
            let node = Node::new(level, 7);
            assert_eq!(values[node], (50.0 - stock[node]).max(0.0));
        }
    }

    #[test]
    fn test_root_stock_price_is_spot() {
        let result = price_at(ExerciseStyle::European, 3);
        assert_eq!(result.stock_lattice()[Node::ROOT], 50.0);
    }

    #[test]
    fn test_padding_stays_zero() {
        let result = price_at(ExerciseStyle::American, 4);
        for lattice in [
            result.stock_lattice(),
            result.value_lattice(),
            result.intrinsic_lattice(),
        ] {
            // Row 4 has a single populated cell at step 4
            assert!(lattice.row(4).unwrap()[..4].iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_american_dominates_intrinsic() {
        let result = price_at(ExerciseStyle::American, 20);
        let values = result.value_lattice();
        let intrinsic = result.intrinsic_lattice();
        for node in values.nodes() {
            assert!(values[node] >= intrinsic[node]);
        }
    }

    #[test]
    fn test_european_has_no_boundary() {
        let result = price_at(ExerciseStyle::European, 10);
        assert!(result.exercise_boundary().is_empty());
        assert!(!result.early_exercise_at_root());
    }

    #[test]
    fn test_american_boundary_below_strike() {
        let result = price_at(ExerciseStyle::American, 50);
        assert_eq!(result.exercise_boundary().len(), 50);
        let exercised: Vec<f64> = result.exercise_boundary().iter().flatten().copied().collect();
        assert!(!exercised.is_empty());
        assert!(exercised.iter().all(|&s| s < 50.0));
    }

    #[test]
    fn test_deep_in_the_money_exercises_at_root() {
        let contract = ContractSpec::new(100.0, 1.0, ExerciseStyle::American).unwrap();
        let market = MarketParams::new(10.0, 0.2, 0.10).unwrap();
        let result = price(&contract, &market, &LatticeConfig::new(10).unwrap()).unwrap();
        assert!(result.early_exercise_at_root());
        assert_relative_eq!(result.value(), 90.0, max_relative = 1e-12);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_lattice_is_allocation_error() {
        // 2^29 steps passes config validation but needs ~2^61 bytes per grid
        let (contract, market) = reference_inputs(ExerciseStyle::American);
        let config = LatticeConfig::new(1 << 29).unwrap();
        let err = price(&contract, &market, &config).unwrap_err();
        match err {
            LatticeError::AllocationFailed { steps, bytes } => {
                assert_eq!(steps, 1 << 29);
                assert_eq!(bytes, config.grid_bytes());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_volatility_fails_without_result() {
        let contract = ContractSpec::new(50.0, 1.0, ExerciseStyle::European).unwrap();
        let market = MarketParams::new(50.0, 0.0, 0.05).unwrap();
        let err = price(&contract, &market, &LatticeConfig::new(10).unwrap()).unwrap_err();
        assert!(matches!(err, LatticeError::DegenerateProbability { .. }));
    }

    #[test]
    fn test_result_carries_config() {
        let result = price_at(ExerciseStyle::American, 12);
        assert_eq!(result.steps(), 12);
        assert_eq!(result.config(), LatticeConfig::new(12).unwrap());
        assert_eq!(result.exercise(), ExerciseStyle::American);
        assert_eq!(result.stock_lattice().size(), 13);
    }
}
