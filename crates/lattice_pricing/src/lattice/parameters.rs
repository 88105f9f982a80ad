//! Per-step tree parameters derived from contract, market and resolution.
//!
//! ## Formulas
//!
//! - dt = T / h
//! - u = exp(σ√dt), d = exp(-σ√dt)
//! - a = exp(r·dt)
//! - p = (a - d) / (u - d)
//!
//! `p` must lie in `[0, 1]`; otherwise discounted expectations lose their
//! probabilistic meaning and derivation fails with
//! `LatticeError::DegenerateProbability`.

use lattice_core::types::{ContractSpec, LatticeConfig, LatticeError, MarketParams};

use super::node::Node;

/// Cox-Ross-Rubinstein parameters for one lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TreeParameters {
    /// Number of time steps
    steps: usize,
    /// Time step in years
    dt: f64,
    /// Up factor u
    up: f64,
    /// Down factor d = 1/u
    down: f64,
    /// Per-step growth factor a = exp(r·dt)
    growth: f64,
    /// Risk-neutral up-probability p
    probability: f64,
    /// Per-step discount factor exp(-r·dt)
    discount: f64,
}

impl TreeParameters {
    /// Derives the tree parameters.
    ///
    /// # Errors
    /// `LatticeError::DegenerateProbability` when `p` is not finite or falls
    /// outside `[0, 1]`. Zero volatility always lands here since `u == d`.
    ///
    /// # Examples
    /// ```
    /// use lattice_core::types::{ContractSpec, ExerciseStyle, LatticeConfig, MarketParams};
    /// use lattice_pricing::lattice::TreeParameters;
    ///
    /// let contract = ContractSpec::new(50.0, 5.0 / 12.0, ExerciseStyle::American).unwrap();
    /// let market = MarketParams::new(50.0, 0.40, 0.10).unwrap();
    /// let config = LatticeConfig::new(5).unwrap();
    ///
    /// let params = TreeParameters::derive(&contract, &market, &config).unwrap();
    /// assert!((params.up() - 1.1224).abs() < 1e-4);
    /// assert!((params.down() - 0.8909).abs() < 1e-4);
    /// assert!((params.probability() - 0.5073).abs() < 1e-4);
    /// ```
    pub fn derive(
        contract: &ContractSpec,
        market: &MarketParams,
        config: &LatticeConfig,
    ) -> Result<Self, LatticeError> {
        let steps = config.steps();
        let dt = config.time_step(contract.maturity());
        let jump = market.volatility() * dt.sqrt();
        let up = jump.exp();
        let down = (-jump).exp();
        let growth = (market.rate() * dt).exp();
        let probability = (growth - down) / (up - down);

        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(LatticeError::DegenerateProbability { probability, steps });
        }

        Ok(Self {
            steps,
            dt,
            up,
            down,
            growth,
            probability,
            discount: (-market.rate() * dt).exp(),
        })
    }

    /// Returns the number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the time step in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the up factor.
    #[inline]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Returns the down factor.
    #[inline]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Returns the per-step growth factor.
    #[inline]
    pub fn growth(&self) -> f64 {
        self.growth
    }

    /// Returns the risk-neutral up-probability.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Returns the per-step discount factor.
    #[inline]
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Stock price `S0 · u^level · d^(step - level)` at `node`.
    ///
    /// Depends only on the coordinate, so the lattice recombines.
    #[inline]
    pub fn stock_price(&self, spot: f64, node: Node) -> f64 {
        spot * self.up.powi(node.level as i32) * self.down.powi(node.down_moves() as i32)
    }

    /// Undiscounted risk-neutral expectation of the two successors.
    #[inline]
    pub fn expectation(&self, up_value: f64, down_value: f64) -> f64 {
        self.probability * up_value + (1.0 - self.probability) * down_value
    }

    /// Discounted risk-neutral expectation: the continuation value.
    #[inline]
    pub fn continuation(&self, up_value: f64, down_value: f64) -> f64 {
        self.discount * self.expectation(up_value, down_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lattice_core::types::ExerciseStyle;

    fn derive(volatility: f64, rate: f64, steps: usize) -> Result<TreeParameters, LatticeError> {
        let contract = ContractSpec::new(50.0, 5.0 / 12.0, ExerciseStyle::American).unwrap();
        let market = MarketParams::new(50.0, volatility, rate).unwrap();
        let config = LatticeConfig::new(steps).unwrap();
        TreeParameters::derive(&contract, &market, &config)
    }

    #[test]
    fn test_reference_parameters() {
        let params = derive(0.40, 0.10, 5).unwrap();
        assert_relative_eq!(params.dt(), 1.0 / 12.0, max_relative = 1e-12);
        assert_relative_eq!(params.up(), 1.1224009024456676, max_relative = 1e-12);
        assert_relative_eq!(params.down(), 0.8909472522884108, max_relative = 1e-12);
        assert_relative_eq!(params.probability(), 0.5073192833176614, max_relative = 1e-12);
    }

    #[test]
    fn test_symmetric_factors() {
        let params = derive(0.25, 0.03, 40).unwrap();
        assert_relative_eq!(params.up() * params.down(), 1.0, max_relative = 1e-14);
    }

    #[test]
    fn test_zero_volatility_is_degenerate() {
        let err = derive(0.0, 0.10, 5).unwrap_err();
        assert!(matches!(err, LatticeError::DegenerateProbability { steps: 5, .. }));
    }

    #[test]
    fn test_large_rate_is_degenerate() {
        // a = exp(r dt) above u once r dt exceeds σ√dt
        let err = derive(0.01, 2.0, 1).unwrap_err();
        match err {
            LatticeError::DegenerateProbability { probability, .. } => assert!(probability > 1.0),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_rate_below_down_is_degenerate() {
        let err = derive(0.01, -2.0, 1).unwrap_err();
        match err {
            LatticeError::DegenerateProbability { probability, .. } => assert!(probability < 0.0),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_discount_not_above_one_for_non_negative_rate() {
        let params = derive(0.40, 0.0, 10).unwrap();
        assert_eq!(params.discount(), 1.0);
        let params = derive(0.40, 0.10, 10).unwrap();
        assert!(params.discount() < 1.0);
        assert!(params.continuation(3.0, 1.0) <= params.expectation(3.0, 1.0));
    }

    #[test]
    fn test_stock_price_recombines() {
        let params = derive(0.40, 0.10, 5).unwrap();
        // up then down equals down then up
        let via_up = 50.0 * params.up() * params.down();
        let via_down = 50.0 * params.down() * params.up();
        let direct = params.stock_price(50.0, Node::new(1, 2));
        assert_relative_eq!(direct, via_up, max_relative = 1e-12);
        assert_relative_eq!(direct, via_down, max_relative = 1e-12);
    }
}
