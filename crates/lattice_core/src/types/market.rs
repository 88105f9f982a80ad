//! Constant market parameters for a single underlying.

use super::error::{require_finite, require_non_negative, require_positive, LatticeError};

/// Immutable market inputs: spot, volatility and risk-free rate.
///
/// Volatility and rate are constant over the life of the contract.
///
/// # Examples
/// ```
/// use lattice_core::types::MarketParams;
///
/// let market = MarketParams::new(50.0, 0.40, 0.10).unwrap();
/// assert_eq!(market.spot(), 50.0);
///
/// // Negative rates are allowed, negative volatility is not
/// assert!(MarketParams::new(50.0, 0.40, -0.01).is_ok());
/// assert!(MarketParams::new(50.0, -0.1, 0.10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarketParams {
    /// Spot price (S0)
    spot: f64,
    /// Volatility (σ)
    volatility: f64,
    /// Continuously compounded risk-free rate (r)
    rate: f64,
}

impl MarketParams {
    /// Creates validated market parameters.
    ///
    /// # Errors
    /// `LatticeError::InvalidParameter` if `spot <= 0`, `volatility < 0`,
    /// or any value is not finite.
    pub fn new(spot: f64, volatility: f64, rate: f64) -> Result<Self, LatticeError> {
        Ok(Self {
            spot: require_positive("spot", spot)?,
            volatility: require_non_negative("volatility", volatility)?,
            rate: require_finite("rate", rate)?,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}
