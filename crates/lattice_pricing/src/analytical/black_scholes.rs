//! Black-Scholes closed form for the European put.
//!
//! ## Mathematical Formulas
//!
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The lattice price of a European put converges to this value as the
//! step count grows.

use lattice_core::math::norm_cdf;
use lattice_core::types::{ContractSpec, LatticeError, MarketParams};

/// Black-Scholes model with constant spot, rate and volatility.
///
/// # Examples
/// ```
/// use lattice_pricing::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(50.0, 0.10, 0.40).unwrap();
/// let put = bs.price_put(50.0, 5.0 / 12.0);
/// assert!((put - 4.076).abs() < 1e-3);
///
/// // The closed form needs strictly positive volatility
/// assert!(BlackScholes::new(50.0, 0.10, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholes {
    /// Creates a Black-Scholes model.
    ///
    /// # Errors
    /// `LatticeError::InvalidParameter` if `spot <= 0`, `volatility <= 0`,
    /// or `rate` is not finite.
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, LatticeError> {
        if !(spot > 0.0 && spot.is_finite()) {
            return Err(LatticeError::InvalidParameter {
                name: "spot",
                value: spot,
                constraint: "must be finite and positive",
            });
        }
        if !(volatility > 0.0 && volatility.is_finite()) {
            return Err(LatticeError::InvalidParameter {
                name: "volatility",
                value: volatility,
                constraint: "must be finite and positive for the closed form",
            });
        }
        if !rate.is_finite() {
            return Err(LatticeError::InvalidParameter {
                name: "rate",
                value: rate,
                constraint: "must be finite",
            });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Creates a model from validated market parameters.
    ///
    /// # Errors
    /// `LatticeError::InvalidParameter` if the volatility is zero.
    pub fn from_market(market: &MarketParams) -> Result<Self, LatticeError> {
        Self::new(market.spot(), market.rate(), market.volatility())
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let drift = (self.rate + 0.5 * self.volatility * self.volatility) * expiry;
        ((self.spot / strike).ln() + drift) / vol_sqrt_t
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European put price.
    ///
    /// Returns intrinsic value when `expiry` is not positive.
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= 0.0 {
            return (strike - self.spot).max(0.0);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        // P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
        strike * discount * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
    }
}

/// Closed-form European put value for a contract.
///
/// The contract's exercise style is ignored: American contracts get the
/// European value, which is a lower bound for them.
///
/// # Errors
/// `LatticeError::InvalidParameter` if the market volatility is zero.
pub fn european_put(contract: &ContractSpec, market: &MarketParams) -> Result<f64, LatticeError> {
    let bs = BlackScholes::from_market(market)?;
    Ok(bs.price_put(contract.strike(), contract.maturity()))
}
