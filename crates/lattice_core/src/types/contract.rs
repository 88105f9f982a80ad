//! Contract terms for a vanilla put.

use std::fmt;
use std::str::FromStr;

use super::error::{require_positive, LatticeError};

/// Exercise style of the option.
///
/// # Variants
/// - `European`: exercise only at maturity
/// - `American`: exercise at any lattice step up to maturity
///
/// # Examples
/// ```
/// use lattice_core::types::ExerciseStyle;
///
/// let style: ExerciseStyle = "american".parse().unwrap();
/// assert!(style.is_american());
/// assert_eq!(style.to_string(), "American");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// Exercise only at maturity.
    European,
    /// Exercise at any step.
    #[default]
    American,
}

impl ExerciseStyle {
    /// Returns `true` when early exercise is permitted.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Returns the style name.
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "European",
            ExerciseStyle::American => "American",
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error returned when parsing an unknown exercise style.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown exercise style: {0}. Supported: european, american")]
pub struct ParseExerciseStyleError(pub String);

impl FromStr for ExerciseStyle {
    type Err = ParseExerciseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "european" | "eu" => Ok(ExerciseStyle::European),
            "american" | "am" => Ok(ExerciseStyle::American),
            _ => Err(ParseExerciseStyleError(s.to_string())),
        }
    }
}

/// Immutable terms of a vanilla put.
///
/// Fields are private so every instance has passed validation.
///
/// # Examples
/// ```
/// use lattice_core::types::{ContractSpec, ExerciseStyle};
///
/// let put = ContractSpec::new(50.0, 5.0 / 12.0, ExerciseStyle::European).unwrap();
/// assert_eq!(put.payoff(40.0), 10.0);
/// assert_eq!(put.payoff(60.0), 0.0);
///
/// assert!(ContractSpec::new(-1.0, 1.0, ExerciseStyle::European).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContractSpec {
    /// Strike price (K)
    strike: f64,
    /// Maturity in years (T)
    maturity: f64,
    /// Exercise style
    exercise: ExerciseStyle,
}

impl ContractSpec {
    /// Creates a validated put contract.
    ///
    /// # Arguments
    /// * `strike` - Strike price (must be positive)
    /// * `maturity` - Time to maturity in years (must be positive)
    /// * `exercise` - Exercise style
    ///
    /// # Errors
    /// `LatticeError::InvalidParameter` if `strike <= 0` or `maturity <= 0`
    /// (non-finite values are rejected too).
    pub fn new(strike: f64, maturity: f64, exercise: ExerciseStyle) -> Result<Self, LatticeError> {
        Ok(Self {
            strike: require_positive("strike", strike)?,
            maturity: require_positive("maturity", maturity)?,
            exercise,
        })
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the exercise style.
    #[inline]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Returns a copy with a different exercise style.
    pub fn with_exercise(self, exercise: ExerciseStyle) -> Self {
        Self { exercise, ..self }
    }

    /// Put payoff `max(K - S, 0)` at the given stock price.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        (self.strike - spot).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_contract() {
        let c = ContractSpec::new(50.0, 0.5, ExerciseStyle::American).unwrap();
        assert_eq!(c.strike(), 50.0);
        assert_eq!(c.maturity(), 0.5);
        assert_eq!(c.exercise(), ExerciseStyle::American);
    }

    #[test]
    fn test_negative_strike_rejected() {
        let err = ContractSpec::new(-1.0, 0.5, ExerciseStyle::American).unwrap_err();
        assert_eq!(err.parameter(), Some("strike"));
    }

    #[test]
    fn test_zero_maturity_rejected() {
        let err = ContractSpec::new(50.0, 0.0, ExerciseStyle::European).unwrap_err();
        assert_eq!(err.parameter(), Some("maturity"));
    }

    #[test]
    fn test_nan_strike_rejected() {
        assert!(ContractSpec::new(f64::NAN, 1.0, ExerciseStyle::European).is_err());
    }

    #[test]
    fn test_payoff_is_put() {
        let c = ContractSpec::new(50.0, 1.0, ExerciseStyle::European).unwrap();
        assert_eq!(c.payoff(45.0), 5.0);
        assert_eq!(c.payoff(50.0), 0.0);
        assert_eq!(c.payoff(55.0), 0.0);
    }

    #[test]
    fn test_with_exercise() {
        let am = ContractSpec::new(50.0, 1.0, ExerciseStyle::American).unwrap();
        let eu = am.with_exercise(ExerciseStyle::European);
        assert_eq!(eu.exercise(), ExerciseStyle::European);
        assert_eq!(eu.strike(), am.strike());
    }

    #[test]
    fn test_exercise_style_parse() {
        assert_eq!("European".parse(), Ok(ExerciseStyle::European));
        assert_eq!("am".parse(), Ok(ExerciseStyle::American));
        assert!("bermudan".parse::<ExerciseStyle>().is_err());
    }

    #[test]
    fn test_exercise_style_default() {
        assert_eq!(ExerciseStyle::default(), ExerciseStyle::American);
    }
}
