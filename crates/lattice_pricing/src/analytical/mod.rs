//! Analytical (closed-form) solutions for option pricing.
//!
//! Used as convergence targets for lattice sweeps.
//!
//! # Available Solutions
//!
//! - **European Put**: Black-Scholes (1973) closed form
//!
//! # Usage
//!
//! ```rust
//! use lattice_core::types::{ContractSpec, ExerciseStyle, MarketParams};
//! use lattice_pricing::analytical::european_put;
//!
//! let contract = ContractSpec::new(50.0, 5.0 / 12.0, ExerciseStyle::European).unwrap();
//! let market = MarketParams::new(50.0, 0.40, 0.10).unwrap();
//!
//! let reference = european_put(&contract, &market).unwrap();
//! assert!(reference > 0.0 && reference < 50.0);
//! ```

pub mod black_scholes;

pub use black_scholes::{european_put, BlackScholes};
