//! # lattice_core: Foundation Types for Binomial Lattice Pricing
//!
//! ## Foundation Layer Role
//!
//! lattice_core is the bottom layer of the workspace, providing:
//! - Contract terms: `ContractSpec`, `ExerciseStyle` (`types::contract`)
//! - Market inputs: `MarketParams` (`types::market`)
//! - Lattice resolution: `LatticeConfig` (`types::config`)
//! - Error types: `LatticeError` (`types::error`)
//! - Standard normal CDF (`math::distributions`)
//!
//! ## Zero Dependency Principle
//!
//! This crate has no dependencies on other lattice_* crates and only two
//! external ones:
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use lattice_core::types::{ContractSpec, ExerciseStyle, LatticeConfig, MarketParams};
//!
//! let contract = ContractSpec::new(50.0, 5.0 / 12.0, ExerciseStyle::American).unwrap();
//! let market = MarketParams::new(50.0, 0.40, 0.10).unwrap();
//! let config = LatticeConfig::new(5).unwrap();
//!
//! assert_eq!(contract.strike(), 50.0);
//! assert_eq!(market.volatility(), 0.40);
//! assert_eq!(config.steps(), 5);
//!
//! // Non-positive step counts are rejected before any lattice exists
//! assert!(LatticeConfig::new(0).is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for the value types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
