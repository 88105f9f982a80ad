//! Contract, market, configuration and error types.
//!
//! This module provides:
//! - `contract`: Put contract terms and exercise style
//! - `market`: Constant spot, volatility and rate
//! - `config`: Lattice step count
//! - `error`: Structured errors for validation and degenerate lattices
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`ContractSpec`], [`ExerciseStyle`] from `contract`
//! - [`MarketParams`] from `market`
//! - [`LatticeConfig`] from `config`
//! - [`LatticeError`] from `error`

pub mod config;
pub mod contract;
pub mod error;
pub mod market;

pub use config::LatticeConfig;
pub use contract::{ContractSpec, ExerciseStyle, ParseExerciseStyleError};
pub use error::LatticeError;
pub use market::MarketParams;
