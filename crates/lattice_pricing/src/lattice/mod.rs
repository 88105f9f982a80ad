//! Binomial lattice construction and backward induction.
//!
//! - `node`: `(level, step)` coordinates and the square value grid
//! - `parameters`: Cox-Ross-Rubinstein factors and risk-neutral probability
//! - `pricer`: The pricing kernel
//! - `result`: Immutable pricing output

pub mod node;
pub mod parameters;
pub mod pricer;
pub mod result;

pub use node::{Lattice, Node};
pub use parameters::TreeParameters;
pub use pricer::{price, LatticePricer};
pub use result::PricingResult;
