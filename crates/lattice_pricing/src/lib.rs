//! # Lattice Pricer (Pricer Layer)
//!
//! ## Role
//!
//! lattice_pricing prices vanilla puts on a recombining Cox-Ross-Rubinstein
//! binomial lattice:
//! - Lattice construction and backward induction (`lattice`)
//! - Black-Scholes closed form as the convergence target (`analytical`)
//! - Step-count sweeps for convergence studies (`sweep`)
//!
//! Every pricing call is a pure function of its inputs: it allocates its own
//! `(h + 1) x (h + 1)` lattices and returns an immutable [`PricingResult`].
//!
//! ## Usage Example
//!
//! ```rust
//! use lattice_core::types::{ContractSpec, ExerciseStyle, LatticeConfig, MarketParams};
//! use lattice_pricing::price;
//!
//! let market = MarketParams::new(50.0, 0.40, 0.10).unwrap();
//! let config = LatticeConfig::new(5).unwrap();
//!
//! let american = ContractSpec::new(50.0, 5.0 / 12.0, ExerciseStyle::American).unwrap();
//! let european = american.with_exercise(ExerciseStyle::European);
//!
//! let am = price(&american, &market, &config).unwrap();
//! let eu = price(&european, &market, &config).unwrap();
//!
//! // The early-exercise right is never worth less than nothing
//! assert!(am.value() >= eu.value());
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Run sweeps on the Rayon thread pool
//! - `serde` (default): Serialisation for sweep reports

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod lattice;
pub mod sweep;

// Re-export commonly used items for convenience
pub use lattice::{price, Lattice, LatticePricer, Node, PricingResult, TreeParameters};
pub use sweep::{sweep, StepRange, SweepReport, SweepRequest};
