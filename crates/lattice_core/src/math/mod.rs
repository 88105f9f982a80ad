//! Mathematical helpers.
//!
//! - `distributions`: Standard normal CDF used by the closed-form reference

pub mod distributions;

pub use distributions::norm_cdf;
