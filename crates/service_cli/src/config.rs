//! CLI configuration management
//!
//! Loads pricing parameters from a TOML file, applies `LATTICE_*`
//! environment variable overrides, then command-line flags. Every field has
//! a default reproducing the reference scenario, so a missing file is not an
//! error.

use std::path::Path;

use clap::Args;
use lattice_core::types::{ContractSpec, ExerciseStyle, LatticeConfig, LatticeError, MarketParams};
use lattice_pricing::sweep::{RangeError, StepRange, DEFAULT_END, DEFAULT_START};
use serde::Deserialize;
use thiserror::Error;

/// Log levels accepted in the configuration file.
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for environment variable {name}")]
    Env { name: &'static str, value: String },

    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Contract section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContractSettings {
    pub strike: f64,
    /// Maturity in years
    pub maturity: f64,
    pub exercise: ExerciseStyle,
}

impl Default for ContractSettings {
    fn default() -> Self {
        Self {
            strike: 50.0,
            maturity: 5.0 / 12.0,
            exercise: ExerciseStyle::American,
        }
    }
}

/// Market section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarketSettings {
    pub spot: f64,
    pub volatility: f64,
    pub rate: f64,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            spot: 50.0,
            volatility: 0.40,
            rate: 0.10,
        }
    }
}

/// Lattice section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LatticeSettings {
    pub steps: usize,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self { steps: 5 }
    }
}

/// Sweep section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    pub start: usize,
    /// Inclusive
    pub end: usize,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
        }
    }
}

/// Full CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Display label for the underlying
    #[serde(default = "default_ticker")]
    pub ticker: String,

    #[serde(default)]
    pub contract: ContractSettings,

    #[serde(default)]
    pub market: MarketSettings,

    #[serde(default)]
    pub lattice: LatticeSettings,

    #[serde(default)]
    pub sweep: SweepSettings,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_ticker() -> String {
    "MSFT".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            ticker: default_ticker(),
            contract: ContractSettings::default(),
            market: MarketSettings::default(),
            lattice: LatticeSettings::default(),
            sweep: SweepSettings::default(),
        }
    }
}

/// Command-line overrides for individual parameters
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Underlying label (display only)
    #[arg(long)]
    pub ticker: Option<String>,

    /// Strike price (K)
    #[arg(short = 'k', long)]
    pub strike: Option<f64>,

    /// Maturity in years (T)
    #[arg(short = 't', long)]
    pub maturity: Option<f64>,

    /// Spot price (S0)
    #[arg(short = 's', long)]
    pub spot: Option<f64>,

    /// Volatility (sigma)
    #[arg(long, allow_negative_numbers = true)]
    pub volatility: Option<f64>,

    /// Risk-free rate (r)
    #[arg(short = 'r', long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Exercise style (european, american)
    #[arg(long)]
    pub style: Option<ExerciseStyle>,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `LATTICE_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ticker) = lookup("LATTICE_TICKER") {
            self.ticker = ticker;
        }
        if let Some(level) = lookup("LATTICE_LOG_LEVEL") {
            self.log_level = level;
        }

        let float = |name: &'static str| -> Result<Option<f64>, ConfigError> {
            lookup(name)
                .map(|value| {
                    value
                        .trim()
                        .parse::<f64>()
                        .map_err(|_| ConfigError::Env { name, value })
                })
                .transpose()
        };

        if let Some(strike) = float("LATTICE_STRIKE")? {
            self.contract.strike = strike;
        }
        if let Some(maturity) = float("LATTICE_MATURITY")? {
            self.contract.maturity = maturity;
        }
        if let Some(spot) = float("LATTICE_SPOT")? {
            self.market.spot = spot;
        }
        if let Some(volatility) = float("LATTICE_VOLATILITY")? {
            self.market.volatility = volatility;
        }
        if let Some(rate) = float("LATTICE_RATE")? {
            self.market.rate = rate;
        }

        if let Some(value) = lookup("LATTICE_STEPS") {
            self.lattice.steps = value.trim().parse().map_err(|_| ConfigError::Env {
                name: "LATTICE_STEPS",
                value,
            })?;
        }
        if let Some(value) = lookup("LATTICE_EXERCISE") {
            self.contract.exercise = value.parse().map_err(|_| ConfigError::Env {
                name: "LATTICE_EXERCISE",
                value,
            })?;
        }

        Ok(self)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(ticker) = &overrides.ticker {
            self.ticker = ticker.clone();
        }
        if let Some(strike) = overrides.strike {
            self.contract.strike = strike;
        }
        if let Some(maturity) = overrides.maturity {
            self.contract.maturity = maturity;
        }
        if let Some(spot) = overrides.spot {
            self.market.spot = spot;
        }
        if let Some(volatility) = overrides.volatility {
            self.market.volatility = volatility;
        }
        if let Some(rate) = overrides.rate {
            self.market.rate = rate;
        }
        if let Some(style) = overrides.style {
            self.contract.exercise = style;
        }
        self
    }

    /// Validated contract terms
    pub fn contract_spec(&self) -> Result<ContractSpec, LatticeError> {
        ContractSpec::new(
            self.contract.strike,
            self.contract.maturity,
            self.contract.exercise,
        )
    }

    /// Validated market parameters
    pub fn market_params(&self) -> Result<MarketParams, LatticeError> {
        MarketParams::new(self.market.spot, self.market.volatility, self.market.rate)
    }

    /// Validated lattice resolution
    pub fn lattice_config(&self) -> Result<LatticeConfig, LatticeError> {
        LatticeConfig::new(self.lattice.steps)
    }

    /// Validated sweep range
    pub fn step_range(&self) -> Result<StepRange, RangeError> {
        StepRange::new(self.sweep.start, self.sweep.end)
    }

    /// Validate the configuration, collecting every problem
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.ticker.trim().is_empty() {
            errors.push("ticker cannot be empty".to_string());
        }

        if let Err(e) = self.contract_spec() {
            errors.push(e.to_string());
        }
        if let Err(e) = self.market_params() {
            errors.push(e.to_string());
        }
        if let Err(e) = self.lattice_config() {
            errors.push(e.to_string());
        }
        if let Err(e) = self.step_range() {
            errors.push(e.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}
