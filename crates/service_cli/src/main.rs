//! Lattice CLI - binomial lattice pricing for vanilla puts
//!
//! # Commands
//!
//! - `lattice price` - Price one put at a fixed step count
//! - `lattice sweep` - Price across a range of step counts and compare
//!   against Black-Scholes
//! - `lattice check` - Validate the configuration and run a self-test
//!
//! Parameters come from `lattice.toml` (if present), then `LATTICE_*`
//! environment variables, then command-line flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::{CliConfig, Overrides};
use output::OutputFormat;

/// Binomial lattice put pricer
#[derive(Parser)]
#[command(name = "lattice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "lattice.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one put on the lattice
    Price {
        #[command(flatten)]
        overrides: Overrides,

        /// Number of lattice steps (h)
        #[arg(short = 'n', long)]
        steps: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also print the early-exercise boundary
        #[arg(short, long)]
        boundary: bool,
    },

    /// Price across a range of step counts
    Sweep {
        #[command(flatten)]
        overrides: Overrides,

        /// First step count
        #[arg(long)]
        start: Option<usize>,

        /// Last step count (inclusive)
        #[arg(long)]
        end: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write results to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check configuration and run a pricing self-test
    Check,
}

fn init_tracing(verbose: bool, log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { log_level })
    });

    // Logs go to stderr so CSV and JSON on stdout stay clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_or_default(&cli.config)?.with_env_override()?;
    init_tracing(cli.verbose, &config.log_level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Price {
            overrides,
            steps,
            format,
            boundary,
        } => {
            let mut config = config.with_overrides(&overrides);
            if let Some(steps) = steps {
                config.lattice.steps = steps;
            }
            config.validate()?;
            commands::price::run(&config, format, boundary)
        }
        Commands::Sweep {
            overrides,
            start,
            end,
            format,
            output,
        } => {
            let mut config = config.with_overrides(&overrides);
            if let Some(start) = start {
                config.sweep.start = start;
            }
            if let Some(end) = end {
                config.sweep.end = end;
            }
            config.validate()?;
            commands::sweep::run(&config, format, output.as_deref())
        }
        Commands::Check => commands::check::run(&cli.config, &config),
    }
}
