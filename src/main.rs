// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Drell-Yan Monte Carlo
//!
//! Estimates the leading-order γγ → ℓ⁺ℓ⁻ cross section, binned in the
//! absolute rapidity of the lepton pair.
//!
//! # Usage
//!
//! ```bash
//! # Run with the default Z-peak setup
//! drell-yan-mc run
//!
//! # More points, four worker streams, JSON output
//! drell-yan-mc run --calls 10000000 --workers 4 --format json
//!
//! # Convergence scan over N = 10^3 .. 10^6
//! drell-yan-mc scan --from 3 --to 6
//!
//! # Custom config
//! drell-yan-mc --config /path/to/config.yaml validate
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use drell_yan_mc::integrator::{ConvergenceScan, Integrator};
use drell_yan_mc::{config::Config, Result, VERSION};

/// Leading-order photon-initiated Drell-Yan cross sections
#[derive(Parser)]
#[command(name = "drell-yan-mc")]
#[command(author = "Drell-Yan MC Contributors")]
#[command(version = VERSION)]
#[command(about = "Monte Carlo estimate of the γγ → ℓ⁺ℓ⁻ rapidity distribution")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file.
    /// RUST_LOG, when set, takes precedence over both
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the integration
    Run {
        /// Number of phase-space points
        #[arg(short = 'n', long, env = "DYMC_CALLS")]
        calls: Option<u64>,

        /// Generator seed
        #[arg(long, env = "DYMC_SEED")]
        seed: Option<u64>,

        /// Independent worker streams
        #[arg(short, long, env = "DYMC_WORKERS")]
        workers: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Convergence scan over N = 10^k
    Scan {
        /// Smallest exponent
        #[arg(long, default_value_t = 3)]
        from: u32,

        /// Largest exponent
        #[arg(long, default_value_t = 6)]
        to: u32,
    },

    /// Show effective configuration
    Config,

    /// Validate configuration file
    Validate,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Yaml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging.level, &config.logging.format);

    match cli.command {
        Commands::Run {
            calls,
            seed,
            workers,
            format,
        } => {
            // Override config with CLI args
            if let Some(calls) = calls {
                config.run.calls = calls;
            }
            if let Some(seed) = seed {
                config.run.seed = seed;
            }
            if let Some(workers) = workers {
                config.run.workers = workers;
            }

            let integrator = Integrator::from_config(&config)?;
            info!(version = VERSION, "Starting drell-yan-mc");
            let result = integrator.run()?;

            match format {
                OutputFormat::Table => print!("{}", result.to_table()),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&result)?),
            }
        }

        Commands::Scan { from, to } => {
            let integrator = Integrator::from_config(&config)?;
            let scan = ConvergenceScan::run(&integrator, from..=to)?;
            print!("{}", scan.to_table());
        }

        Commands::Config => {
            // Show effective configuration
            println!("{}", serde_yaml::to_string(&config)?);
        }

        Commands::Validate => match config.validate() {
            Ok(()) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Initialize logging with tracing.
///
/// A `RUST_LOG` filter wins over `level`.
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    // Results go to stdout, logs to stderr
    if format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
