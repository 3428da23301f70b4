//! fx-exchange CLI - currency conversion from the command line
//!
//! ## Example Usage
//!
//! ```bash
//! # Convert an amount
//! fx-exchange convert 100 USD EUR
//!
//! # Compare an amount across currencies
//! fx-exchange compare 1000 USD EUR GBP JPY
//!
//! # Save the current table and load it back later
//! fx-exchange export rates.json
//! fx-exchange --rates-file rates.json rates
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use fx_exchange::{ExchangeEngine, FormatOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// fx-exchange: currency conversion over a static rate table
#[derive(Parser)]
#[command(name = "fx-exchange")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Currency conversion over a static rate table", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Load rates from this snapshot instead of the configured one
    #[arg(short = 'r', long, global = true)]
    rates_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        amount: f64,
        from: String,
        to: String,
    },

    /// Convert an amount into several currencies
    Multi {
        amount: f64,
        from: String,
        /// Target currencies (default: configured targets)
        targets: Vec<String>,
    },

    /// Compare an amount across currencies
    Compare {
        amount: f64,
        base: String,
        /// Currencies to compare (default: configured targets)
        targets: Vec<String>,
    },

    /// Find the currency giving the most units for an amount
    Best {
        amount: f64,
        from: String,
        /// Candidate currencies (default: configured targets)
        targets: Vec<String>,
    },

    /// Format an amount with the currency symbol
    Format {
        amount: f64,
        currency: String,

        /// Print the ISO code instead of the symbol
        #[arg(long)]
        no_symbol: bool,
    },

    /// List every supported currency and its rate
    Rates,

    /// Write the current rates to a JSON snapshot
    Export {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Load a snapshot file and report what it contains
    Import {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    /// Snapshot loaded on start-up when it exists
    #[serde(default)]
    rates_file: Option<PathBuf>,
    #[serde(default = "default_targets")]
    default_targets: Vec<String>,
    #[serde(default = "default_decimal_places")]
    decimal_places: usize,
}

fn default_targets() -> Vec<String> {
    ["EUR", "GBP", "JPY", "CAD"]
        .iter()
        .map(|code| code.to_string())
        .collect()
}

fn default_decimal_places() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rates_file: None,
            default_targets: default_targets(),
            decimal_places: default_decimal_places(),
        }
    }
}

impl Config {
    fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => dirs::home_dir().map(|home| home.join(".fx-exchange").join("config.toml")),
        };

        if let Some(config_path) = path.filter(|p| p.exists()) {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("{} Failed to parse config: {}", "Warning:".yellow(), e);
                    }
                },
                Err(e) => {
                    eprintln!("{} Failed to read config: {}", "Warning:".yellow(), e);
                }
            }
        }

        Config::default()
    }

    fn format_options(&self) -> FormatOptions {
        FormatOptions {
            decimal_places: self.decimal_places,
            ..FormatOptions::default()
        }
    }

    fn targets_or_default(&self, targets: Vec<String>) -> Vec<String> {
        if targets.is_empty() {
            self.default_targets.clone()
        } else {
            targets
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref());

    if let Err(e) = run(cli, config) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = ExchangeEngine::new();

    if let Some(rates_file) = cli.rates_file.as_ref().or(config.rates_file.as_ref()) {
        if rates_file.exists() {
            engine.import_rates(rates_file)?;
        } else {
            log::warn!("Rates file {} not found, using built-in rates", rates_file.display());
        }
    }

    let options = config.format_options();

    match cli.command {
        Commands::Convert { amount, from, to } => {
            let converted = engine.convert(amount, &from, &to)?;
            let target = engine.format_currency_with(converted, &to, &options)?;
            println!(
                "{} = {}",
                engine.format_currency_with(amount, &from, &options)?,
                target.as_str().green()
            );
        }
        Commands::Multi { amount, from, targets } => {
            let targets = config.targets_or_default(targets);
            for (currency, converted) in engine.convert_multiple(amount, &from, &targets)? {
                println!(
                    "  {}",
                    engine.format_currency_with(converted, currency.code(), &options)?
                );
            }
        }
        Commands::Compare { amount, base, targets } => {
            let targets = config.targets_or_default(targets);
            for row in engine.compare_currencies(amount, &base, &targets)? {
                println!(
                    "  {}: {} (Rate: {:.4})",
                    row.currency.code().bold(),
                    row.formatted,
                    row.rate
                );
            }
        }
        Commands::Best { amount, from, targets } => {
            let targets = config.targets_or_default(targets);
            let best = engine.find_best_exchange(amount, &from, &targets)?;
            println!(
                "Best option: {} at rate {:.4}",
                best.formatted.as_str().green().bold(),
                best.rate
            );
        }
        Commands::Format {
            amount,
            currency,
            no_symbol,
        } => {
            let options = FormatOptions {
                include_symbol: !no_symbol,
                ..options
            };
            println!("{}", engine.format_currency_with(amount, &currency, &options)?);
        }
        Commands::Rates => {
            println!(
                "{} (base {}, updated {})",
                "Exchange rates".bold(),
                engine.base_currency(),
                engine.last_updated().to_rfc3339()
            );
            for (currency, rate) in engine.get_all_rates() {
                println!(
                    "  {} {:>12.4}  {} ({})",
                    currency.code().cyan(),
                    rate,
                    currency.name(),
                    currency.symbol()
                );
            }
        }
        Commands::Export { path } => {
            engine.export_rates(&path)?;
            println!("{} Exported rates to {}", "✓".green(), path.display());
        }
        Commands::Import { path } => {
            engine.import_rates(&path)?;
            println!(
                "{} Loaded {} currencies (base {}) from {}",
                "✓".green(),
                engine.supported_currencies().len(),
                engine.base_currency(),
                path.display()
            );
        }
    }

    Ok(())
}
