mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::CalculatorArgs;
use commands::market::MarketArgs;
use commands::scenarios::ScenariosArgs;

/// Rent-to-own mortgage affordability analysis
#[derive(Parser)]
#[command(
    name = "rto",
    version,
    about = "Rent-to-own mortgage affordability analysis",
    long_about = "Estimates how long a renter needs to accumulate a down payment from \
                  rent credited toward equity, the resulting mortgage ratios and stress \
                  test, a 0-100 qualification score and a 36-month equity projection. \
                  All arithmetic uses decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "rent_to_own_core=trace")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Full affordability analysis with equity schedule
    Affordability(CalculatorArgs),
    /// Check calculator input and list every violated rule
    Validate(CalculatorArgs),
    /// Compare rent-to-equity levels side by side
    Scenarios(ScenariosArgs),
    /// Derive yield metrics and indicator scores from a market snapshot
    Market(MarketArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Affordability(args) => commands::affordability::run_affordability(args),
        Commands::Validate(args) => commands::affordability::run_validate(args),
        Commands::Scenarios(args) => commands::scenarios::run_scenarios(args),
        Commands::Market(args) => commands::market::run_market(args),
        Commands::Version => {
            println!("rto {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
