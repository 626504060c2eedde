//! CLI entry point for the fintilt rebalancer.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use fintilt::{Money, RebalanceError};
use fintilt_rebalancer::amount::parse_dollars;
use fintilt_rebalancer::commands;
use fintilt_rebalancer::config::Config;
use fintilt_rebalancer::error::Error;
use fintilt_rebalancer::render::OutputFormat;

#[derive(Parser)]
#[command(name = "fin-tilt")]
#[command(about = "Portfolio rebalancer: target allocation vs. current holdings")]
#[command(version)]
struct Cli {
    /// Config file that specifies the desired asset allocation (.yaml or .toml)
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebalance portfolio based on current values in a CSV export
    Rebalance {
        /// Path to the holdings CSV
        holdings: PathBuf,

        /// Additional amount to deposit, in dollars
        #[arg(
            long,
            alias = "toDeposit",
            default_value = "0",
            allow_negative_numbers = true,
            value_parser = parse_dollars
        )]
        to_deposit: Money,
    },

    /// Split a deposit across the target allocation
    Deposit {
        /// Amount to deposit, in dollars
        #[arg(allow_negative_numbers = true, value_parser = parse_dollars)]
        amount: Money,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Command::Rebalance {
            holdings,
            to_deposit,
        } => commands::run_rebalance(&config, &holdings, to_deposit, cli.format, &mut out),
        Command::Deposit { amount } => commands::run_deposit(&config, amount, cli.format, &mut out),
    };
    let result = result.and_then(|()| out.flush().map_err(Error::from));

    if let Err(e) = result {
        eprintln!("Error: {e}");
        let code = match e {
            Error::Rebalance(RebalanceError::ZeroTotal { .. }) => 2,
            _ => 1,
        };
        process::exit(code);
    }
}
