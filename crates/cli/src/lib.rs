pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use trellis_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "trellis",
    about = "Trellis operator CLI",
    long_about = "Operate Trellis intake readiness, config inspection, and offline quoting.",
    after_help = "Examples:\n  trellis doctor --json\n  trellis config\n  trellis quote --cart cart.toml --miles 12.5"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, the maintenance flag, pricing tables, and email readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Price a cart file offline and print the full breakdown")]
    Quote {
        #[arg(long, help = "Path to a TOML cart file with [[item]] and [installation] tables")]
        cart: PathBuf,
        #[arg(
            long,
            help = "One-way delivery distance in miles; omitted means distance is unavailable"
        )]
        miles: Option<Decimal>,
        #[arg(long, help = "Emit the quote as JSON instead of the human breakdown")]
        json: bool,
    },
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;
    use trellis_core::config::LogFormat::*;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Commands report config problems themselves; logging just falls back
    // to defaults when the config does not load.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Quote { cart, miles, json } => commands::quote::run(&cart, miles, json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
