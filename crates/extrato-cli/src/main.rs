//! CLI for compiling folders of statement exports into normalized tables.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{funds, ledger, pension};

/// Compile Banco do Brasil statement exports into normalized tables
#[derive(Parser)]
#[command(name = "extrato")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile current-account CSV exports
    Ledger(ledger::LedgerArgs),

    /// Compile investment-fund statement dumps
    Funds(funds::FundsArgs),

    /// Compile pension statement dumps
    Pension(pension::PensionArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Ledger(args) => ledger::run(args),
        Commands::Funds(args) => funds::run(args),
        Commands::Pension(args) => pension::run(args),
    }
}
