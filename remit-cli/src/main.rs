//! Remit CLI - atomic account transfers from the terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{close, fault, open, show, transfer};

/// Remit - move money between accounts, all or nothing
#[derive(Parser)]
#[command(name = "remit", version, about, long_about = None)]
struct Cli {
    /// Log every transaction step to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a new account
    Open {
        /// Account ID
        id: String,
        /// Opening balance in minor units
        #[arg(allow_negative_numbers = true)]
        balance: i64,
    },

    /// Show one account, or all of them
    Show {
        /// Account ID (lists every account if omitted)
        id: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transfer money between two accounts
    Transfer {
        /// Source account ID
        from: String,
        /// Destination account ID
        to: String,
        /// Amount in minor units
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Close (delete) an account
    Close {
        /// Account ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Show or change the fault-injection sentinel
    Fault {
        /// Reject transfers to this account ID after the debit
        #[arg(long, conflicts_with = "off")]
        sentinel: Option<String>,
        /// Disable fault injection
        #[arg(long)]
        off: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Open { id, balance } => open::run(&id, balance),
        Commands::Show { id, json } => show::run(id.as_deref(), json),
        Commands::Transfer { from, to, amount, json } => transfer::run(&from, &to, amount, json),
        Commands::Close { id, force } => close::run(&id, force),
        Commands::Fault { sentinel, off } => fault::run(sentinel, off),
    }
}
