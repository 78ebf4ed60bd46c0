//! tallyup - settle a shared-expense snapshot
//!
//! Usage:
//! ```bash
//! tallyup trip.json
//! tallyup trip.json --format json
//! tallyup trip.json --empty-beneficiaries split-among-all
//! ```

#![warn(clippy::uninlined_format_args)]

mod bootstrap;

use bootstrap::{AppConfig, OutputFormat};
use clap::Parser;
use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};
use tallyup_application::EmptyBeneficiaryPolicy;

/// Computes net balances for a group and the transfers that settle them.
#[derive(Parser)]
#[command(name = "tallyup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Snapshot file with participants and expenses
    snapshot: PathBuf,

    /// Output format (overrides TALLYUP_OUTPUT_FORMAT)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Handling of expenses without beneficiaries: credit-payer, split-among-all or reject
    /// (overrides TALLYUP_EMPTY_BENEFICIARIES)
    #[arg(long, value_name = "POLICY")]
    empty_beneficiaries: Option<EmptyBeneficiaryPolicy>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    bootstrap::init_logging();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?.with_overrides(cli.format, cli.empty_beneficiaries);
    let output = bootstrap::run(&cli.snapshot, config)?;
    io::stdout().lock().write_all(output.as_bytes())?;
    Ok(())
}
