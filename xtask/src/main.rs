// Desktop/tooling crate: unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod cargo;
mod check;
mod doc;
mod sim;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "ESP32-C3 SuperMini voice board development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the no_std target build, the simulator build, clippy and formatting
    Check,
    /// Run all tests (unit, integration, and doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Build and optionally open documentation
    Doc {
        /// Open documentation in browser
        #[arg(long)]
        open: bool,
    },
    /// Run the board simulator on the host
    Sim {
        /// Log filter passed as RUST_LOG (e.g. `debug`, `firmware=trace`)
        #[arg(long, default_value = "info")]
        log: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Doc { open } => doc::run(open),
        Commands::Sim { log } => sim::run(&log),
    }
}
