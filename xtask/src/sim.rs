use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;

/// Run the host simulator with `log` as the tracing filter.
///
/// Output streams straight to the terminal; the simulator prints its own
/// tracing log.
pub fn run(log: &str) -> Result<()> {
    println!();
    println!(
        "{}",
        format!("▶ Simulating {}", platform::config::BOARD_NAME).cyan().bold()
    );
    println!();

    let status = Command::new("cargo")
        .args([
            "run",
            "-p",
            "firmware",
            "--example",
            "board_simulator",
            "--features",
            "emulator",
        ])
        .env("RUST_LOG", log)
        .status()
        .context("Failed to start the simulator")?;

    if !status.success() {
        eprintln!("{}", "✗ Simulator exited with an error".red().bold());
        anyhow::bail!("Simulator failed");
    }
    Ok(())
}
