use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::cargo::{step, OnFailure, TARGET};

pub fn run() -> Result<()> {
    println!();
    println!(
        "{}",
        format!("🔍 Checking {} builds...", platform::config::BOARD_NAME).cyan().bold()
    );
    println!();

    let total_start = Instant::now();

    step(
        "Platform crate (no_std, RISC-V)",
        &["check", "-p", "platform", "--target", TARGET],
        OnFailure::Fail,
    )?;
    step(
        "Firmware crate (no_std, RISC-V, defmt)",
        &["check", "-p", "firmware", "--target", TARGET, "--features", "defmt"],
        OnFailure::Fail,
    )?;
    step(
        "Firmware without optional features",
        &["check", "-p", "firmware", "--target", TARGET, "--no-default-features"],
        OnFailure::Fail,
    )?;
    step(
        "Simulator (host)",
        &["check", "-p", "firmware", "--features", "emulator", "--examples"],
        OnFailure::Fail,
    )?;
    step(
        "Clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;
    step(
        "Clippy (firmware without optional features)",
        &[
            "clippy",
            "-p",
            "firmware",
            "--all-targets",
            "--no-default-features",
            "--",
            "-D",
            "warnings",
        ],
        OnFailure::Warn,
    )?;
    if step("Formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?.is_none() {
        eprintln!("     Run 'cargo fmt --all' to fix");
        println!();
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
