use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let start = Instant::now();

    // The platform mocks are part of the documented API on the host.
    let mut cmd = Command::new("cargo");
    cmd.args(["doc", "--workspace", "--no-deps", "--features", "platform/std"]);

    if open {
        cmd.arg("--open");
    }

    let status = cmd.status().context("Failed to build documentation")?;
    if !status.success() {
        eprintln!("{}", "✗ Documentation build failed".red().bold());
        anyhow::bail!("Documentation build failed");
    }

    println!(
        "{}",
        format!("✓ Documentation built in {:.2}s", start.elapsed().as_secs_f64()).green()
    );

    if !open {
        println!();
        println!(
            "   {}",
            "Open target/doc/firmware/index.html in your browser".dimmed()
        );
        println!("   {}", "Or run 'cargo run -p xtask -- doc --open'".dimmed());
    }

    println!();

    Ok(())
}
