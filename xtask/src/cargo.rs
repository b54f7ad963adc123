use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// Target triple of the ESP32-C3 (RV32IMC, no atomics).
pub const TARGET: &str = "riscv32imc-unknown-none-elf";

/// How a failing step affects the task.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Abort the task
    Fail,
    /// Print a warning and carry on
    Warn,
}

/// Run `cargo <args>` as one reported step.
///
/// Returns the captured output when the step succeeded.
pub fn step(label: &str, args: &[&str], on_failure: OnFailure) -> Result<Option<Output>> {
    println!("{}", format!("  {label}...").cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;

    if output.status.success() {
        println!(
            "{}",
            format!("  ✓ {label} passed in {:.2}s", start.elapsed().as_secs_f64()).green()
        );
        println!();
        return Ok(Some(output));
    }

    match on_failure {
        OnFailure::Fail => {
            eprintln!("{}", format!("  ✗ {label} failed").red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stdout));
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("{label} failed");
        }
        OnFailure::Warn => {
            eprintln!("{}", format!("  ⚠ {label} reported problems").yellow().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            println!();
            Ok(None)
        }
    }
}

/// Sum the `test result:` lines of a `cargo test` run.
pub fn test_summary(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let (mut passed, mut failed, mut ignored) = (0_u32, 0_u32, 0_u32);
    let mut found = false;

    // "test result: ok. 5 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out"
    for line in stdout.lines().filter(|l| l.contains("test result:")) {
        found = true;
        for part in line.split(';') {
            let mut words = part.split_whitespace().rev();
            let (Some(kind), Some(count)) = (words.next(), words.next()) else {
                continue;
            };
            let Ok(count) = count.parse::<u32>() else {
                continue;
            };
            match kind {
                "passed" => passed = passed.saturating_add(count),
                "failed" => failed = failed.saturating_add(count),
                "ignored" => ignored = ignored.saturating_add(count),
                _ => {}
            }
        }
    }

    if found {
        format!("({passed} passed, {failed} failed, {ignored} ignored)")
    } else {
        "(summary not available)".to_string()
    }
}
