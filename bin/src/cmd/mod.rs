//! CLI subcommand modules.
//!
//! This module contains the implementations for all augury CLI subcommands.

use clap::ValueEnum;

pub(crate) mod backtest;
pub(crate) mod outlook;
pub(crate) mod sentiment;

/// How a subcommand prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable report
    Text,
    /// Pretty-printed JSON on stdout
    Json,
}

/// Print the boxed section header used by every text report.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", title);
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Print a value as pretty JSON.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("JSON serialization error: {}", e))?;
    println!("{}", json);
    Ok(())
}
