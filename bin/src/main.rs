//! augury CLI binary.
//!
//! Backtests a price forecast against buy-and-hold and prints the dashboard
//! summaries that go with it.

mod cmd;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::OutputFormat;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "augury")]
#[command(about = "Backtest a price forecast against buy-and-hold", long_about = None)]
#[command(version)]
struct Cli {
    /// Log evaluation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trade the forecast signal and compare with buy-and-hold
    Backtest {
        /// CSV of daily closes (columns: date, close)
        #[arg(long)]
        history: PathBuf,

        /// CSV of model predictions (columns: date, predicted_close)
        #[arg(long)]
        forecast: PathBuf,

        /// Initial capital
        #[arg(long, env = "AUGURY_INITIAL_CAPITAL")]
        capital: Option<f64>,

        /// Commission per unit of position change, as a fraction
        #[arg(long, env = "AUGURY_COMMISSION_RATE")]
        commission: Option<f64>,

        /// Fail if the forecast does not cover every historical date
        #[arg(long)]
        strict: bool,

        /// JSON file with backtest configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the daily cumulative returns to this CSV file
        #[arg(long)]
        returns_out: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show where the forecast ends relative to the last close
    Outlook {
        /// CSV of daily closes (columns: date, close)
        #[arg(long)]
        history: PathBuf,

        /// CSV of model predictions (columns: date, predicted_close)
        #[arg(long)]
        forecast: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Aggregate entity sentiment over a batch of news articles
    Sentiment {
        /// JSON file of articles, either an array or `{"data": [...]}`
        #[arg(long)]
        news: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "augury=debug" } else { "augury=info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Backtest {
            history,
            forecast,
            capital,
            commission,
            strict,
            config,
            returns_out,
            format,
        } => {
            let config =
                cmd::backtest::resolve_config(config.as_deref(), capital, commission, strict)?;
            cmd::backtest::run_backtest(
                &history,
                &forecast,
                config,
                returns_out.as_deref(),
                format,
            )?;
        }
        Commands::Outlook {
            history,
            forecast,
            format,
        } => {
            cmd::outlook::show_outlook(&history, &forecast, format)?;
        }
        Commands::Sentiment { news, format } => {
            cmd::sentiment::show_sentiment(&news, format)?;
        }
    }

    Ok(())
}
