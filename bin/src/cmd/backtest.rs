//! Backtest command implementation.

use crate::cmd::{OutputFormat, banner, print_json};
use crate::data;
use anyhow::Result;
use augury::eval::{AlignmentPolicy, Backtest, BacktestConfig, PerformanceSummary};
use std::path::Path;
use tracing::info;

/// Build the backtest configuration from its layered sources.
///
/// Defaults, then the JSON config file, then capital and commission from the
/// environment or flags (clap resolves those two), then `--strict`.
pub(crate) fn resolve_config(
    config_path: Option<&Path>,
    capital: Option<f64>,
    commission: Option<f64>,
    strict: bool,
) -> Result<BacktestConfig> {
    let mut config = match config_path {
        Some(path) => data::load_config(path)?,
        None => BacktestConfig::default(),
    };

    if let Some(capital) = capital {
        config.initial_capital = capital;
    }
    if let Some(commission) = commission {
        config.commission_rate = commission;
    }
    if strict {
        config.alignment = AlignmentPolicy::Strict;
    }

    config.validate()?;
    Ok(config)
}

/// Run a backtest of a forecast against its price history.
pub(crate) fn run_backtest(
    history_path: &Path,
    forecast_path: &Path,
    config: BacktestConfig,
    returns_out: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let history = data::load_history(history_path)?;
    let forecast = data::load_forecast(forecast_path)?;

    info!(
        history = history.len(),
        forecast = forecast.len(),
        commission_rate = config.commission_rate,
        "running backtest"
    );

    let backtest = Backtest::new(config);
    let summary = backtest.run(&forecast, &history)?;

    if let Some(path) = returns_out {
        let mut df = summary.returns_frame()?;
        data::write_csv(&mut df, path)?;
        info!(path = %path.display(), "wrote cumulative returns");
    }

    match format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Text => {
            banner("Backtesting");
            println!("History:    {}", history_path.display());
            println!("Forecast:   {}", forecast_path.display());
            println!("Capital:    {:.2}", backtest.config().initial_capital);
            println!(
                "Commission: {:.3}%",
                backtest.config().commission_rate * 100.0
            );
            println!();
            print_summary(&summary);
        }
    }

    Ok(())
}

fn print_summary(summary: &PerformanceSummary) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("BACKTEST RESULTS");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    if let (Some(first), Some(last)) = (summary.dates.first(), summary.dates.last()) {
        println!("Window: {} to {} ({} days)", first, last, summary.len());
        println!();
    }

    println!("Final Value:");
    println!(
        "  Strategy:          {:>14.2}  ({:+.2}%)",
        summary.strategy_final_value,
        summary.strategy_return() * 100.0
    );
    println!(
        "  Buy & Hold:        {:>14.2}  ({:+.2}%)",
        summary.buy_and_hold_final_value,
        summary.buy_and_hold_return() * 100.0
    );
    println!(
        "  Excess Return:     {:>13.2}%",
        summary.excess_return() * 100.0
    );
    println!();

    println!("Risk:");
    println!("  Sharpe Ratio:      {:>14.2}", summary.sharpe_ratio);
    println!(
        "  Max Drawdown:      {:>13.2}%",
        summary.max_drawdown * 100.0
    );
    println!();

    println!("Trading:");
    println!("  Number of Trades:  {:>14}", summary.n_trades);
    println!(
        "  Total Commission:  {:>13.3}%",
        summary.total_commission * 100.0
    );
    println!();
}
