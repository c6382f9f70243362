//! Backtesting and performance evaluation for augury.
//!
//! This crate turns a model forecast into a daily long/short signal, trades
//! it with a one-day execution lag and a proportional commission, and
//! reports the result against a buy-and-hold baseline:
//! - Signal table construction (forecast/history alignment, signal, position)
//! - Cumulative returns for the strategy and the baseline
//! - Annualized Sharpe ratio and maximum drawdown
//!
//! # Example
//!
//! ```rust,ignore
//! use augury_eval::evaluate;
//!
//! let summary = evaluate(&forecast, &history, 100_000.0, 0.001)?;
//! println!("Strategy: {:.2}", summary.strategy_final_value);
//! println!("Buy & Hold: {:.2}", summary.buy_and_hold_final_value);
//! ```

pub mod backtest;
pub mod metrics;
pub mod signals;
pub mod summary;

// Re-export main types
pub use backtest::{AlignmentPolicy, Backtest, BacktestConfig, evaluate};
pub use metrics::{
    TRADING_DAYS_PER_YEAR, cumulative_returns, drawdown_series, max_drawdown, pct_change,
    sharpe_ratio,
};
pub use signals::{SignalRow, SignalTable};
pub use summary::PerformanceSummary;
