//! Backtest results.

use augury_traits::{Date, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of one backtest evaluation.
///
/// Every series field is aligned with `dates`, which covers the evaluation
/// window (all aligned dates except the first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Starting portfolio value
    pub initial_capital: f64,
    /// Strategy portfolio value at the end of the window
    pub strategy_final_value: f64,
    /// Buy-and-hold portfolio value at the end of the window
    pub buy_and_hold_final_value: f64,
    /// Sharpe ratio (annualized, zero when returns have no dispersion)
    pub sharpe_ratio: f64,
    /// Maximum drawdown, a non-positive fraction
    pub max_drawdown: f64,
    /// Dates of the evaluation window
    pub dates: Vec<Date>,
    /// Strategy growth of one unit of capital
    pub strategy_cumulative: Vec<f64>,
    /// Buy-and-hold growth of one unit of capital
    pub buy_and_hold_cumulative: Vec<f64>,
    /// Strategy drawdown from running peak
    pub drawdown: Vec<f64>,
    /// Net daily strategy returns; `None` on the day before the first position
    pub daily_returns: Vec<Option<f64>>,
    /// Commission charged each day, as a fraction of capital
    pub commissions: Vec<f64>,
    /// Number of days on which the position changed
    pub n_trades: usize,
    /// Sum of daily commission fractions
    pub total_commission: f64,
}

impl PerformanceSummary {
    /// Strategy total return as a fraction of initial capital.
    pub const fn strategy_return(&self) -> f64 {
        self.strategy_final_value / self.initial_capital - 1.0
    }

    /// Buy-and-hold total return as a fraction of initial capital.
    pub const fn buy_and_hold_return(&self) -> f64 {
        self.buy_and_hold_final_value / self.initial_capital - 1.0
    }

    /// Strategy return minus buy-and-hold return.
    pub const fn excess_return(&self) -> f64 {
        self.strategy_return() - self.buy_and_hold_return()
    }

    /// Number of days in the evaluation window.
    pub const fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the evaluation window is empty.
    pub const fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Cumulative returns of both strategies as a table for plotting.
    ///
    /// Columns: `date`, `strategy`, `buy_and_hold`.
    pub fn returns_frame(&self) -> Result<DataFrame> {
        let df = df! {
            "date" => self.dates.as_slice(),
            "strategy" => self.strategy_cumulative.as_slice(),
            "buy_and_hold" => self.buy_and_hold_cumulative.as_slice(),
        }?;
        Ok(df)
    }
}
