//! Backtesting engine.
//!
//! Trades the forecast signal with a one-day lag and a proportional
//! commission, and compares it with holding the asset throughout.

use crate::metrics::{
    TRADING_DAYS_PER_YEAR, cumulative_returns, drawdown_series, max_drawdown, sharpe_ratio,
};
use crate::signals::SignalTable;
use crate::summary::PerformanceSummary;
use augury_traits::{AuguryError, ForecastSeries, HistoricalSeries, PerformanceEvaluator, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What to do with historical dates that have no forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentPolicy {
    /// Evaluate only the dates both series share (inner join).
    #[default]
    Truncate,
    /// Fail if any historical date is missing from the forecast.
    Strict,
}

/// Backtesting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Initial capital
    pub initial_capital: f64,
    /// Commission charged per unit of position change, as a fraction
    pub commission_rate: f64,
    /// Trading days per year for Sharpe annualization
    pub trading_days_per_year: usize,
    /// Handling of history dates the forecast does not cover
    pub alignment: AlignmentPolicy,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            commission_rate: 0.001,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            alignment: AlignmentPolicy::Truncate,
        }
    }
}

impl BacktestConfig {
    /// Check that every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`AuguryError::InvalidConfig`] when the capital is not a
    /// positive finite number, the commission rate is negative or not
    /// finite, or the annualization factor is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(AuguryError::InvalidConfig(format!(
                "initial_capital must be positive, got {}",
                self.initial_capital
            )));
        }
        if !self.commission_rate.is_finite() || self.commission_rate < 0.0 {
            return Err(AuguryError::InvalidConfig(format!(
                "commission_rate must be non-negative, got {}",
                self.commission_rate
            )));
        }
        if self.trading_days_per_year == 0 {
            return Err(AuguryError::InvalidConfig(
                "trading_days_per_year must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Backtesting engine.
#[derive(Debug, Clone, Default)]
pub struct Backtest {
    /// Configuration
    config: BacktestConfig,
}

impl Backtest {
    /// Create a new backtest with configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use augury_eval::{Backtest, BacktestConfig};
    ///
    /// let backtest = Backtest::new(BacktestConfig::default());
    /// let summary = backtest.run(&forecast, &history)?;
    /// ```
    pub const fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// The configuration this backtest runs with.
    pub const fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Build the signal table this backtest would trade.
    pub fn signal_table(
        &self,
        forecast: &ForecastSeries,
        historical: &HistoricalSeries,
    ) -> Result<SignalTable> {
        SignalTable::build(forecast, historical, self.config.alignment)
    }

    /// Run the backtest.
    ///
    /// # Errors
    ///
    /// - [`AuguryError::InvalidConfig`] if the configuration is out of range
    /// - [`AuguryError::InsufficientData`] if fewer than two dates align
    /// - [`AuguryError::InvalidData`] under strict alignment with gaps
    pub fn run(
        &self,
        forecast: &ForecastSeries,
        historical: &HistoricalSeries,
    ) -> Result<PerformanceSummary> {
        self.config.validate()?;
        let table = self.signal_table(forecast, historical)?;
        Ok(self.summarize(&table))
    }

    /// Compute performance statistics from a signal table.
    pub fn summarize(&self, table: &SignalTable) -> PerformanceSummary {
        let capital = self.config.initial_capital;
        let rate = self.config.commission_rate;

        let daily_returns = table.strategy_returns(rate);
        let commissions = table.commissions(rate);

        // The untradable day compounds as no change and stays out of the Sharpe sample
        let growth: Vec<f64> = daily_returns.iter().map(|r| r.unwrap_or(0.0)).collect();
        let traded: Vec<f64> = daily_returns.iter().flatten().copied().collect();
        let strategy_cumulative = cumulative_returns(&growth);
        let buy_and_hold_cumulative = cumulative_returns(&table.price_changes());

        let wealth: Vec<f64> = strategy_cumulative.iter().map(|g| capital * g).collect();
        let drawdown = drawdown_series(&wealth);

        let strategy_final_value = capital * strategy_cumulative.last().copied().unwrap_or(1.0);
        let buy_and_hold_final_value =
            capital * buy_and_hold_cumulative.last().copied().unwrap_or(1.0);
        let n_trades = table.n_trades();
        let total_commission = commissions.iter().sum();

        debug!(
            days = daily_returns.len(),
            n_trades, strategy_final_value, buy_and_hold_final_value, "backtest complete"
        );

        PerformanceSummary {
            initial_capital: capital,
            strategy_final_value,
            buy_and_hold_final_value,
            sharpe_ratio: sharpe_ratio(&traded, self.config.trading_days_per_year),
            max_drawdown: max_drawdown(&drawdown),
            dates: table.window_dates(),
            strategy_cumulative,
            buy_and_hold_cumulative,
            drawdown,
            daily_returns,
            commissions,
            n_trades,
            total_commission,
        }
    }
}

impl PerformanceEvaluator for Backtest {
    type Report = PerformanceSummary;

    fn evaluate(
        &self,
        forecast: &ForecastSeries,
        historical: &HistoricalSeries,
    ) -> Result<PerformanceSummary> {
        self.run(forecast, historical)
    }
}

/// Evaluate a forecast-driven strategy against buy-and-hold.
///
/// Convenience wrapper around [`Backtest`] with the default alignment
/// policy and 252-day annualization.
///
/// # Errors
///
/// See [`Backtest::run`].
pub fn evaluate(
    forecast: &ForecastSeries,
    historical: &HistoricalSeries,
    initial_capital: f64,
    commission_rate: f64,
) -> Result<PerformanceSummary> {
    let config = BacktestConfig {
        initial_capital,
        commission_rate,
        ..Default::default()
    };
    Backtest::new(config).run(forecast, historical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use augury_traits::Date;

    fn start() -> Date {
        Date::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn inputs(prices: &[f64], forecasts: &[f64]) -> (ForecastSeries, HistoricalSeries) {
        (
            ForecastSeries::from_daily_predictions(start(), forecasts).unwrap(),
            HistoricalSeries::from_daily_closes(start(), prices).unwrap(),
        )
    }

    #[test]
    fn test_backtest_config_default() {
        let config = BacktestConfig::default();
        assert_eq!(config.initial_capital, 100_000.0);
        assert_eq!(config.commission_rate, 0.001);
        assert_eq!(config.trading_days_per_year, 252);
        assert_eq!(config.alignment, AlignmentPolicy::Truncate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backtest_config_partial_json() {
        let config: BacktestConfig =
            serde_json::from_str(r#"{"commission_rate": 0.0, "alignment": "strict"}"#).unwrap();
        assert_eq!(config.commission_rate, 0.0);
        assert_eq!(config.alignment, AlignmentPolicy::Strict);
        assert_eq!(config.initial_capital, 100_000.0);
    }

    #[test]
    fn test_backtest_config_validation() {
        let bad_capital = BacktestConfig {
            initial_capital: 0.0,
            ..Default::default()
        };
        assert!(matches!(bad_capital.validate(), Err(AuguryError::InvalidConfig(_))));

        let bad_rate = BacktestConfig {
            commission_rate: -0.001,
            ..Default::default()
        };
        assert!(matches!(bad_rate.validate(), Err(AuguryError::InvalidConfig(_))));

        let (forecast, history) = inputs(&[100.0, 101.0], &[100.0, 101.0]);
        assert!(evaluate(&forecast, &history, f64::NAN, 0.001).is_err());
    }

    #[test]
    fn test_reference_scenario() {
        let (forecast, history) = inputs(&[100.0, 102.0, 101.0, 105.0], &[99.0, 103.0, 104.0, 106.0]);
        let summary = evaluate(&forecast, &history, 100_000.0, 0.001).unwrap();

        // Flat, then long with a 0.1% entry charge, then long with no charge
        let day2 = 101.0 / 102.0 - 1.0 - 0.001;
        let day3 = 105.0 / 101.0 - 1.0;
        assert_eq!(summary.daily_returns[0], None);
        assert_relative_eq!(summary.daily_returns[1].unwrap(), day2, epsilon = 1e-12);
        assert_relative_eq!(summary.daily_returns[2].unwrap(), day3, epsilon = 1e-12);
        assert_eq!(summary.commissions, vec![0.0, 0.001, 0.0]);
        assert_eq!(summary.n_trades, 1);

        let expected_strategy = 100_000.0 * (1.0 + day2) * (1.0 + day3);
        assert_relative_eq!(summary.strategy_final_value, expected_strategy, epsilon = 1e-6);
        assert_relative_eq!(summary.strategy_final_value, 102_837.216, epsilon = 1e-2);
        assert_relative_eq!(summary.buy_and_hold_final_value, 105_000.0, epsilon = 1e-6);

        // Only the two days with a position enter the ratio
        let expected_sharpe = {
            let mean = (day2 + day3) / 2.0;
            let var = (day2 - mean).powi(2) + (day3 - mean).powi(2);
            mean / var.sqrt() * 252_f64.sqrt()
        };
        assert_relative_eq!(summary.sharpe_ratio, expected_sharpe, epsilon = 1e-9);

        // Wealth dips below the starting peak on the entry day
        assert_relative_eq!(summary.max_drawdown, day2, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_daily_return_has_zero_sharpe() {
        // Always long on a market rising 1% a day: every tradable day earns the same
        let prices: Vec<f64> = (0..8).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let forecasts: Vec<f64> = prices.iter().map(|p| 2.0 * p).collect();
        let (forecast, history) = inputs(&prices, &forecasts);
        let summary = evaluate(&forecast, &history, 100_000.0, 0.0).unwrap();

        assert_eq!(summary.daily_returns[0], None);
        assert!(summary.daily_returns[1..].iter().all(Option::is_some));
        assert_eq!(summary.sharpe_ratio, 0.0);
        assert_relative_eq!(
            summary.strategy_final_value,
            100_000.0 * 1.01_f64.powi(6),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_single_row_is_insufficient() {
        let (forecast, history) = inputs(&[100.0], &[101.0]);
        let result = evaluate(&forecast, &history, 100_000.0, 0.001);
        assert!(matches!(result, Err(AuguryError::InsufficientData(_))));
    }

    #[test]
    fn test_two_rows_is_enough() {
        let (forecast, history) = inputs(&[100.0, 110.0], &[100.0, 120.0]);
        let summary = evaluate(&forecast, &history, 100_000.0, 0.001).unwrap();
        assert_eq!(summary.len(), 1);
        // No position yet: strategy stays in cash
        assert_relative_eq!(summary.strategy_final_value, 100_000.0);
        assert_relative_eq!(summary.buy_and_hold_final_value, 110_000.0, epsilon = 1e-6);
        assert_eq!(summary.sharpe_ratio, 0.0);
    }

    #[test]
    fn test_series_length_is_aligned_dates_minus_one() {
        let prices = [50.0, 51.0, 49.0, 52.0, 53.0, 51.0, 55.0];
        let forecasts = [50.0, 52.0, 50.0, 48.0, 54.0, 50.0, 56.0];
        let (forecast, history) = inputs(&prices, &forecasts);
        let summary = evaluate(&forecast, &history, 100_000.0, 0.001).unwrap();

        let expected = prices.len() - 1;
        assert_eq!(summary.dates.len(), expected);
        assert_eq!(summary.strategy_cumulative.len(), expected);
        assert_eq!(summary.buy_and_hold_cumulative.len(), expected);
        assert_eq!(summary.drawdown.len(), expected);
        assert_eq!(summary.dates[0], Date::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_constant_price_buy_and_hold_keeps_capital() {
        let (forecast, history) = inputs(&[100.0; 6], &[101.0, 99.0, 101.0, 99.0, 101.0, 99.0]);
        let summary = evaluate(&forecast, &history, 100_000.0, 0.001).unwrap();
        assert_eq!(summary.buy_and_hold_final_value, 100_000.0);
        // The strategy only pays commissions on a flat market
        assert!(summary.strategy_final_value < 100_000.0);
    }

    #[test]
    fn test_no_commission_on_days_without_trades() {
        let prices = [100.0, 101.0, 99.0, 102.0, 98.0, 97.0, 99.0];
        let forecasts = [100.0, 102.0, 98.0, 103.0, 104.0, 96.0, 95.0];
        let (forecast, history) = inputs(&prices, &forecasts);
        let backtest = Backtest::default();
        let table = backtest.signal_table(&forecast, &history).unwrap();
        let summary = backtest.summarize(&table);

        for (i, row) in table.window().iter().enumerate() {
            let gross = augury_traits::Direction::exposure(row.position)
                * crate::pct_change(table.rows()[i].price, row.price);
            let Some(net) = summary.daily_returns[i] else {
                continue;
            };
            if row.trade_size == 0.0 {
                assert_eq!(summary.commissions[i], 0.0);
                assert_eq!(net, gross);
            } else {
                assert!(net < gross);
            }
        }
    }

    #[test]
    fn test_zero_commission_matches_gross_returns() {
        let (forecast, history) = inputs(&[100.0, 102.0, 101.0, 105.0], &[99.0, 103.0, 104.0, 106.0]);
        let summary = evaluate(&forecast, &history, 100_000.0, 0.0).unwrap();
        assert_eq!(summary.total_commission, 0.0);
        let expected = 100_000.0 * (101.0 / 102.0) * (105.0 / 101.0);
        assert_relative_eq!(summary.strategy_final_value, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_single_drop_drawdown_persists_flat() {
        // Long from the third day; price drops once on the fourth day, then stays flat
        let prices = [100.0, 100.0, 100.0, 90.0, 90.0, 90.0];
        let forecasts = [101.0, 101.0, 101.0, 101.0, 101.0, 101.0];
        let (forecast, history) = inputs(&prices, &forecasts);
        let summary = evaluate(&forecast, &history, 100_000.0, 0.0).unwrap();

        // Window dates start at the second price
        assert_eq!(summary.drawdown[0], 0.0);
        assert_eq!(summary.drawdown[1], 0.0);
        assert_relative_eq!(summary.drawdown[2], -0.1, epsilon = 1e-12);
        assert_eq!(summary.drawdown[3], summary.drawdown[2]);
        assert_eq!(summary.drawdown[4], summary.drawdown[2]);
        assert_relative_eq!(summary.max_drawdown, -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_rising_wealth_has_no_drawdown() {
        let prices = [100.0, 101.0, 102.0, 103.0, 104.0];
        let forecasts = [100.0, 105.0, 106.0, 107.0, 108.0];
        let (forecast, history) = inputs(&prices, &forecasts);
        let summary = evaluate(&forecast, &history, 100_000.0, 0.0).unwrap();
        assert_eq!(summary.max_drawdown, 0.0);
        assert!(summary.drawdown.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let (forecast, history) = inputs(&[100.0, 102.0, 101.0], &[99.0, 103.0, 104.0]);
        let forecast_before = forecast.clone();
        let history_before = history.clone();
        let _ = Backtest::default().evaluate(&forecast, &history).unwrap();
        assert_eq!(forecast, forecast_before);
        assert_eq!(history, history_before);
    }
}
