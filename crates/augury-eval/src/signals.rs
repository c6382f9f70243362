//! Forecast-driven signal table.
//!
//! Aligns a forecast with the price history on date and derives, for each
//! aligned day, the directional signal and the position actually held.
//!
//! The signal on day `t` compares the forecast for `t` with the close of
//! `t-1`. It can only be traded on day `t+1`, so `position[t] = signal[t-1]`.
//! Nothing in a row depends on a price later than the row's own date.

use crate::backtest::AlignmentPolicy;
use crate::metrics::pct_change;
use augury_traits::{AuguryError, Date, Direction, ForecastSeries, HistoricalSeries, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One aligned trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalRow {
    /// Trading date.
    pub date: Date,
    /// Closing price.
    pub price: f64,
    /// Model prediction for this date.
    pub forecast: f64,
    /// Call formed today from today's forecast and yesterday's close.
    /// `None` on the first row, where no previous close exists.
    pub signal: Option<Direction>,
    /// Exposure held today (yesterday's signal). `None` until a signal can be acted on.
    pub position: Option<Direction>,
    /// Absolute change in exposure versus the previous row (0, 1 or 2).
    pub trade_size: f64,
}

/// Day-by-day signal table over the aligned date range.
///
/// Always holds at least two rows, so the evaluation window (every row after
/// the first) is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalTable {
    rows: Vec<SignalRow>,
}

impl SignalTable {
    /// Align `forecast` with `historical` and derive signals and positions.
    ///
    /// Forecast points outside the history (for example the future horizon)
    /// are ignored. History dates with no forecast are dropped under
    /// [`AlignmentPolicy::Truncate`] and rejected under
    /// [`AlignmentPolicy::Strict`].
    ///
    /// # Errors
    ///
    /// - [`AuguryError::InvalidData`] if `policy` is strict and a history date has no forecast
    /// - [`AuguryError::InsufficientData`] if fewer than two dates align
    pub fn build(
        forecast: &ForecastSeries,
        historical: &HistoricalSeries,
        policy: AlignmentPolicy,
    ) -> Result<Self> {
        let mut aligned = Vec::with_capacity(historical.len());
        let mut dropped = 0usize;

        for obs in historical.observations() {
            match forecast.get(obs.date) {
                Some(point) => aligned.push((obs.date, obs.close, point.predicted_close)),
                None if policy == AlignmentPolicy::Strict => {
                    return Err(AuguryError::InvalidData(format!(
                        "no forecast for historical date {}",
                        obs.date
                    )));
                }
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(
                dropped,
                "historical dates without a forecast were excluded from the evaluation window"
            );
        }

        if aligned.len() < 2 {
            return Err(AuguryError::InsufficientData(format!(
                "need at least 2 dates shared by forecast and history, got {}",
                aligned.len()
            )));
        }

        let mut rows: Vec<SignalRow> = Vec::with_capacity(aligned.len());
        for &(date, price, forecast) in &aligned {
            let (signal, position, trade_size) = match rows.last() {
                None => (None, None, 0.0),
                Some(prev) => {
                    let signal = if forecast > prev.price {
                        Direction::Long
                    } else {
                        Direction::Short
                    };
                    let position = prev.signal;
                    let trade_size = (Direction::exposure(position)
                        - Direction::exposure(prev.position))
                    .abs();
                    (Some(signal), position, trade_size)
                }
            };

            rows.push(SignalRow {
                date,
                price,
                forecast,
                signal,
                position,
                trade_size,
            });
        }

        debug!(aligned = rows.len(), dropped, "built signal table");
        Ok(Self { rows })
    }

    /// All aligned rows in date order.
    pub const fn rows(&self) -> &[SignalRow] {
        self.rows.as_slice()
    }

    /// Number of aligned dates.
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows. A built table holds at least two.
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows that carry a price change: every row after the first.
    pub const fn window(&self) -> &[SignalRow] {
        self.rows.as_slice().split_at(1).1
    }

    /// Dates of the evaluation window.
    pub fn window_dates(&self) -> Vec<Date> {
        self.window().iter().map(|row| row.date).collect()
    }

    /// Daily price change over the evaluation window.
    pub fn price_changes(&self) -> Vec<f64> {
        self.rows
            .windows(2)
            .map(|pair| pct_change(pair[0].price, pair[1].price))
            .collect()
    }

    /// Commission charged on each window day, as a fraction of capital.
    pub fn commissions(&self, commission_rate: f64) -> Vec<f64> {
        self.window()
            .iter()
            .map(|row| row.trade_size * commission_rate)
            .collect()
    }

    /// Net daily strategy return over the evaluation window.
    ///
    /// `position * price_change - trade_size * commission_rate`, or `None` on
    /// a day with no position yet (the first window day).
    pub fn strategy_returns(&self, commission_rate: f64) -> Vec<Option<f64>> {
        self.window()
            .iter()
            .zip(self.price_changes())
            .map(|(row, change)| {
                row.position
                    .map(|dir| dir.as_f64() * change - row.trade_size * commission_rate)
            })
            .collect()
    }

    /// Number of window days on which the position changed.
    pub fn n_trades(&self) -> usize {
        self.window().iter().filter(|row| row.trade_size > 0.0).count()
    }
}
