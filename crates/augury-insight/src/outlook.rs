//! Forecast outlook: the final forecast point against the last close.

use augury_traits::{AuguryError, Date, ForecastSeries, HistoricalSeries, Result};
use serde::{Deserialize, Serialize};

/// Expected move from the last close to the forecast horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Prediction above the last close.
    Up,
    /// Prediction at or below the last close.
    Down,
}

/// Headline prediction of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOutlook {
    /// Date of the final forecast point
    pub target_date: Date,
    /// Predicted close on `target_date`
    pub predicted_close: f64,
    /// Lower edge of the confidence interval, if the model produced one
    pub lower_bound: Option<f64>,
    /// Upper edge of the confidence interval, if the model produced one
    pub upper_bound: Option<f64>,
    /// Most recent actual close
    pub last_close: f64,
    /// Direction of the predicted move
    pub trend: Trend,
    /// `predicted_close / last_close - 1`
    pub expected_change: f64,
}

impl ForecastOutlook {
    /// Compare the last point of `forecast` with `last_close`.
    ///
    /// # Errors
    ///
    /// - [`AuguryError::InsufficientData`] if the forecast is empty
    /// - [`AuguryError::InvalidPrice`] if `last_close` is not a positive finite number
    pub fn new(forecast: &ForecastSeries, last_close: f64) -> Result<Self> {
        if !last_close.is_finite() || last_close <= 0.0 {
            return Err(AuguryError::InvalidPrice(format!(
                "last close is {last_close}"
            )));
        }

        let point = forecast
            .last()
            .ok_or_else(|| AuguryError::InsufficientData("forecast is empty".to_string()))?;

        let trend = if point.predicted_close > last_close {
            Trend::Up
        } else {
            Trend::Down
        };

        Ok(Self {
            target_date: point.date,
            predicted_close: point.predicted_close,
            lower_bound: point.lower_bound,
            upper_bound: point.upper_bound,
            last_close,
            trend,
            expected_change: point.predicted_close / last_close - 1.0,
        })
    }

    /// Compare the last point of `forecast` with the last close of `historical`.
    pub fn from_series(forecast: &ForecastSeries, historical: &HistoricalSeries) -> Result<Self> {
        let last_close = historical
            .last_close()
            .ok_or_else(|| AuguryError::InsufficientData("history is empty".to_string()))?;
        Self::new(forecast, last_close)
    }

    /// Whether the model expects the price to rise.
    pub const fn is_bullish(&self) -> bool {
        matches!(self.trend, Trend::Up)
    }
}
