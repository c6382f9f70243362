//! Common types used throughout the Augury workspace.
//!
//! This module defines the row-level records for historical prices and
//! model forecasts, plus the directional call a trading signal makes.

use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
///
/// Polars stores `Date` values as days since the Unix epoch, chrono counts
/// from the common era.
pub const CE_TO_UNIX_EPOCH_DAYS: i32 = 719_163;

/// Directional call of a trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Hold the asset (+1).
    Long,
    /// Short the asset (-1).
    Short,
}

impl Direction {
    /// Numeric exposure of the direction: `+1.0` for long, `-1.0` for short.
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }

    /// Exposure of an optional direction, where `None` means flat.
    #[must_use]
    pub const fn exposure(direction: Option<Self>) -> f64 {
        match direction {
            Some(dir) => dir.as_f64(),
            None => 0.0,
        }
    }
}

/// One trading day of historical price data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalObservation {
    /// Trading date.
    pub date: Date,
    /// Closing price.
    pub close: f64,
}

impl HistoricalObservation {
    /// Create a new observation.
    #[must_use]
    pub const fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

/// One point of a model forecast.
///
/// Bounds are optional because not every forecaster produces an interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Forecast date.
    pub date: Date,
    /// Predicted closing price.
    pub predicted_close: f64,
    /// Lower edge of the confidence interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    /// Upper edge of the confidence interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
}

impl ForecastPoint {
    /// Create a forecast point without a confidence interval.
    #[must_use]
    pub const fn new(date: Date, predicted_close: f64) -> Self {
        Self {
            date,
            predicted_close,
            lower_bound: None,
            upper_bound: None,
        }
    }

    /// Attach a confidence interval to this point.
    #[must_use]
    pub const fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = Some(lower);
        self.upper_bound = Some(upper);
        self
    }
}
