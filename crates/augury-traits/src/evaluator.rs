//! Performance evaluator trait.
//!
//! This module defines the `PerformanceEvaluator` trait: the seam between a
//! forecasting model's output and whatever turns it into trading statistics.

use crate::{ForecastSeries, HistoricalSeries, Result};

/// Turns a forecast and the price history it was fit on into a performance report.
///
/// Implementations must be pure: they may not mutate their inputs and must
/// return the same report for the same inputs and configuration.
///
/// # Example
///
/// ```no_run
/// use augury_traits::{ForecastSeries, HistoricalSeries, PerformanceEvaluator, Result};
///
/// struct HitRate;
///
/// impl PerformanceEvaluator for HitRate {
///     type Report = f64;
///
///     fn evaluate(&self, forecast: &ForecastSeries, historical: &HistoricalSeries) -> Result<f64> {
///         let hits = historical
///             .observations()
///             .iter()
///             .filter(|obs| forecast.get(obs.date).is_some_and(|p| p.predicted_close >= obs.close))
///             .count();
///         Ok(hits as f64 / historical.len() as f64)
///     }
/// }
/// ```
pub trait PerformanceEvaluator {
    /// The report produced by this evaluator.
    type Report;

    /// Evaluate `forecast` against `historical`.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs do not overlap enough to evaluate.
    fn evaluate(&self, forecast: &ForecastSeries, historical: &HistoricalSeries)
    -> Result<Self::Report>;
}
