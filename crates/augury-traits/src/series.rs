//! Validated price and forecast series.
//!
//! Both series are immutable once constructed. Construction is the single
//! place where ordering, uniqueness and price sanity are enforced, so the
//! evaluator can rely on them without re-checking.

use crate::{AuguryError, CE_TO_UNIX_EPOCH_DAYS, Date, ForecastPoint, HistoricalObservation, Result};
use chrono::{Days, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;

/// Ascending, de-duplicated history of closing prices.
///
/// # Invariants
///
/// - at least one observation
/// - dates strictly ascending (hence unique)
/// - every close is finite and strictly positive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSeries {
    observations: Vec<HistoricalObservation>,
}

impl HistoricalSeries {
    /// Build a series from observations already in date order.
    ///
    /// # Errors
    ///
    /// - [`AuguryError::InsufficientData`] if `observations` is empty
    /// - [`AuguryError::InvalidData`] if dates are not strictly ascending
    /// - [`AuguryError::InvalidPrice`] if a close is zero, negative or not finite
    pub fn new(observations: Vec<HistoricalObservation>) -> Result<Self> {
        if observations.is_empty() {
            return Err(AuguryError::InsufficientData(
                "historical series is empty".to_string(),
            ));
        }

        for obs in &observations {
            if !obs.close.is_finite() || obs.close <= 0.0 {
                return Err(AuguryError::InvalidPrice(format!(
                    "close on {} is {}",
                    obs.date, obs.close
                )));
            }
        }

        if let Some(pair) = observations.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(AuguryError::InvalidData(format!(
                "historical dates must be strictly ascending: {} followed by {}",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { observations })
    }

    /// Build a series of consecutive calendar days starting at `start`.
    ///
    /// # Example
    ///
    /// ```
    /// use augury_traits::{Date, HistoricalSeries};
    ///
    /// let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
    /// let history = HistoricalSeries::from_daily_closes(start, &[100.0, 101.5]).unwrap();
    /// assert_eq!(history.len(), 2);
    /// ```
    pub fn from_daily_closes(start: Date, closes: &[f64]) -> Result<Self> {
        let observations = daily_dates(start, closes.len())?
            .into_iter()
            .zip(closes)
            .map(|(date, &close)| HistoricalObservation::new(date, close))
            .collect();
        Self::new(observations)
    }

    /// Build a series from a table with `date` and `close` columns.
    ///
    /// `Date`/`Close` (capitalised) are accepted as aliases. The date column
    /// may be a polars `Date`/`Datetime` or a `YYYY-MM-DD` string; the close
    /// column may be any numeric type. Rows are sorted by date before
    /// validation.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let dates = date_values(require_column(df, &["date", "Date"])?)?;
        let closes = float_values(require_column(df, &["close", "Close"])?)?;

        let mut observations = Vec::with_capacity(dates.len());
        for (date, close) in dates.into_iter().zip(closes) {
            let close = close
                .ok_or_else(|| AuguryError::InvalidData(format!("missing close on {date}")))?;
            observations.push(HistoricalObservation::new(date, close));
        }
        observations.sort_by_key(|obs| obs.date);

        Self::new(observations)
    }

    /// All observations in date order.
    pub const fn observations(&self) -> &[HistoricalObservation] {
        self.observations.as_slice()
    }

    /// Number of observations.
    pub const fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series has no observations. A built series holds at least one.
    pub const fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The most recent observation.
    pub fn last(&self) -> Option<&HistoricalObservation> {
        self.observations.last()
    }

    /// Close of the most recent observation.
    pub fn last_close(&self) -> Option<f64> {
        self.last().map(|obs| obs.close)
    }

    /// Closing price on `date`, if that date is in the history.
    pub fn close_on(&self, date: Date) -> Option<f64> {
        self.observations
            .binary_search_by_key(&date, |obs| obs.date)
            .ok()
            .map(|idx| self.observations[idx].close)
    }
}

/// Model forecast, sorted by date.
///
/// A forecast usually extends past the end of the history it was trained
/// on; only the overlapping part is used for backtesting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    /// Build a forecast from points in any order.
    ///
    /// # Errors
    ///
    /// - [`AuguryError::InvalidData`] on duplicate dates, non-finite values
    ///   or a confidence interval that does not contain the prediction
    pub fn new(mut points: Vec<ForecastPoint>) -> Result<Self> {
        points.sort_by_key(|p| p.date);

        if let Some(pair) = points.windows(2).find(|w| w[1].date == w[0].date) {
            return Err(AuguryError::InvalidData(format!(
                "duplicate forecast date {}",
                pair[0].date
            )));
        }

        for point in &points {
            validate_point(point)?;
        }

        Ok(Self { points })
    }

    /// Build a forecast of consecutive calendar days starting at `start`.
    pub fn from_daily_predictions(start: Date, predictions: &[f64]) -> Result<Self> {
        let points = daily_dates(start, predictions.len())?
            .into_iter()
            .zip(predictions)
            .map(|(date, &value)| ForecastPoint::new(date, value))
            .collect();
        Self::new(points)
    }

    /// Build a forecast from a table.
    ///
    /// Column names follow either the plain convention (`date`,
    /// `predicted_close`, `lower_bound`, `upper_bound`) or the Prophet
    /// output convention (`ds`, `yhat`, `yhat_lower`, `yhat_upper`).
    /// The interval columns are optional.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let dates = date_values(require_column(df, &["date", "ds"])?)?;
        let predictions = float_values(require_column(df, &["predicted_close", "yhat"])?)?;
        let lower = optional_float_values(df, &["lower_bound", "yhat_lower"])?;
        let upper = optional_float_values(df, &["upper_bound", "yhat_upper"])?;

        let mut points = Vec::with_capacity(dates.len());
        for (i, (date, predicted)) in dates.into_iter().zip(predictions).enumerate() {
            let predicted_close = predicted
                .ok_or_else(|| AuguryError::InvalidData(format!("missing prediction on {date}")))?;
            points.push(ForecastPoint {
                date,
                predicted_close,
                lower_bound: lower.as_ref().and_then(|col| col[i]),
                upper_bound: upper.as_ref().and_then(|col| col[i]),
            });
        }

        Self::new(points)
    }

    /// All forecast points in date order.
    pub const fn points(&self) -> &[ForecastPoint] {
        self.points.as_slice()
    }

    /// Number of forecast points.
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the forecast has no points.
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The last (furthest out) forecast point.
    pub fn last(&self) -> Option<&ForecastPoint> {
        self.points.last()
    }

    /// Forecast point for `date`.
    pub fn get(&self, date: Date) -> Option<&ForecastPoint> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| &self.points[idx])
    }
}

fn validate_point(point: &ForecastPoint) -> Result<()> {
    if !point.predicted_close.is_finite() {
        return Err(AuguryError::InvalidData(format!(
            "prediction on {} is not finite",
            point.date
        )));
    }

    for bound in [point.lower_bound, point.upper_bound].into_iter().flatten() {
        if !bound.is_finite() {
            return Err(AuguryError::InvalidData(format!(
                "confidence bound on {} is not finite",
                point.date
            )));
        }
    }

    let lower_ok = point.lower_bound.is_none_or(|lo| lo <= point.predicted_close);
    let upper_ok = point.upper_bound.is_none_or(|hi| point.predicted_close <= hi);
    if !(lower_ok && upper_ok) {
        return Err(AuguryError::InvalidData(format!(
            "prediction {} on {} lies outside its interval [{:?}, {:?}]",
            point.predicted_close, point.date, point.lower_bound, point.upper_bound
        )));
    }

    Ok(())
}

fn daily_dates(start: Date, n: usize) -> Result<Vec<Date>> {
    (0..n as u64)
        .map(|offset| {
            start
                .checked_add_days(Days::new(offset))
                .ok_or_else(|| AuguryError::InvalidDate(format!("{start} + {offset} days")))
        })
        .collect()
}

/// Parse a date string in YYYY-MM-DD format.
///
/// A trailing `HH:MM:SS` time component, as written by most dataframe
/// libraries for midnight timestamps, is accepted and dropped.
pub fn parse_date(date_str: &str) -> Result<Date> {
    let trimmed = date_str.trim();
    Date::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
        })
        .map_err(|e| AuguryError::InvalidDate(format!("'{date_str}': {e}")))
}

fn require_column<'a>(df: &'a DataFrame, names: &[&str]) -> Result<&'a Column> {
    names
        .iter()
        .find_map(|name| df.column(name).ok())
        .ok_or_else(|| AuguryError::MissingColumn(names.join(" | ")))
}

fn date_values(column: &Column) -> Result<Vec<Date>> {
    let series = column.as_materialized_series();
    let name = series.name().to_string();

    if series.dtype() == &DataType::String {
        return series
            .str()?
            .into_iter()
            .map(|value: Option<&str>| {
                value
                    .ok_or_else(|| AuguryError::InvalidData(format!("null in column '{name}'")))
                    .and_then(parse_date)
            })
            .collect();
    }

    let as_date = series.cast(&DataType::Date)?;
    as_date
        .date()?
        .into_iter()
        .map(|value: Option<i32>| {
            let days =
                value.ok_or_else(|| AuguryError::InvalidData(format!("null in column '{name}'")))?;
            Date::from_num_days_from_ce_opt(days + CE_TO_UNIX_EPOCH_DAYS)
                .ok_or_else(|| AuguryError::InvalidDate(format!("day offset {days} out of range")))
        })
        .collect()
}

fn float_values(column: &Column) -> Result<Vec<Option<f64>>> {
    let as_float = column.as_materialized_series().cast(&DataType::Float64)?;
    Ok(as_float.f64()?.into_iter().collect())
}

fn optional_float_values(df: &DataFrame, names: &[&str]) -> Result<Option<Vec<Option<f64>>>> {
    names
        .iter()
        .find_map(|name| df.column(name).ok())
        .map(float_values)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_historical_rejects_empty() {
        let result = HistoricalSeries::new(Vec::new());
        assert!(matches!(result, Err(AuguryError::InsufficientData(_))));
    }

    #[test]
    fn test_historical_rejects_non_positive_price() {
        let result = HistoricalSeries::from_daily_closes(date(2024, 1, 1), &[100.0, 0.0, 101.0]);
        assert!(matches!(result, Err(AuguryError::InvalidPrice(_))));

        let result = HistoricalSeries::from_daily_closes(date(2024, 1, 1), &[100.0, -5.0]);
        assert!(matches!(result, Err(AuguryError::InvalidPrice(_))));

        let result = HistoricalSeries::from_daily_closes(date(2024, 1, 1), &[f64::NAN]);
        assert!(matches!(result, Err(AuguryError::InvalidPrice(_))));
    }

    #[test]
    fn test_historical_rejects_unordered_dates() {
        let observations = vec![
            HistoricalObservation::new(date(2024, 1, 3), 100.0),
            HistoricalObservation::new(date(2024, 1, 2), 101.0),
        ];
        assert!(matches!(
            HistoricalSeries::new(observations),
            Err(AuguryError::InvalidData(_))
        ));

        let duplicated = vec![
            HistoricalObservation::new(date(2024, 1, 2), 100.0),
            HistoricalObservation::new(date(2024, 1, 2), 101.0),
        ];
        assert!(HistoricalSeries::new(duplicated).is_err());
    }

    #[test]
    fn test_historical_lookup() {
        let history =
            HistoricalSeries::from_daily_closes(date(2024, 1, 1), &[100.0, 102.0, 101.0]).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history.close_on(date(2024, 1, 2)), Some(102.0));
        assert_eq!(history.close_on(date(2024, 2, 2)), None);
        assert_eq!(history.last_close(), Some(101.0));
    }

    #[test]
    fn test_historical_from_frame_with_string_dates() {
        let df = df! {
            "Date" => &["2024-01-03", "2024-01-02"],
            "Close" => &[101.0, 100.0],
        }
        .unwrap();

        let history = HistoricalSeries::from_frame(&df).unwrap();
        assert_eq!(history.len(), 2);
        // Sorted on load
        assert_eq!(history.observations()[0].date, date(2024, 1, 2));
        assert_eq!(history.observations()[0].close, 100.0);
    }

    #[test]
    fn test_historical_from_frame_with_date_dtype() {
        let df = df! {
            "date" => &[date(2024, 1, 2), date(2024, 1, 3)],
            "close" => &[100_i64, 101],
        }
        .unwrap();

        let history = HistoricalSeries::from_frame(&df).unwrap();
        assert_eq!(history.observations()[1].date, date(2024, 1, 3));
        assert_eq!(history.observations()[1].close, 101.0);
    }

    #[test]
    fn test_historical_from_frame_missing_column() {
        let df = df! {
            "date" => &["2024-01-02"],
            "price" => &[100.0],
        }
        .unwrap();

        let result = HistoricalSeries::from_frame(&df);
        assert!(matches!(result, Err(AuguryError::MissingColumn(_))));
    }

    #[test]
    fn test_forecast_sorted_and_deduplicated() {
        let points = vec![
            ForecastPoint::new(date(2024, 1, 3), 101.0),
            ForecastPoint::new(date(2024, 1, 2), 100.0),
        ];
        let forecast = ForecastSeries::new(points).unwrap();
        assert_eq!(forecast.points()[0].date, date(2024, 1, 2));
        assert_eq!(forecast.last().unwrap().predicted_close, 101.0);

        let duplicated = vec![
            ForecastPoint::new(date(2024, 1, 2), 100.0),
            ForecastPoint::new(date(2024, 1, 2), 101.0),
        ];
        assert!(ForecastSeries::new(duplicated).is_err());
    }

    #[test]
    fn test_forecast_rejects_inverted_interval() {
        let point = ForecastPoint::new(date(2024, 1, 2), 100.0).with_bounds(101.0, 105.0);
        let result = ForecastSeries::new(vec![point]);
        assert!(matches!(result, Err(AuguryError::InvalidData(_))));
    }

    #[test]
    fn test_forecast_from_prophet_frame() {
        let df = df! {
            "ds" => &["2024-01-02", "2024-01-03 00:00:00"],
            "yhat" => &[100.0, 102.0],
            "yhat_lower" => &[98.0, 99.5],
            "yhat_upper" => &[102.0, 104.0],
        }
        .unwrap();

        let forecast = ForecastSeries::from_frame(&df).unwrap();
        assert_eq!(forecast.len(), 2);
        let point = forecast.get(date(2024, 1, 3)).unwrap();
        assert_eq!(point.predicted_close, 102.0);
        assert_eq!(point.lower_bound, Some(99.5));
        assert_eq!(point.upper_bound, Some(104.0));
    }

    #[test]
    fn test_forecast_from_frame_without_interval() {
        let df = df! {
            "date" => &["2024-01-02"],
            "predicted_close" => &[100.0],
        }
        .unwrap();

        let forecast = ForecastSeries::from_frame(&df).unwrap();
        assert_eq!(forecast.points()[0].lower_bound, None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-15").unwrap(), date(2024, 1, 15));
        assert_eq!(parse_date("2024-01-15 00:00:00").unwrap(), date(2024, 1, 15));
        assert!(matches!(parse_date("15/01/2024"), Err(AuguryError::InvalidDate(_))));
    }
}
