//! Data loading utilities for the augury CLI.

use anyhow::{Context, Result};
use augury::eval::BacktestConfig;
use augury::insight::NewsArticle;
use augury::{ForecastSeries, HistoricalSeries};
use polars::prelude::*;
use serde::Deserialize;
use std::fs::{self, File};
use std::path::Path;
use tracing::debug;

/// Read a CSV file with a header row into a `DataFrame`.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .with_context(|| format!("failed to read {}", path.display()))?;

    debug!(path = %path.display(), rows = df.height(), "loaded csv");
    Ok(df)
}

/// Load daily closes from a CSV file.
pub(crate) fn load_history(path: &Path) -> Result<HistoricalSeries> {
    let df = read_csv(path)?;
    HistoricalSeries::from_frame(&df)
        .with_context(|| format!("invalid price history in {}", path.display()))
}

/// Load model predictions from a CSV file.
pub(crate) fn load_forecast(path: &Path) -> Result<ForecastSeries> {
    let df = read_csv(path)?;
    ForecastSeries::from_frame(&df)
        .with_context(|| format!("invalid forecast in {}", path.display()))
}

/// Load a backtest configuration from a JSON file.
///
/// Fields missing from the file keep their defaults.
pub(crate) fn load_config(path: &Path) -> Result<BacktestConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config in {}", path.display()))
}

/// News payloads come either bare or wrapped in the provider's envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum NewsPayload {
    Bare(Vec<NewsArticle>),
    Wrapped { data: Vec<NewsArticle> },
}

/// Load news articles from a JSON file.
pub(crate) fn load_news(path: &Path) -> Result<Vec<NewsArticle>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let payload: NewsPayload = serde_json::from_str(&text)
        .with_context(|| format!("invalid news payload in {}", path.display()))?;

    Ok(match payload {
        NewsPayload::Bare(articles) => articles,
        NewsPayload::Wrapped { data } => data,
    })
}

/// Write a `DataFrame` to a CSV file with a header row.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("failed to write {}", path.display()))?;

    debug!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("augury-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_history() {
        let path = scratch_file(
            "history.csv",
            "Date,Close\n2024-01-03,101.0\n2024-01-02,100.0\n2024-01-04,105.5\n",
        );
        let history = load_history(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(history.len(), 3);
        assert_eq!(history.last_close(), Some(105.5));
    }

    #[test]
    fn test_load_forecast_with_bounds() {
        let path = scratch_file(
            "forecast.csv",
            "ds,yhat,yhat_lower,yhat_upper\n2024-01-02,99.0,97.0,101.0\n2024-01-03,103.0,100.0,106.0\n",
        );
        let forecast = load_forecast(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(forecast.len(), 2);
        let last = forecast.last().unwrap();
        assert_eq!(last.predicted_close, 103.0);
        assert_eq!(last.lower_bound, Some(100.0));
        assert_eq!(last.upper_bound, Some(106.0));
    }

    #[test]
    fn test_load_history_missing_file() {
        let result = load_history(Path::new("/nonexistent/augury/history.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_partial() {
        let path = scratch_file("config.json", r#"{"commission_rate": 0.0025}"#);
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.commission_rate, 0.0025);
        assert_eq!(config.initial_capital, 100_000.0);
    }

    #[test]
    fn test_load_news_wrapped_and_bare() {
        let article = r#"{"title": "Rates hold", "entities": [{"symbol": "BBRI.JK", "sentiment_score": 0.3}]}"#;

        let wrapped = scratch_file("news-wrapped.json", &format!(r#"{{"data": [{article}]}}"#));
        let bare = scratch_file("news-bare.json", &format!("[{article}, {article}]"));

        let from_wrapped = load_news(&wrapped).unwrap();
        let from_bare = load_news(&bare).unwrap();
        fs::remove_file(&wrapped).ok();
        fs::remove_file(&bare).ok();

        assert_eq!(from_wrapped.len(), 1);
        assert_eq!(from_bare.len(), 2);
        assert_eq!(from_wrapped[0].title.as_deref(), Some("Rates hold"));
    }

    #[test]
    fn test_write_csv_roundtrip() {
        let path = std::env::temp_dir().join(format!("augury-{}-out.csv", std::process::id()));
        let mut df = df! {
            "date" => ["2024-01-02", "2024-01-03"],
            "strategy" => [1.0, 1.02],
        }
        .unwrap();

        write_csv(&mut df, &path).unwrap();
        let back = read_csv(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(back.height(), 2);
        assert_eq!(back.get_column_names().len(), 2);
    }
}
