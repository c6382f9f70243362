//! Dashboard analytics that sit next to the backtest.
//!
//! This crate provides the two summaries a forecast dashboard shows besides
//! backtest performance:
//! - Outlook: where the forecast ends up relative to the last close
//! - Sentiment: aggregate polarity of recent news about the ticker
//!
//! Both work on data that has already been fetched; nothing here performs I/O.
//!
//! # Example
//!
//! ```ignore
//! use augury_insight::{ForecastOutlook, SentimentAnalyzer};
//!
//! let outlook = ForecastOutlook::from_series(&forecast, &history)?;
//! let report = SentimentAnalyzer::default().analyze(&articles);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod outlook;
pub mod sentiment;

// Re-export key types
pub use outlook::{ForecastOutlook, Trend};
pub use sentiment::{
    EntitySentiment, NewsArticle, ScoredArticle, SentimentAnalyzer, SentimentConfig,
    SentimentLabel, SentimentReport,
};
