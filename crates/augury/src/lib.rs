#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/augury-rs/augury/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # augury
//!
//! Forecast-driven backtesting.
//!
//! augury is an umbrella crate that re-exports all augury sub-crates for
//! convenience.
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types ([`HistoricalSeries`], [`ForecastSeries`]) and the
//!   [`PerformanceEvaluator`] trait
//! - [`eval`] - Signal table, backtest engine and performance metrics
//! - [`insight`] - Forecast outlook and news sentiment
//!
//! ## Pipeline
//!
//! 1. An external model produces a **forecast** over the history it was fit on
//!    (and usually some days beyond)
//! 2. The **signal table** aligns forecast and history and derives a daily
//!    long/short call and the lagged position
//! 3. The **backtest** turns positions into net returns and reports final
//!    values, Sharpe ratio and drawdown against buy-and-hold

/// Version information for the augury crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types and traits.
///
/// # Example
///
/// ```ignore
/// use augury::traits::{HistoricalSeries, ForecastSeries};
/// ```
pub mod traits {
    pub use augury_traits::*;
}

// Re-export core trait and types at top level for convenience
pub use augury_traits::{
    Date, Direction, ForecastPoint, ForecastSeries, HistoricalObservation, HistoricalSeries,
    PerformanceEvaluator,
};

// Re-export error types
pub use augury_traits::{AuguryError, Result};

// ============================================================================
// Evaluation
// ============================================================================

/// Backtesting and performance metrics.
///
/// ## Metrics
///
/// ### Sharpe Ratio
///
/// ```text
/// Sharpe = mean(r) / std(r) * sqrt(252)
/// ```
///
/// Zero when the daily returns have no dispersion.
///
/// ### Maximum Drawdown
///
/// ```text
/// DD_t = (W_t - max_{s<=t} W_s) / max_{s<=t} W_s
/// MDD  = min_t DD_t
/// ```
///
/// # Example
///
/// ```ignore
/// use augury::eval::{Backtest, BacktestConfig};
///
/// let summary = Backtest::new(BacktestConfig::default()).run(&forecast, &history)?;
/// println!("Sharpe: {:.2}", summary.sharpe_ratio);
/// println!("Max DD: {:.1}%", summary.max_drawdown * 100.0);
/// ```
pub mod eval {
    pub use augury_eval::*;
}

// ============================================================================
// Insight
// ============================================================================

/// Forecast outlook and news sentiment.
pub mod insight {
    pub use augury_insight::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use augury::prelude::*;
/// ```
pub mod prelude {
    pub use crate::eval::{Backtest, BacktestConfig, PerformanceSummary};
    pub use crate::{
        AuguryError, Date, Direction, ForecastPoint, ForecastSeries, HistoricalObservation,
        HistoricalSeries, PerformanceEvaluator, Result,
    };
}

// ============================================================================
// Tests
// ============================================================================
