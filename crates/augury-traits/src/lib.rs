#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/augury-rs/augury/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the Augury backtest evaluator.
//!
//! This crate provides the foundational abstractions shared by the evaluator,
//! the insight analytics and the command-line interface.

/// The version of the augury-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod evaluator;
pub mod series;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{AuguryError, Result};
pub use evaluator::PerformanceEvaluator;
pub use series::{ForecastSeries, HistoricalSeries, parse_date};
pub use types::{CE_TO_UNIX_EPOCH_DAYS, Date, Direction, ForecastPoint, HistoricalObservation};
