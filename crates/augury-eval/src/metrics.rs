//! Return and risk metrics.
//!
//! Plain functions over return and wealth slices. None of them allocate more
//! than their output, and all of them are total: degenerate input yields a
//! documented neutral value rather than NaN.

use augury_traits::stats::sample_stats;

/// Trading days per year used to annualize daily statistics.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Simple return from `previous` to `current`.
///
/// Callers guarantee `previous > 0`; price series enforce this on construction.
#[inline]
pub fn pct_change(previous: f64, current: f64) -> f64 {
    current / previous - 1.0
}

/// Running product of `(1 + r)`.
///
/// The output has the same length as `returns`; each entry is the growth
/// of one unit of capital up to and including that period.
///
/// # Example
///
/// ```
/// use augury_eval::cumulative_returns;
///
/// let cumulative = cumulative_returns(&[0.1, -0.1]);
/// assert!((cumulative[1] - 0.99).abs() < 1e-12);
/// ```
pub fn cumulative_returns(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |growth, r| {
            *growth *= 1.0 + r;
            Some(*growth)
        })
        .collect()
}

/// Annualized Sharpe ratio: `mean / std * sqrt(trading_days_per_year)`.
///
/// Uses the sample standard deviation. Returns exactly `0.0` when the
/// returns have no dispersion (constant series, a single value, or an empty
/// slice); a flat strategy has no risk-adjusted return to report.
pub fn sharpe_ratio(returns: &[f64], trading_days_per_year: usize) -> f64 {
    let stats = sample_stats(returns);
    if stats.is_degenerate() {
        return 0.0;
    }
    stats.mean / stats.std * (trading_days_per_year as f64).sqrt()
}

/// Fractional distance of each wealth value from its running peak.
///
/// Entries are `<= 0.0`; `0.0` means the series is at a new high.
pub fn drawdown_series(wealth: &[f64]) -> Vec<f64> {
    wealth
        .iter()
        .scan(f64::NEG_INFINITY, |peak, &w| {
            *peak = peak.max(w);
            Some((w - *peak) / *peak)
        })
        .collect()
}

/// Most negative drawdown, or `0.0` if wealth never declined.
pub fn max_drawdown(drawdowns: &[f64]) -> f64 {
    drawdowns.iter().copied().fold(0.0, f64::min)
}
