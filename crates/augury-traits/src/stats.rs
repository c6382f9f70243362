//! Statistical helpers shared by the evaluator.
//!
//! Return statistics follow the sample convention (N-1 denominator) used by
//! dataframe libraries, so ratios match what an analyst computes by hand.

use ndarray::Array1;

/// Minimum threshold for standard deviation to avoid division by zero.
/// Values below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Summary statistics of a return series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    /// Arithmetic mean of the finite values.
    pub mean: f64,
    /// Sample standard deviation (N-1 denominator), 0.0 with fewer than two values.
    pub std: f64,
    /// Number of finite values used.
    pub n: usize,
}

impl SampleStats {
    /// Whether the series has (numerically) zero dispersion.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.n < 2 || !self.std.is_finite() || self.std <= MIN_STD_THRESHOLD
    }
}

/// Compute mean and sample standard deviation of the finite values in `values`.
///
/// # Edge Cases
///
/// - Empty input (or no finite values): mean=NaN, std=0.0, n=0
/// - Single value: std=0.0
/// - NaN/Inf entries are excluded
///
/// # Examples
///
/// ```
/// use augury_traits::stats::sample_stats;
///
/// let stats = sample_stats(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert!((stats.mean - 3.0).abs() < 1e-12);
/// assert!(!stats.is_degenerate());
/// ```
pub fn sample_stats(values: &[f64]) -> SampleStats {
    let finite: Array1<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    let n = finite.len();

    let Some(mean) = finite.mean() else {
        return SampleStats {
            mean: f64::NAN,
            std: 0.0,
            n: 0,
        };
    };

    // ddof=1 is undefined for a single observation
    let std = if n > 1 { finite.std(1.0) } else { 0.0 };

    SampleStats { mean, std, n }
}
