use foundation::math::{round_report, stable_total_cmp_f64};
use serde::{Deserialize, Serialize};

/// Descriptive summary of a batch of values.
///
/// `mean`, `median` and `std_dev` are reported to two decimals; `min` and
/// `max` are the input values as supplied. The all-zero value (also
/// `Default`) stands for an empty batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub count: i64,
}

impl Statistics {
    /// Summarize `values` without modifying them.
    pub fn analyze(values: &[f64]) -> Self {
        let Some(mean) = Self::mean(values) else {
            return Self::default();
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| stable_total_cmp_f64(*a, *b));
        let n = sorted.len();

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        // Population variance: divide by n, not n - 1.
        let mut sum_sq = 0.0;
        for &v in values {
            let d = v - mean;
            sum_sq += d * d;
        }
        let std_dev = (sum_sq / n as f64).sqrt();

        Self {
            mean: round_report(mean),
            median: round_report(median),
            std_dev: round_report(std_dev),
            min: sorted[0],
            max: sorted[n - 1],
            count: n as i64,
        }
    }

    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let mut sum = 0.0;
        for &v in values {
            sum += v;
        }
        Some(sum / values.len() as f64)
    }
}

/// Summarize `values`. See [`Statistics::analyze`].
pub fn analyze(values: &[f64]) -> Statistics {
    Statistics::analyze(values)
}
