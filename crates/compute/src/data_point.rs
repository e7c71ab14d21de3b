use serde::{Deserialize, Serialize};

/// A single observation.
///
/// The timestamp is carried as supplied; only generated points are
/// guaranteed to be ISO-8601.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub value: f64,
    pub timestamp: String,
}

/// Project a batch of points onto their values, preserving order.
pub fn values_of(points: &[DataPoint]) -> Vec<f64> {
    points.iter().map(|p| p.value).collect()
}
