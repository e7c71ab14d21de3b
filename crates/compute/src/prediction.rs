//! Placeholder linear "model" used by the prediction endpoint.
//!
//! There is no trained model behind this: the output is `value * 1.5` plus
//! uniform noise, with a random confidence score.

use foundation::math::round_report;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identifier reported alongside every prediction.
pub const MODEL_NAME: &str = "mock_linear_v1";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockPredictor {
    pub slope: f64,
    pub noise: f64,
    pub confidence_low: f64,
    pub confidence_high: f64,
}

impl Default for MockPredictor {
    fn default() -> Self {
        Self {
            slope: 1.5,
            noise: 5.0,
            confidence_low: 0.7,
            confidence_high: 0.99,
        }
    }
}

impl MockPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R, value: f64) -> Prediction {
        let noise = rng.gen_range(-self.noise..=self.noise);
        let confidence = rng.gen_range(self.confidence_low..=self.confidence_high);
        Prediction {
            prediction: round_report(value * self.slope + noise),
            confidence: round_report(confidence),
        }
    }
}
