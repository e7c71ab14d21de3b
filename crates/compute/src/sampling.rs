//! Synthetic sample data for demos and tests.

use std::num::{IntErrorKind, ParseIntError};

use foundation::math::round_report;
use foundation::time::{Instant, iso8601, seconds_before};
use rand::Rng;

use crate::data_point::DataPoint;

/// Largest batch a single request may produce; larger requests are truncated.
pub const MAX_SAMPLE_COUNT: usize = 1000;

/// Parse a requested count of any magnitude. Integers too large for `i64`
/// saturate in their own direction, so they still clamp instead of failing;
/// only non-integer input is an error.
pub fn parse_count(raw: &str) -> Result<i64, ParseIntError> {
    match raw.trim().parse::<i64>() {
        Ok(n) => Ok(n),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(err),
        },
    }
}

/// Uniform-random point generator.
///
/// Randomness and the reference time are supplied by the caller so runs can
/// be reproduced with a seeded RNG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGenerator {
    pub max_count: usize,
    pub low: f64,
    pub high: f64,
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self {
            max_count: MAX_SAMPLE_COUNT,
            low: 10.0,
            high: 100.0,
        }
    }
}

impl SampleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points a request for `requested` produces.
    pub fn clamp_count(&self, requested: i64) -> usize {
        if requested <= 0 {
            return 0;
        }
        usize::try_from(requested)
            .unwrap_or(usize::MAX)
            .min(self.max_count)
    }

    /// Produce up to `max_count` points, newest first: point `i` is stamped
    /// `i` seconds before `base_time`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        requested: i64,
        base_time: Instant,
    ) -> Vec<DataPoint> {
        let count = self.clamp_count(requested);
        (0..count)
            .map(|i| {
                let value = round_report(rng.gen_range(self.low..=self.high));
                let timestamp = iso8601(seconds_before(base_time, i as i64));
                DataPoint { value, timestamp }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_SAMPLE_COUNT, SampleGenerator, parse_count};
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn clamps_large_requests() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = SampleGenerator::new().generate(&mut rng, 5000, base());
        assert_eq!(points.len(), MAX_SAMPLE_COUNT);
    }

    #[test]
    fn non_positive_requests_are_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = SampleGenerator::new();
        assert!(g.generate(&mut rng, 0, base()).is_empty());
        assert!(g.generate(&mut rng, -3, base()).is_empty());
        assert_eq!(g.clamp_count(i64::MIN), 0);
        assert_eq!(g.clamp_count(i64::MAX), MAX_SAMPLE_COUNT);
    }

    #[test]
    fn parse_count_saturates_out_of_range_integers() {
        assert_eq!(parse_count("25"), Ok(25));
        assert_eq!(parse_count("-4"), Ok(-4));
        assert_eq!(parse_count("99999999999999999999"), Ok(i64::MAX));
        assert_eq!(parse_count("-99999999999999999999"), Ok(i64::MIN));
        assert!(parse_count("many").is_err());
        assert!(parse_count("1.5").is_err());
        assert!(parse_count("").is_err());

        let g = SampleGenerator::new();
        let huge = parse_count("99999999999999999999").unwrap();
        assert_eq!(g.clamp_count(huge), MAX_SAMPLE_COUNT);
        let tiny = parse_count("-99999999999999999999").unwrap();
        assert_eq!(g.clamp_count(tiny), 0);
    }

    #[test]
    fn timestamps_step_back_one_second() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = SampleGenerator::new().generate(&mut rng, 3, base());
        let stamps: Vec<_> = points.iter().map(|p| p.timestamp.as_str()).collect();
        assert_eq!(
            stamps,
            vec![
                "2024-06-01T08:00:00.000000Z",
                "2024-06-01T07:59:59.000000Z",
                "2024-06-01T07:59:58.000000Z",
            ]
        );
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let g = SampleGenerator::new();
        let a = g.generate(&mut StdRng::seed_from_u64(42), 20, base());
        let b = g.generate(&mut StdRng::seed_from_u64(42), 20, base());
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_values_in_range_with_two_decimals(seed in any::<u64>(), n in 0i64..200) {
            let points = SampleGenerator::new().generate(&mut StdRng::seed_from_u64(seed), n, base());
            prop_assert_eq!(points.len(), n as usize);
            for p in &points {
                prop_assert!((10.0..=100.0).contains(&p.value));
                prop_assert!(((p.value * 100.0).round() - p.value * 100.0).abs() < 1e-6);
            }
        }
    }
}
