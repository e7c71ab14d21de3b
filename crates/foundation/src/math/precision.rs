//! Precision policies.
//!
//! This module is intentionally small and conservative. It provides:
//! - Decimal rounding for values reported to clients (`round_to`).
//! - A deterministic float ordering (`stable_total_cmp_f64`) for sorting.

use core::cmp::Ordering;

/// CPU-authoritative precision type.
pub type HighPrecision = f64;

/// Number of decimals used for reported summary values.
pub const REPORT_DECIMALS: u32 = 2;

/// Round `v` to `decimals` fractional digits, half away from zero.
///
/// The scaling happens in binary floating point, so a literal such as `1.005`
/// (stored as `1.00499999...`) rounds down to `1.0`. Values whose scaled form
/// is not finite are returned unchanged.
pub fn round_to(v: HighPrecision, decimals: u32) -> HighPrecision {
    let factor = 10f64.powi(decimals as i32);
    let scaled = v * factor;
    if !scaled.is_finite() {
        return v;
    }
    canonical_f64(scaled.round() / factor)
}

/// Round to [`REPORT_DECIMALS`] places.
#[inline]
pub fn round_report(v: HighPrecision) -> HighPrecision {
    round_to(v, REPORT_DECIMALS)
}

/// Canonicalize a floating-point value for deterministic ordering.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        // Handles +0.0 and -0.0.
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Deterministic total ordering for floats.
///
/// Prefer this any time you sort floats or use them in ordered keys.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    canonical_f64(a).total_cmp(&canonical_f64(b))
}
