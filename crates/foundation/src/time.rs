//! Time primitives for timestamped samples.

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

/// Wall-clock instant in UTC.
pub type Instant = DateTime<Utc>;

/// Current wall-clock time.
pub fn now() -> Instant {
    Utc::now()
}

/// ISO-8601 / RFC 3339 rendering with microsecond precision and a `Z` suffix.
pub fn iso8601(t: Instant) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// The instant `seconds` seconds before `base`.
///
/// Saturates at `base` if the offset cannot be represented.
pub fn seconds_before(base: Instant, seconds: i64) -> Instant {
    TimeDelta::try_seconds(seconds)
        .and_then(|delta| base.checked_sub_signed(delta))
        .unwrap_or(base)
}
