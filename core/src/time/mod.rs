pub mod align;
pub mod bound;
pub mod ticks;
pub mod window;
pub mod zone;

pub use align::TimezoneAligner;
pub use bound::ForecastDateBound;
pub use ticks::{DailyAxis, DailyAxisTicker};
pub use window::{SettlementWindowFormatter, INVALID_DATE};
pub use zone::DisplayZone;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Minute-precision form used by the upstream API, e.g. `2024-06-01T00:30Z`.
const UPSTREAM_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%MZ";
const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// Parses an upstream timestamp into a UTC instant.
///
/// Accepts RFC 3339 (any offset), the upstream minute-precision form and a
/// bare `YYYY-MM-DD`, which reads as UTC midnight. Returns `None` for anything else.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, UPSTREAM_MINUTE_FORMAT) {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, DATE_ONLY_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
