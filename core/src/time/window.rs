use crate::time::parse_instant;
use chrono::{DateTime, Duration, Timelike, Utc};

/// Rendered in place of a window when the timestamp cannot be read.
pub const INVALID_DATE: &str = "Invalid Date";

const CLOCK_FORMAT: &str = "%H:%M";

/// Formats settlement-period starts as `"HH:MM - HH:MM"` half-hour windows.
///
/// A period starting on the hour ends at half past; anything else ends on the
/// next hour. Only hour and minute are rendered, so a window starting at
/// `23:30` reads `"23:30 - 00:00"`.
pub struct SettlementWindowFormatter;

impl SettlementWindowFormatter {
    /// End of the window that starts at `start`.
    pub fn window_end(start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let minute = i64::from(start.minute());
        if minute != 0 {
            start.checked_add_signed(Duration::minutes(60 - minute))
        } else {
            start.checked_add_signed(Duration::minutes(30))
        }
    }

    pub fn format_instant(start: DateTime<Utc>) -> String {
        match Self::window_end(start) {
            Some(end) => format!(
                "{} - {}",
                start.format(CLOCK_FORMAT),
                end.format(CLOCK_FORMAT)
            ),
            None => INVALID_DATE.to_string(),
        }
    }

    pub fn format(value: &str) -> String {
        parse_instant(value)
            .map(Self::format_instant)
            .unwrap_or_else(|| INVALID_DATE.to_string())
    }

    /// Formats an epoch-millisecond chart position.
    pub fn format_millis(millis: i64) -> String {
        DateTime::from_timestamp_millis(millis)
            .map(Self::format_instant)
            .unwrap_or_else(|| INVALID_DATE.to_string())
    }

    /// `HH:MM` label for an axis tick at `millis`.
    pub fn clock_label(millis: i64) -> String {
        DateTime::from_timestamp_millis(millis)
            .map(|instant| instant.format(CLOCK_FORMAT).to_string())
            .unwrap_or_else(|| INVALID_DATE.to_string())
    }
}
