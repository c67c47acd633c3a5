use crate::time::{parse_instant, DisplayZone};
use chrono::{DateTime, Duration, Utc};

/// Shifts UTC instants onto the chart's local wall-clock positions.
///
/// This is a deliberate approximation rather than a timezone engine: the
/// display zone is checked once, and when it is ahead of UTC every instant is
/// advanced by exactly one hour. Zones with other offsets are positioned as if
/// they were either UTC or UTC+1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneAligner {
    shift_one_hour: bool,
}

impl TimezoneAligner {
    pub fn new(zone: DisplayZone) -> Self {
        Self {
            shift_one_hour: zone.is_ahead_of_utc(),
        }
    }

    pub fn shifts(&self) -> bool {
        self.shift_one_hour
    }

    /// Returns the aligned instant, or `None` if shifting would overflow.
    pub fn align(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.shift_one_hour {
            instant.checked_add_signed(Duration::hours(1))
        } else {
            Some(instant)
        }
    }

    /// Aligns a raw upstream timestamp; malformed input has no position.
    pub fn align_str(&self, value: &str) -> Option<DateTime<Utc>> {
        parse_instant(value).and_then(|instant| self.align(instant))
    }

    /// Aligned position as epoch milliseconds, the chart's x-axis unit.
    pub fn position_millis(&self, value: &str) -> Option<i64> {
        self.align_str(value).map(|instant| instant.timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn summer_time_advances_one_hour() {
        let aligner = TimezoneAligner::new(DisplayZone::from_offset_minutes(60).unwrap());
        let from = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(
            aligner.align(from),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 1, 0, 0).unwrap())
        );
    }

    #[test]
    fn utc_and_western_zones_pass_through() {
        let from = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap();
        for minutes in [0, -300, -60] {
            let aligner = TimezoneAligner::new(DisplayZone::from_offset_minutes(minutes).unwrap());
            assert_eq!(aligner.align(from), Some(from));
        }
    }

    #[test]
    fn two_hour_offset_still_shifts_by_one_hour() {
        let aligner = TimezoneAligner::new(DisplayZone::from_offset_minutes(120).unwrap());
        let from = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        assert_eq!(
            aligner.align(from),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 11, 0, 0).unwrap())
        );
    }

    #[test]
    fn malformed_timestamp_has_no_position() {
        let aligner = TimezoneAligner::new(DisplayZone::utc());
        assert_eq!(aligner.position_millis("yesterday-ish"), None);
    }

    #[test]
    fn align_does_not_touch_the_input() {
        let aligner = TimezoneAligner::new(DisplayZone::from_offset_minutes(60).unwrap());
        let from = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let _ = aligner.align(from);
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    }
}
