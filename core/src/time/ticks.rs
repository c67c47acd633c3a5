use crate::time::{DisplayZone, SettlementWindowFormatter, TimezoneAligner};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

/// Local hours of the first six ticks; the seventh is one hour past the next midnight.
pub const TICK_HOURS: [i64; 6] = [1, 5, 9, 13, 17, 21];
pub const TICK_COUNT: usize = TICK_HOURS.len() + 1;

/// X-axis layout for one selected day, in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAxis {
    pub ticks: Vec<i64>,
    pub tick_labels: Vec<String>,
    pub domain: (i64, i64),
    pub now_marker: Option<i64>,
}

/// Builds the fixed daily tick set and the "now" reference marker.
#[derive(Debug, Clone, Copy)]
pub struct DailyAxisTicker {
    zone: DisplayZone,
    aligner: TimezoneAligner,
}

impl DailyAxisTicker {
    pub fn new(zone: DisplayZone) -> Self {
        Self {
            zone,
            aligner: TimezoneAligner::new(zone),
        }
    }

    /// Local midnight of the day containing `first_period_start`.
    pub fn start_of_day(&self, first_period_start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.zone
            .local_midnight(self.zone.local_date(first_period_start))
    }

    /// The seven ticks: 01:00, 05:00, ... 21:00 local, then next-day 01:00 local.
    pub fn ticks(&self, first_period_start: DateTime<Utc>) -> Option<[DateTime<Utc>; TICK_COUNT]> {
        let start = self.start_of_day(first_period_start)?;
        let end_of_day = start.checked_add_signed(Duration::hours(24))?;
        let mut ticks = [end_of_day; TICK_COUNT];
        for (slot, hours) in ticks.iter_mut().zip(TICK_HOURS) {
            *slot = start.checked_add_signed(Duration::hours(hours))?;
        }
        ticks[TICK_COUNT - 1] = end_of_day.checked_add_signed(Duration::hours(1))?;
        Some(ticks)
    }

    /// Reference instant for "now", shifted the same way as the series.
    pub fn now_instant(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.aligner.align(now)
    }

    /// The marker is drawn only when the selected date looks like today.
    ///
    /// Compares day-of-month alone, so the 5th of one month matches the 5th of
    /// any other.
    pub fn shows_now_marker(&self, selected: NaiveDate, now: DateTime<Utc>) -> bool {
        selected.day() == self.zone.local_date(now).day()
    }

    /// Full axis for a render of `selected`, whose data starts at `first_period_start`.
    pub fn axis(
        &self,
        first_period_start: DateTime<Utc>,
        selected: NaiveDate,
        now: DateTime<Utc>,
    ) -> Option<DailyAxis> {
        let ticks: Vec<i64> = self
            .ticks(first_period_start)?
            .iter()
            .map(|tick| tick.timestamp_millis())
            .collect();
        let end_of_day = self
            .start_of_day(first_period_start)?
            .checked_add_signed(Duration::hours(24))?;
        let domain_start = self
            .zone
            .local_midnight(selected)?
            .checked_add_signed(Duration::hours(1))?;
        let now_marker = if self.shows_now_marker(selected, now) {
            self.now_instant(now).map(|instant| instant.timestamp_millis())
        } else {
            None
        };
        let tick_labels = ticks
            .iter()
            .map(|&tick| SettlementWindowFormatter::clock_label(tick))
            .collect();

        Some(DailyAxis {
            ticks,
            tick_labels,
            domain: (domain_start.timestamp_millis(), end_of_day.timestamp_millis()),
            now_marker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn bst() -> DisplayZone {
        DisplayZone::from_offset_minutes(60).unwrap()
    }

    #[test]
    fn seven_strictly_increasing_ticks_for_any_day() {
        let ticker = DailyAxisTicker::new(DisplayZone::utc());
        for day in 1..=28 {
            let start = Utc.with_ymd_and_hms(2024, 2, day, 0, 0, 0).unwrap();
            let ticks = ticker.ticks(start).unwrap();
            assert_eq!(ticks.len(), 7);
            assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
            assert_eq!(ticks[0], start + Duration::hours(1));
            assert_eq!(ticks[6], start + Duration::hours(25));
        }
    }

    #[test]
    fn ticks_sit_on_local_hours() {
        let ticker = DailyAxisTicker::new(bst());
        let first = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let ticks = ticker.ticks(first).unwrap();
        let local_hours: Vec<u32> = ticks
            .iter()
            .map(|tick| tick.with_timezone(&bst().offset()).hour())
            .collect();
        assert_eq!(local_hours, vec![1, 5, 9, 13, 17, 21, 1]);
    }

    #[test]
    fn west_of_utc_anchors_to_previous_local_day() {
        let zone = DisplayZone::from_offset_minutes(-300).unwrap();
        let ticker = DailyAxisTicker::new(zone);
        let first = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let midnight = Utc.with_ymd_and_hms(2024, 5, 31, 5, 0, 0).unwrap();
        assert_eq!(ticker.start_of_day(first), Some(midnight));

        let ticks = ticker.ticks(first).unwrap();
        assert_eq!(ticks[0], midnight + Duration::hours(1));
        assert_eq!(ticks[6], midnight + Duration::hours(25));
        assert_eq!(ticks[0].with_timezone(&zone.offset()).day(), 31);
        assert!(ticks.iter().all(|tick| tick.with_timezone(&zone.offset()).minute() == 0));
    }

    #[test]
    fn now_marker_only_for_same_day_of_month() {
        let ticker = DailyAxisTicker::new(DisplayZone::utc());
        let now = Utc.with_ymd_and_hms(2024, 6, 5, 12, 0, 0).unwrap();
        let first = Utc.with_ymd_and_hms(2024, 6, 5, 0, 0, 0).unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        let axis = ticker.axis(first, today, now).unwrap();
        assert_eq!(axis.now_marker, Some(now.timestamp_millis()));

        let tomorrow = NaiveDate::from_ymd_opt(2024, 6, 6).unwrap();
        assert_eq!(ticker.axis(first, tomorrow, now).unwrap().now_marker, None);

        let next_month = NaiveDate::from_ymd_opt(2024, 7, 5).unwrap();
        assert!(ticker.shows_now_marker(next_month, now));
    }

    #[test]
    fn now_marker_shifts_in_summer_time() {
        let ticker = DailyAxisTicker::new(bst());
        let now = Utc.with_ymd_and_hms(2024, 6, 5, 12, 0, 0).unwrap();
        assert_eq!(ticker.now_instant(now), Some(now + Duration::hours(1)));
    }

    #[test]
    fn domain_spans_selected_day() {
        let ticker = DailyAxisTicker::new(DisplayZone::utc());
        let first = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap();
        let selected = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let axis = ticker.axis(first, selected, now).unwrap();
        assert_eq!(axis.domain.0, (first + Duration::hours(1)).timestamp_millis());
        assert_eq!(axis.domain.1, (first + Duration::hours(24)).timestamp_millis());
        assert_eq!(axis.tick_labels[0], "01:00");
        assert_eq!(axis.tick_labels[6], "01:00");
    }
}
