use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};
use std::fmt;

/// The wall-clock zone the dashboard is rendered in.
///
/// A single fixed offset, captured once per render. There is no timezone
/// database behind it, so a day that crosses a daylight-saving transition is
/// treated as if the offset held all day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayZone {
    offset: FixedOffset,
}

impl DisplayZone {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Captures the machine's current local offset.
    pub fn local_now() -> Self {
        Self {
            offset: *Local::now().offset(),
        }
    }

    /// Offset east of UTC in minutes (BST is `60`).
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// True when local wall-clock time is ahead of UTC, e.g. during British Summer Time.
    pub fn is_ahead_of_utc(&self) -> bool {
        self.offset.local_minus_utc() > 0
    }

    /// Calendar date of `instant` as observed in this zone.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// The UTC instant at which `date` starts in this zone.
    pub fn local_midnight(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        date.and_hms_opt(0, 0, 0)?
            .and_local_timezone(self.offset)
            .single()
            .map(|midnight| midnight.with_timezone(&Utc))
    }
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.offset_minutes();
        let sign = if minutes < 0 { '-' } else { '+' };
        write!(
            f,
            "UTC{}{:02}:{:02}",
            sign,
            minutes.abs() / 60,
            minutes.abs() % 60
        )
    }
}
