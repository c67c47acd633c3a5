use crate::prelude::{ShapeResult, ShapingError};
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// How far ahead the upstream API publishes forecasts.
pub const FORECAST_HORIZON_HOURS: i64 = 48;

/// Upper bound on the dates a user may select. There is no lower bound.
pub struct ForecastDateBound;

impl ForecastDateBound {
    /// UTC calendar date of the last instant a forecast may exist for.
    pub fn latest_selectable(now: DateTime<Utc>) -> NaiveDate {
        now.checked_add_signed(Duration::hours(FORECAST_HORIZON_HOURS))
            .unwrap_or(now)
            .date_naive()
    }

    pub fn ensure_selectable(requested: NaiveDate, now: DateTime<Utc>) -> ShapeResult<NaiveDate> {
        let latest = Self::latest_selectable(now);
        if requested > latest {
            return Err(ShapingError::DateOutOfRange { requested, latest });
        }
        Ok(requested)
    }
}
