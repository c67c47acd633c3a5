use crate::api::{IntensityReading, SettlementPeriod};
use serde::{Deserialize, Serialize};

/// One national forecast item from `/intensity/date/{date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalForecastEntry {
    #[serde(flatten)]
    pub period: SettlementPeriod,
    pub intensity: IntensityReading,
}

impl NationalForecastEntry {
    pub fn new(period: SettlementPeriod, intensity: IntensityReading) -> Self {
        Self { period, intensity }
    }
}
