use crate::time::parse_instant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-hour settlement period as published upstream.
///
/// Timestamps stay as the raw strings and are parsed on use, so a malformed
/// value degrades a single row instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPeriod {
    pub from: String,
    pub to: String,
}

impl SettlementPeriod {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.from)
    }
}

/// Carbon intensity band published alongside each reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityIndex {
    #[serde(rename = "very low")]
    VeryLow,
    Low,
    Moderate,
    High,
    #[serde(rename = "very high")]
    VeryHigh,
    #[serde(other)]
    Unknown,
}

impl IntensityIndex {
    pub fn label(self) -> &'static str {
        match self {
            IntensityIndex::VeryLow => "very low",
            IntensityIndex::Low => "low",
            IntensityIndex::Moderate => "moderate",
            IntensityIndex::High => "high",
            IntensityIndex::VeryHigh => "very high",
            IntensityIndex::Unknown => "unknown",
        }
    }
}

/// Forecast and (possibly provisional) actual intensity, in gCO2/kWh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensityReading {
    pub forecast: i64,
    #[serde(default)]
    pub actual: Option<i64>,
    pub index: IntensityIndex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_tolerates_null_actual_and_unknown_band() {
        let reading: IntensityReading =
            serde_json::from_str(r#"{"forecast": 210, "actual": null, "index": "extreme"}"#)
                .unwrap();
        assert_eq!(reading.actual, None);
        assert_eq!(reading.index, IntensityIndex::Unknown);
    }

    #[test]
    fn multi_word_bands_parse() {
        let reading: IntensityReading =
            serde_json::from_str(r#"{"forecast": 40, "actual": 38, "index": "very low"}"#).unwrap();
        assert_eq!(reading.index, IntensityIndex::VeryLow);
        assert_eq!(reading.index.label(), "very low");
    }

    #[test]
    fn period_parses_upstream_timestamps() {
        let period = SettlementPeriod::new("2024-06-01T00:00Z", "2024-06-01T00:30Z");
        let start = period.start().unwrap();
        assert_eq!(start.timestamp() % 1800, 0);
        assert_eq!(parse_instant(&period.to), Some(start + chrono::Duration::minutes(30)));
        assert!(SettlementPeriod::new("??", "??").start().is_none());
    }
}
