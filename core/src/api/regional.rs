use crate::api::{IntensityReading, SettlementPeriod};
use serde::{Deserialize, Serialize};

/// One `(fuel, perc)` pair of a region's generation mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationShare {
    pub fuel: String,
    pub perc: f64,
}

/// A DNO region's reading and generation mix for one settlement period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    #[serde(rename = "regionid")]
    pub region_id: u32,
    #[serde(rename = "shortname")]
    pub short_name: String,
    #[serde(rename = "dnoregion", default)]
    pub dno_region: String,
    pub intensity: IntensityReading,
    #[serde(rename = "generationmix", default)]
    pub generation_mix: Vec<GenerationShare>,
}

/// One regional forecast item: a period and every region, in upstream order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalForecastEntry {
    #[serde(flatten)]
    pub period: SettlementPeriod,
    pub regions: Vec<RegionEntry>,
}
