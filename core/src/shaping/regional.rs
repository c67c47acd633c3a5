use crate::api::{GenerationShare, RegionEntry, RegionalForecastEntry};
use crate::catalog::{FuelShares, FuelType};
use crate::prelude::ShapingStage;
use crate::telemetry::LogManager;
use serde::Serialize;

/// One settlement period of a region's stacked generation-mix chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalMixRecord {
    pub from: String,
    pub to: String,
    pub name: String,
    #[serde(flatten)]
    pub shares: FuelShares,
}

/// Picks the fuel shares out of a generation mix.
///
/// Fuels absent from the mix default to zero, unrecognised fuel names are
/// ignored and the first entry wins when a fuel is listed twice. Negative
/// shares are clamped to zero.
pub fn shares_from_mix(mix: &[GenerationShare]) -> FuelShares {
    let mut seen = Vec::with_capacity(FuelType::ALL.len());
    mix.iter()
        .fold(FuelShares::default(), |shares, entry| match FuelType::from_key(&entry.fuel) {
            Some(fuel) if !seen.contains(&fuel) => {
                seen.push(fuel);
                shares.with_share(fuel, entry.perc.max(0.0))
            }
            _ => shares,
        })
}

/// Maps regional entries to one generation-mix record per period for a single region.
pub struct RegionalMixAggregator {
    region_id: u32,
    logger: LogManager,
}

impl RegionalMixAggregator {
    pub fn new(region_id: u32) -> Self {
        Self {
            region_id,
            logger: LogManager::new("regional"),
        }
    }

    /// The requested region, or the first listed region when it is absent.
    ///
    /// The fallback is silent: a region missing from the data is replaced, not
    /// reported. `None` only when the entry lists no regions at all.
    pub fn select_region<'a>(&self, regions: &'a [RegionEntry]) -> Option<&'a RegionEntry> {
        regions
            .iter()
            .find(|region| region.region_id == self.region_id)
            .or_else(|| regions.first())
    }

    /// Number of periods where the requested region had to be substituted.
    pub fn fallback_periods(&self, input: &[RegionalForecastEntry]) -> usize {
        input
            .iter()
            .filter(|entry| !entry.regions.is_empty())
            .filter(|entry| {
                !entry
                    .regions
                    .iter()
                    .any(|region| region.region_id == self.region_id)
            })
            .count()
    }

    fn record_for(&self, entry: &RegionalForecastEntry) -> Option<RegionalMixRecord> {
        let region = match self.select_region(&entry.regions) {
            Some(region) => region,
            None => {
                self.logger.warn(&format!(
                    "period {} lists no regions, skipping",
                    entry.period.from
                ));
                return None;
            }
        };

        Some(RegionalMixRecord {
            from: entry.period.from.clone(),
            to: entry.period.to.clone(),
            name: region.short_name.clone(),
            shares: shares_from_mix(&region.generation_mix),
        })
    }
}

impl ShapingStage for RegionalMixAggregator {
    type Input = RegionalForecastEntry;
    type Output = RegionalMixRecord;

    fn shape(&self, input: &[RegionalForecastEntry]) -> Vec<RegionalMixRecord> {
        let records: Vec<RegionalMixRecord> =
            input.iter().filter_map(|entry| self.record_for(entry)).collect();
        self.logger.detail(&format!(
            "region {} shaped {} records",
            self.region_id,
            records.len()
        ));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{IntensityIndex, IntensityReading, SettlementPeriod};

    fn share(fuel: &str, perc: f64) -> GenerationShare {
        GenerationShare {
            fuel: fuel.into(),
            perc,
        }
    }

    fn region(id: u32, name: &str, mix: Vec<GenerationShare>) -> RegionEntry {
        RegionEntry {
            region_id: id,
            short_name: name.into(),
            dno_region: format!("{} DNO", name),
            intensity: IntensityReading {
                forecast: 100,
                actual: None,
                index: IntensityIndex::Low,
            },
            generation_mix: mix,
        }
    }

    fn period(from: &str, regions: Vec<RegionEntry>) -> RegionalForecastEntry {
        RegionalForecastEntry {
            period: SettlementPeriod::new(from, from),
            regions,
        }
    }

    fn sample_day() -> Vec<RegionalForecastEntry> {
        (0..3)
            .map(|slot| {
                period(
                    &format!("2024-06-01T0{}:00Z", slot),
                    vec![
                        region(1, "North Scotland", vec![share("wind", 80.0), share("hydro", 20.0)]),
                        region(
                            2,
                            "South Scotland",
                            vec![share("nuclear", 55.5), share("wind", 40.0), share("gas", 4.5)],
                        ),
                    ],
                )
            })
            .collect()
    }

    #[test]
    fn records_carry_all_ten_fuels() {
        let records = RegionalMixAggregator::new(2).shape(&sample_day());
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.name, "South Scotland");
            assert_eq!(record.shares.iter().count(), 10);
            assert!(record.shares.iter().all(|(_, value)| value >= 0.0));
            assert_eq!(record.shares.nuclear, 55.5);
            assert_eq!(record.shares.coal, 0.0);
            assert_eq!(record.shares.total(), 100.0);
        }
    }

    #[test]
    fn unknown_region_falls_back_to_first() {
        let aggregator = RegionalMixAggregator::new(99);
        let records = aggregator.shape(&sample_day());
        assert!(records.iter().all(|record| record.name == "North Scotland"));
        assert_eq!(aggregator.fallback_periods(&sample_day()), 3);
        assert_eq!(RegionalMixAggregator::new(1).fallback_periods(&sample_day()), 0);
    }

    #[test]
    fn no_renormalization_of_short_mixes() {
        let mix = vec![share("gas", 30.0), share("solar", 20.0)];
        assert_eq!(shares_from_mix(&mix).total(), 50.0);
    }

    #[test]
    fn unknown_duplicate_and_negative_fuels() {
        let mix = vec![
            share("peat", 12.0),
            share("wind", 30.0),
            share("wind", 70.0),
            share("coal", -1.0),
        ];
        let shares = shares_from_mix(&mix);
        assert_eq!(shares.wind, 30.0);
        assert_eq!(shares.coal, 0.0);
        assert_eq!(shares.total(), 30.0);
    }

    #[test]
    fn entries_without_regions_are_skipped() {
        let mut day = sample_day();
        day.insert(1, period("2024-06-01T00:30Z", Vec::new()));
        let records = RegionalMixAggregator::new(1).shape(&day);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].from, "2024-06-01T01:00Z");
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(RegionalMixAggregator::new(1).shape(&[]).is_empty());
    }

    #[test]
    fn shaping_is_idempotent() {
        let aggregator = RegionalMixAggregator::new(2);
        let day = sample_day();
        assert_eq!(aggregator.shape(&day), aggregator.shape(&day));
    }

    #[test]
    fn serialized_record_is_flat() {
        let records = RegionalMixAggregator::new(1).shape(&sample_day());
        let value = serde_json::to_value(&records[0]).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 13);
        assert_eq!(object["name"], "North Scotland");
        assert_eq!(object["wind"], 80.0);
    }
}
