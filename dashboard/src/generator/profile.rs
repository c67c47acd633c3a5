use anyhow::Context;
use chrono::{Duration, NaiveDate};
use intensitycore::api::{
    GenerationShare, IntensityIndex, IntensityReading, NationalForecastEntry, RegionEntry,
    RegionalForecastEntry, SettlementPeriod,
};
use intensitycore::catalog::FuelType;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const PERIODS_PER_DAY: usize = 48;

const PERIOD_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Short names of the upstream DNO regions, indexed from region id 1.
const REGION_NAMES: [&str; 17] = [
    "North Scotland",
    "South Scotland",
    "North West England",
    "North East England",
    "Yorkshire",
    "North Wales & Merseyside",
    "South Wales",
    "West Midlands",
    "East Midlands",
    "East England",
    "South West England",
    "South England",
    "London",
    "South East England",
    "England",
    "Scotland",
    "Wales",
];

/// Configuration for generating a synthetic forecast day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Mean forecast intensity in gCO2/kWh.
    pub base_intensity: f64,
    /// Peak-to-mean amplitude of the daily curve.
    pub swing: f64,
    /// Maximum absolute gap between forecast and actual.
    pub noise: f64,
    pub seed: u64,
    /// Leading periods that already have an actual reading.
    pub published_periods: usize,
    pub region_count: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_intensity: 160.0,
            swing: 60.0,
            noise: 15.0,
            seed: 0,
            published_periods: PERIODS_PER_DAY,
            region_count: REGION_NAMES.len(),
        }
    }
}

impl GeneratorConfig {
    fn normalized_regions(&self) -> usize {
        self.region_count.clamp(1, REGION_NAMES.len())
    }
}

/// Upstream band thresholds for a forecast value.
pub fn band_for(forecast: i64) -> IntensityIndex {
    match forecast {
        i64::MIN..=39 => IntensityIndex::VeryLow,
        40..=119 => IntensityIndex::Low,
        120..=199 => IntensityIndex::Moderate,
        200..=289 => IntensityIndex::High,
        _ => IntensityIndex::VeryHigh,
    }
}

fn build_periods(date: NaiveDate) -> anyhow::Result<Vec<SettlementPeriod>> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .context("building midnight for generator date")?
        .and_utc();
    (0..PERIODS_PER_DAY)
        .map(|slot| -> anyhow::Result<SettlementPeriod> {
            let from = midnight
                .checked_add_signed(Duration::minutes(30 * slot as i64))
                .context("overflow computing settlement period start")?;
            let to = from
                .checked_add_signed(Duration::minutes(30))
                .context("overflow computing settlement period end")?;
            Ok(SettlementPeriod::new(
                from.format(PERIOD_FORMAT).to_string(),
                to.format(PERIOD_FORMAT).to_string(),
            ))
        })
        .collect()
}

fn build_reading(config: &GeneratorConfig, rng: &mut StdRng, slot: usize) -> IntensityReading {
    let phase = slot as f64 / PERIODS_PER_DAY as f64 * 2.0 * PI;
    let forecast = (config.base_intensity + config.swing * (phase - PI / 2.0).sin())
        .max(0.0)
        .round() as i64;
    let actual = if slot < config.published_periods {
        let jitter = if config.noise > 0.0 {
            rng.gen_range(-config.noise..config.noise)
        } else {
            0.0
        };
        Some((forecast as f64 + jitter).max(0.0).round() as i64)
    } else {
        None
    };

    IntensityReading {
        forecast,
        actual,
        index: band_for(forecast),
    }
}

/// Random mix over every fuel type, summing to roughly 100.
fn build_mix(rng: &mut StdRng) -> Vec<GenerationShare> {
    let weights: Vec<f64> = FuelType::ALL.iter().map(|_| rng.gen_range(0.0..1.0)).collect();
    let total: f64 = weights.iter().sum::<f64>().max(f64::EPSILON);
    FuelType::ALL
        .iter()
        .zip(weights)
        .map(|(fuel, weight)| GenerationShare {
            fuel: fuel.key().to_string(),
            perc: (weight / total * 1000.0).round() / 10.0,
        })
        .collect()
}

pub fn build_national_day(
    config: &GeneratorConfig,
    date: NaiveDate,
) -> anyhow::Result<Vec<NationalForecastEntry>> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let entries = build_periods(date)?
        .into_iter()
        .enumerate()
        .map(|(slot, period)| {
            NationalForecastEntry::new(period, build_reading(config, &mut rng, slot))
        })
        .collect();
    Ok(entries)
}

pub fn build_regional_day(
    config: &GeneratorConfig,
    date: NaiveDate,
) -> anyhow::Result<Vec<RegionalForecastEntry>> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let region_count = config.normalized_regions();
    let entries = build_periods(date)?
        .into_iter()
        .enumerate()
        .map(|(slot, period)| {
            let regions = REGION_NAMES
                .iter()
                .take(region_count)
                .enumerate()
                .map(|(offset, name)| RegionEntry {
                    region_id: offset as u32 + 1,
                    short_name: name.to_string(),
                    dno_region: format!("{} DNO", name),
                    intensity: build_reading(config, &mut rng, slot),
                    generation_mix: build_mix(&mut rng),
                })
                .collect();
            RegionalForecastEntry { period, regions }
        })
        .collect();
    Ok(entries)
}
