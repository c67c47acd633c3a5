use crate::api::{IntensityIndex, NationalForecastEntry};
use crate::math::Deviation;
use crate::prelude::{ShapingStage, StageConfig};
use crate::telemetry::LogManager;
use crate::time::TimezoneAligner;
use serde::Serialize;

/// One settlement period of the national line chart.
///
/// Field names match [`crate::catalog::NationalSeries::key`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRecord {
    /// Aligned period start in epoch milliseconds; `None` when the upstream
    /// timestamp could not be read.
    #[serde(rename = "FROM")]
    pub from: Option<i64>,
    #[serde(rename = "FORECAST")]
    pub forecast: i64,
    #[serde(rename = "ACTUAL")]
    pub actual: Option<i64>,
    #[serde(rename = "INDEX")]
    pub index: IntensityIndex,
    #[serde(rename = "PERCENTAGE")]
    pub deviation: Deviation,
}

/// Maps national entries to one chart record per settlement period.
///
/// Input order is kept. Nothing is sorted or gap-filled, so a missing period
/// shows up as a gap in the chart.
pub struct NationalSeriesBuilder {
    aligner: TimezoneAligner,
    logger: LogManager,
}

impl NationalSeriesBuilder {
    pub fn new(config: &StageConfig) -> Self {
        Self {
            aligner: TimezoneAligner::new(config.zone),
            logger: LogManager::new("national"),
        }
    }

    fn record_for(&self, entry: &NationalForecastEntry) -> ChartRecord {
        let reading = &entry.intensity;
        let from = self.aligner.position_millis(&entry.period.from);
        if from.is_none() {
            self.logger
                .warn(&format!("unreadable period start {:?}", entry.period.from));
        }

        ChartRecord {
            from,
            forecast: reading.forecast,
            actual: reading.actual,
            index: reading.index,
            deviation: Deviation::from_reading(reading.actual, reading.forecast),
        }
    }
}

impl ShapingStage for NationalSeriesBuilder {
    type Input = NationalForecastEntry;
    type Output = ChartRecord;

    fn shape(&self, input: &[NationalForecastEntry]) -> Vec<ChartRecord> {
        let records: Vec<ChartRecord> = input.iter().map(|entry| self.record_for(entry)).collect();
        self.logger.detail(&format!(
            "shaped {} records (shifted: {})",
            records.len(),
            self.aligner.shifts()
        ));
        records
    }
}
