use crate::generator::profile::{build_national_day, build_regional_day, GeneratorConfig};
use crate::gui_bridge::model::{
    NationalChart, RegionChart, RegionOption, RegionalComparison, VisualizationModel,
};
use crate::upstream::IntensityClient;
use crate::workflow::config::DashboardConfig;
use crate::workflow::request::{View, ViewRequest};
use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use intensitycore::api::{decode_national, decode_regional, NationalForecastEntry, RegionalForecastEntry};
use intensitycore::catalog::{fuel_legend, national_legend, MIX_AXIS_DOMAIN};
use intensitycore::prelude::{ShapingStage, StageConfig};
use intensitycore::shaping::{
    national_tooltip, regional_tooltip, NationalSeriesBuilder, RegionalMixAggregator,
};
use intensitycore::telemetry::{Metrics, MetricsRecorder};
use intensitycore::time::{DailyAxisTicker, DisplayZone};
use std::sync::Arc;

/// Runs the shaping stages for a view request and assembles the chart payload.
#[derive(Clone)]
pub struct Runner {
    config: DashboardConfig,
    stage_config: StageConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: DashboardConfig) -> anyhow::Result<Self> {
        let stage_config = config
            .to_stage_config()
            .context("resolving display zone")?;
        log::info!("display zone {}", stage_config.zone);
        Ok(Self {
            config,
            stage_config,
            metrics: Arc::new(MetricsRecorder::new()),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn zone(&self) -> DisplayZone {
        self.stage_config.zone
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    pub fn record_stale(&self) {
        self.metrics.record_stale();
    }

    pub fn national(
        &self,
        entries: &[NationalForecastEntry],
        selected: NaiveDate,
        now: DateTime<Utc>,
    ) -> NationalChart {
        let records = NationalSeriesBuilder::new(&self.stage_config).shape(entries);
        let ticker = DailyAxisTicker::new(self.stage_config.zone);
        let axis = entries
            .first()
            .and_then(|entry| entry.period.start())
            .and_then(|start| ticker.axis(start, selected, now));
        let tooltips = records.iter().map(national_tooltip).collect();

        let non_finite = records
            .iter()
            .filter(|record| !record.deviation.is_finite())
            .count();
        self.metrics.record_shaped(records.len());
        self.metrics.record_non_finite(non_finite);

        NationalChart {
            date: selected,
            records,
            tooltips,
            axis,
            legend: national_legend(),
        }
    }

    fn region_chart(&self, entries: &[RegionalForecastEntry], region_id: u32) -> RegionChart {
        let aggregator = RegionalMixAggregator::new(region_id);
        let records = aggregator.shape(entries);
        let fallback_periods = aggregator.fallback_periods(entries);
        self.metrics.record_shaped(records.len());
        self.metrics.record_fallbacks(fallback_periods);
        if fallback_periods > 0 {
            log::debug!(
                "region {} missing from {} periods, using first listed region",
                region_id,
                fallback_periods
            );
        }

        RegionChart {
            requested_region: region_id,
            name: records.first().map(|record| record.name.clone()),
            fallback_periods,
            tooltips: records.iter().map(regional_tooltip).collect(),
            records,
        }
    }

    pub fn regional(
        &self,
        entries: &[RegionalForecastEntry],
        request: &ViewRequest,
    ) -> RegionalComparison {
        RegionalComparison {
            date: request.date,
            regions: RegionOption::list(entries),
            primary: self.region_chart(entries, request.primary_region),
            secondary: self.region_chart(entries, request.secondary_region),
            legend: fuel_legend(),
            y_domain: MIX_AXIS_DOMAIN,
        }
    }

    /// Shapes a raw upstream `{"data": [...]}` body for the requested view.
    pub fn shape_body(
        &self,
        request: &ViewRequest,
        body: &str,
        now: DateTime<Utc>,
    ) -> anyhow::Result<VisualizationModel> {
        let model = match request.view {
            View::National => {
                let entries = decode_national(body).context("decoding national payload")?;
                VisualizationModel::National(self.national(&entries, request.date, now))
            }
            View::Regional => {
                let entries = decode_regional(body).context("decoding regional payload")?;
                VisualizationModel::Regional(self.regional(&entries, request))
            }
        };
        Ok(model)
    }

    pub fn shape_synthetic(
        &self,
        request: &ViewRequest,
        generator: &GeneratorConfig,
        now: DateTime<Utc>,
    ) -> anyhow::Result<VisualizationModel> {
        let model = match request.view {
            View::National => {
                let entries = build_national_day(generator, request.date)
                    .context("generating synthetic national day")?;
                VisualizationModel::National(self.national(&entries, request.date, now))
            }
            View::Regional => {
                let entries = build_regional_day(generator, request.date)
                    .context("generating synthetic regional day")?;
                VisualizationModel::Regional(self.regional(&entries, request))
            }
        };
        Ok(model)
    }

    pub async fn fetch(
        &self,
        client: &IntensityClient,
        request: &ViewRequest,
        now: DateTime<Utc>,
    ) -> anyhow::Result<VisualizationModel> {
        let model = match request.view {
            View::National => {
                let entries = client.national(request.date).await?;
                VisualizationModel::National(self.national(&entries, request.date, now))
            }
            View::Regional => {
                let entries = client.regional(request.date).await?;
                VisualizationModel::Regional(self.regional(&entries, request))
            }
        };
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn runner(offset_minutes: i32) -> Runner {
        let cfg = DashboardConfig {
            display_offset_minutes: Some(offset_minutes),
            ..Default::default()
        };
        Runner::new(cfg).unwrap()
    }

    fn request(view: View) -> ViewRequest {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        ViewRequest::new(view, date, &DashboardConfig::default())
    }

    #[test]
    fn runner_shapes_synthetic_national_day() {
        let runner = runner(60);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let model = runner
            .shape_synthetic(&request(View::National), &GeneratorConfig::default(), now)
            .unwrap();
        let VisualizationModel::National(chart) = model else {
            panic!("expected national chart");
        };
        assert_eq!(chart.records.len(), 48);
        assert_eq!(chart.tooltips.len(), 48);
        let axis = chart.axis.unwrap();
        assert_eq!(axis.ticks.len(), 7);
        assert!(axis.now_marker.is_some());
        assert_eq!(runner.metrics().records_shaped, 48);
    }

    #[test]
    fn runner_shapes_regional_body_with_fallback() {
        let runner = runner(0);
        let body = r#"{"data": [{
            "from": "2024-06-01T00:00Z",
            "to": "2024-06-01T00:30Z",
            "regions": [
                {"regionid": 1, "shortname": "North Scotland", "dnoregion": "SSEN",
                 "intensity": {"forecast": 5, "index": "very low"},
                 "generationmix": [{"fuel": "wind", "perc": 100.0}]},
                {"regionid": 2, "shortname": "South Scotland", "dnoregion": "SP Distribution",
                 "intensity": {"forecast": 20, "index": "very low"},
                 "generationmix": [{"fuel": "nuclear", "perc": 60.0}, {"fuel": "wind", "perc": 40.0}]}
            ]
        }]}"#;
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let request = request(View::Regional).with_regions(Some(2), Some(42));
        let model = runner.shape_body(&request, body, now).unwrap();
        let VisualizationModel::Regional(comparison) = model else {
            panic!("expected regional comparison");
        };
        assert_eq!(comparison.regions.len(), 2);
        assert_eq!(comparison.primary.name.as_deref(), Some("South Scotland"));
        assert_eq!(comparison.primary.records[0].shares.nuclear, 60.0);
        assert_eq!(comparison.secondary.name.as_deref(), Some("North Scotland"));
        assert_eq!(comparison.secondary.fallback_periods, 1);
        assert_eq!(comparison.y_domain, (0.0, 100.0));
        assert_eq!(runner.metrics().region_fallbacks, 1);
    }

    #[test]
    fn empty_upstream_day_yields_empty_model() {
        let runner = runner(0);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let model = runner
            .shape_body(&request(View::National), r#"{"data": []}"#, now)
            .unwrap();
        assert!(model.is_empty());
        let VisualizationModel::National(chart) = model else {
            panic!("expected national chart");
        };
        assert!(chart.axis.is_none());
    }

    #[test]
    fn malformed_body_is_reported() {
        let runner = runner(0);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert!(runner
            .shape_body(&request(View::Regional), "{\"data\": 7}", now)
            .is_err());
    }
}
