use chrono::NaiveDate;
use intensitycore::api::RegionalForecastEntry;
use intensitycore::catalog::LegendEntry;
use intensitycore::shaping::{ChartRecord, RegionalMixRecord, TooltipLine};
use intensitycore::time::DailyAxis;
use serde::Serialize;

/// Line-chart payload for the national view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationalChart {
    pub date: NaiveDate,
    pub records: Vec<ChartRecord>,
    pub tooltips: Vec<Vec<TooltipLine>>,
    pub axis: Option<DailyAxis>,
    pub legend: Vec<LegendEntry>,
}

/// Stacked-bar payload for one selected region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionChart {
    pub requested_region: u32,
    pub name: Option<String>,
    pub fallback_periods: usize,
    pub records: Vec<RegionalMixRecord>,
    pub tooltips: Vec<Vec<TooltipLine>>,
}

/// A selectable region, as listed in the first period of the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionOption {
    pub region_id: u32,
    pub short_name: String,
    pub dno_region: String,
}

impl RegionOption {
    pub fn list(entries: &[RegionalForecastEntry]) -> Vec<RegionOption> {
        entries
            .first()
            .map(|entry| {
                entry
                    .regions
                    .iter()
                    .map(|region| RegionOption {
                        region_id: region.region_id,
                        short_name: region.short_name.clone(),
                        dno_region: region.dno_region.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Two independently selected regions side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalComparison {
    pub date: NaiveDate,
    pub regions: Vec<RegionOption>,
    pub primary: RegionChart,
    pub secondary: RegionChart,
    pub legend: Vec<LegendEntry>,
    pub y_domain: (f64, f64),
}

/// What the renderer is currently showing.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum VisualizationModel {
    #[default]
    Empty,
    National(NationalChart),
    Regional(RegionalComparison),
}

impl VisualizationModel {
    /// No rows to plot; the renderer shows its "no data" state.
    pub fn is_empty(&self) -> bool {
        match self {
            VisualizationModel::Empty => true,
            VisualizationModel::National(chart) => chart.records.is_empty(),
            VisualizationModel::Regional(comparison) => {
                comparison.primary.records.is_empty() && comparison.secondary.records.is_empty()
            }
        }
    }

    pub fn summary(&self) -> String {
        match self {
            VisualizationModel::Empty => "no data".to_string(),
            VisualizationModel::National(chart) => format!(
                "national {} -> records {}, ticks {}, now marker {}",
                chart.date,
                chart.records.len(),
                chart.axis.as_ref().map(|axis| axis.ticks.len()).unwrap_or(0),
                chart
                    .axis
                    .as_ref()
                    .and_then(|axis| axis.now_marker)
                    .is_some()
            ),
            VisualizationModel::Regional(comparison) => format!(
                "regional {} -> {} ({} records, {} fallbacks) vs {} ({} records, {} fallbacks)",
                comparison.date,
                comparison.primary.name.as_deref().unwrap_or("-"),
                comparison.primary.records.len(),
                comparison.primary.fallback_periods,
                comparison.secondary.name.as_deref().unwrap_or("-"),
                comparison.secondary.records.len(),
                comparison.secondary.fallback_periods
            ),
        }
    }
}
