use crate::catalog::{FuelType, NationalSeries, REGIONAL_PERIOD_LABEL};
use crate::shaping::{ChartRecord, RegionalMixRecord};
use crate::time::{SettlementWindowFormatter, INVALID_DATE};
use serde::Serialize;

/// Shown for a period whose actual reading has not been published yet.
pub const MISSING_ACTUAL: &str = "n/a";

/// One rendered tooltip row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipLine {
    pub label: &'static str,
    pub value: String,
    pub color: Option<&'static str>,
}

impl TooltipLine {
    fn new(label: &'static str, value: String, color: Option<&'static str>) -> Self {
        Self {
            label,
            value,
            color,
        }
    }

    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// Tooltip rows for a national record. Non-finite deviations are left out.
pub fn national_tooltip(record: &ChartRecord) -> Vec<TooltipLine> {
    NationalSeries::ALL
        .into_iter()
        .filter_map(|series| {
            let value = match series {
                NationalSeries::From => record
                    .from
                    .map(SettlementWindowFormatter::format_millis)
                    .unwrap_or_else(|| INVALID_DATE.to_string()),
                NationalSeries::Forecast => record.forecast.to_string(),
                NationalSeries::Actual => record
                    .actual
                    .map(|actual| actual.to_string())
                    .unwrap_or_else(|| MISSING_ACTUAL.to_string()),
                NationalSeries::Index => record.index.label().to_string(),
                NationalSeries::Percentage => {
                    if !record.deviation.is_finite() {
                        return None;
                    }
                    format!("{}%", record.deviation)
                }
            };
            Some(TooltipLine::new(series.tooltip_label(), value, series.color()))
        })
        .collect()
}

/// Tooltip rows for a regional record: the period window, then each fuel.
pub fn regional_tooltip(record: &RegionalMixRecord) -> Vec<TooltipLine> {
    let mut lines = Vec::with_capacity(FuelType::ALL.len() + 1);
    lines.push(TooltipLine::new(
        REGIONAL_PERIOD_LABEL,
        SettlementWindowFormatter::format(&record.from),
        None,
    ));
    lines.extend(record.shares.iter().map(|(fuel, share)| {
        TooltipLine::new(fuel.label(), share.to_string(), Some(fuel.color()))
    }));
    lines
}
