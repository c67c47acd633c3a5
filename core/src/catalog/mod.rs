//! Labels, colours and axis bounds for the two chart views.

pub mod fuel;
pub mod series;

pub use fuel::{FuelShares, FuelType};
pub use series::NationalSeries;

use serde::Serialize;

/// Tooltip label of the period field in the regional view.
pub const REGIONAL_PERIOD_LABEL: &str = "Time Period";

/// Fixed y-axis domain of the stacked generation-mix chart, in percent.
pub const MIX_AXIS_DOMAIN: (f64, f64) = (0.0, 100.0);

/// One legend row handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

pub fn national_legend() -> Vec<LegendEntry> {
    NationalSeries::PLOTTED
        .into_iter()
        .filter_map(|series| {
            Some(LegendEntry {
                key: series.key(),
                label: series.legend_label()?,
                color: series.color()?,
            })
        })
        .collect()
}

pub fn fuel_legend() -> Vec<LegendEntry> {
    FuelType::ALL
        .into_iter()
        .map(|fuel| LegendEntry {
            key: fuel.key(),
            label: fuel.label(),
            color: fuel.color(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_legend_lists_forecast_then_actual() {
        let keys: Vec<_> = national_legend().iter().map(|entry| entry.key).collect();
        assert_eq!(keys, vec!["FORECAST", "ACTUAL"]);
    }

    #[test]
    fn fuel_legend_covers_all_fuels() {
        assert_eq!(fuel_legend().len(), FuelType::ALL.len());
    }
}
