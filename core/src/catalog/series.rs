/// Fields of a national chart record, in tooltip order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NationalSeries {
    From,
    Forecast,
    Actual,
    Index,
    Percentage,
}

impl NationalSeries {
    pub const ALL: [NationalSeries; 5] = [
        NationalSeries::From,
        NationalSeries::Forecast,
        NationalSeries::Actual,
        NationalSeries::Index,
        NationalSeries::Percentage,
    ];

    /// Series drawn as lines; the rest only appear in the tooltip.
    pub const PLOTTED: [NationalSeries; 2] = [NationalSeries::Forecast, NationalSeries::Actual];

    /// Field name in the serialized chart record.
    pub fn key(self) -> &'static str {
        match self {
            NationalSeries::From => "FROM",
            NationalSeries::Forecast => "FORECAST",
            NationalSeries::Actual => "ACTUAL",
            NationalSeries::Index => "INDEX",
            NationalSeries::Percentage => "PERCENTAGE",
        }
    }

    pub fn tooltip_label(self) -> &'static str {
        match self {
            NationalSeries::From => "Time",
            NationalSeries::Forecast => "Forecast",
            NationalSeries::Actual => "Actual",
            NationalSeries::Index => "Carbon Intensity Index",
            NationalSeries::Percentage => "% Difference",
        }
    }

    pub fn legend_label(self) -> Option<&'static str> {
        match self {
            NationalSeries::Forecast => Some("Forecast / gCO2/kWh"),
            NationalSeries::Actual => Some("Actual / gCO2/kWh"),
            NationalSeries::From | NationalSeries::Index | NationalSeries::Percentage => None,
        }
    }

    pub fn color(self) -> Option<&'static str> {
        match self {
            NationalSeries::Forecast => Some("#FFC425"),
            NationalSeries::Actual => Some("#2a68b4"),
            NationalSeries::Index | NationalSeries::Percentage => Some("white"),
            NationalSeries::From => None,
        }
    }
}
