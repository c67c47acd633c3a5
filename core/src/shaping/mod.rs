pub mod national;
pub mod regional;
pub mod tooltip;

pub use national::{ChartRecord, NationalSeriesBuilder};
pub use regional::{shares_from_mix, RegionalMixAggregator, RegionalMixRecord};
pub use tooltip::{national_tooltip, regional_tooltip, TooltipLine};
