use crate::time::DisplayZone;
use chrono::NaiveDate;

/// Shared configuration for each shaping stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageConfig {
    pub zone: DisplayZone,
}

impl StageConfig {
    pub fn new(zone: DisplayZone) -> Self {
        Self { zone }
    }
}

/// Common error type for the boundary operations of the core.
///
/// Shaping itself never fails: malformed timestamps, zero actuals, missing
/// fuels and unknown regions all have defined output values.
#[derive(thiserror::Error, Debug)]
pub enum ShapingError {
    #[error("malformed upstream payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("date {requested} is past the last available forecast date {latest}")]
    DateOutOfRange {
        requested: NaiveDate,
        latest: NaiveDate,
    },
}

pub type ShapeResult<T> = Result<T, ShapingError>;

/// Trait describing a pure shaping stage from raw entries to chart rows.
///
/// Implementations hold no mutable state, so shaping the same input twice
/// yields identical output.
pub trait ShapingStage {
    type Input;
    type Output;

    fn shape(&self, input: &[Self::Input]) -> Vec<Self::Output>;
}
