//! Wire types for the upstream carbon-intensity API.

pub mod national;
pub mod period;
pub mod regional;

pub use national::NationalForecastEntry;
pub use period::{IntensityIndex, IntensityReading, SettlementPeriod};
pub use regional::{GenerationShare, RegionEntry, RegionalForecastEntry};

use crate::prelude::ShapeResult;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// `{ "data": [...] }` wrapper used by every upstream response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Vec<T>,
}

fn decode<T: DeserializeOwned>(body: &str) -> ShapeResult<Vec<T>> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    Ok(envelope.data)
}

pub fn decode_national(body: &str) -> ShapeResult<Vec<NationalForecastEntry>> {
    decode(body)
}

pub fn decode_regional(body: &str) -> ShapeResult<Vec<RegionalForecastEntry>> {
    decode(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::ShapingError;

    #[test]
    fn empty_envelope_decodes_to_empty_sequence() {
        assert!(decode_national(r#"{"data": []}"#).unwrap().is_empty());
        assert!(decode_regional(r#"{"data": []}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_body_is_a_payload_error() {
        let err = decode_national("<html>502</html>").unwrap_err();
        assert!(matches!(err, ShapingError::Payload(_)));
    }
}
