use serde::{Serialize, Serializer};
use std::fmt;

/// Signed percentage deviation of an actual reading from its forecast.
///
/// Computed as `(actual - forecast) / actual * 100`, so the denominator is the
/// actual reading. A zero actual gives a non-finite value, which is kept as-is
/// and rendered `Infinity`, `-Infinity` or `NaN`; callers showing it to a user
/// must check [`Deviation::is_finite`] first.
#[derive(Debug, Clone, Copy)]
pub struct Deviation(f64);

impl Deviation {
    pub fn between(actual: f64, forecast: f64) -> Self {
        Self((actual - forecast) / actual * 100.0)
    }

    /// Deviation for an upstream reading. A missing actual counts as zero.
    pub fn from_reading(actual: Option<i64>, forecast: i64) -> Self {
        Self::between(actual.unwrap_or(0) as f64, forecast as f64)
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

// Bitwise so that NaN deviations still compare equal across identical runs.
impl PartialEq for Deviation {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl fmt::Display for Deviation {
    /// One decimal place, halves rounded away from zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("NaN");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
        }
        let sign = if value < 0.0 { "-" } else { "" };
        let magnitude = (value.abs() * 10.0).round() / 10.0;
        write!(f, "{}{:.1}", sign, magnitude)
    }
}

impl Serialize for Deviation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deviation_uses_actual_as_denominator() {
        assert_eq!(Deviation::between(100.0, 80.0).to_string(), "20.0");
        assert_eq!(Deviation::between(80.0, 100.0).to_string(), "-25.0");
        assert_eq!(Deviation::from_reading(Some(100), 120).to_string(), "-20.0");
    }

    #[test]
    fn zero_actual_is_non_finite_but_not_suppressed() {
        let deviation = Deviation::between(0.0, 50.0);
        assert!(!deviation.is_finite());
        assert_eq!(deviation.to_string(), "-Infinity");
        assert_eq!(Deviation::between(0.0, 0.0).to_string(), "NaN");
        assert_eq!(Deviation::from_reading(None, 50).to_string(), "-Infinity");
    }

    #[test]
    fn exact_match_renders_unsigned_zero() {
        assert_eq!(Deviation::between(150.0, 150.0).to_string(), "0.0");
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(Deviation::between(300.0, 299.0).to_string(), "0.3");
        assert_eq!(Deviation::between(300.0, 301.0).to_string(), "-0.3");
    }

    #[test]
    fn serializes_as_rendered_string() {
        let json = serde_json::to_string(&Deviation::between(100.0, 80.0)).unwrap();
        assert_eq!(json, "\"20.0\"");
    }

    #[test]
    fn nan_deviations_compare_equal() {
        assert_eq!(Deviation::between(0.0, 0.0), Deviation::between(0.0, 0.0));
    }
}
