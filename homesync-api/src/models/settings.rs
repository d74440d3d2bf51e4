use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::number_or_zero;

/// Alert thresholds and display label for one home.
///
/// Every field falls back to its zero value when missing from the stored
/// node. A config with both bounds at zero makes any positive reading
/// out of range, which is how an unconfigured home behaves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Display label shown on the dashboard header
    pub home_name: String,
    /// Lower temperature bound in Celsius
    pub temp_min: f64,
    /// Upper temperature bound in Celsius
    pub temp_max: f64,
    /// Lower humidity bound in percent
    pub humidity_min: f64,
    /// Upper humidity bound in percent
    pub humidity_max: f64,
    /// Lower light bound in lux
    pub light_min: i64,
    /// Upper light bound in lux
    pub light_max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    Temperature,
    Humidity,
    Light,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Invalid temperature range"),
            Self::Humidity => write!(f, "Invalid humidity range"),
            Self::Light => write!(f, "Invalid light range"),
        }
    }
}

impl std::error::Error for RangeError {}

impl ThresholdConfig {
    /// Checks `min < max` for every dimension, temperature first. A NaN
    /// bound never orders, so it fails the check.
    pub fn validate(&self) -> Result<(), RangeError> {
        if !ordered(self.temp_min, self.temp_max) {
            return Err(RangeError::Temperature);
        }
        if !ordered(self.humidity_min, self.humidity_max) {
            return Err(RangeError::Humidity);
        }
        if self.light_min >= self.light_max {
            return Err(RangeError::Light);
        }

        Ok(())
    }

    /// Decodes a stored settings node field by field. Absent or unreadable
    /// fields fall back to their zero value; light bounds stored as floats
    /// are truncated.
    pub fn from_snapshot(snapshot: &Value) -> Self {
        let number = |key: &str| number_or_zero(snapshot.get(key));

        Self {
            home_name: snapshot
                .get("home_name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            temp_min: number("temp_min"),
            temp_max: number("temp_max"),
            humidity_min: number("humidity_min"),
            humidity_max: number("humidity_max"),
            light_min: number("light_min") as i64,
            light_max: number("light_max") as i64,
        }
    }
}

fn ordered(min: f64, max: f64) -> bool {
    matches!(min.partial_cmp(&max), Some(Ordering::Less))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> ThresholdConfig {
        ThresholdConfig {
            home_name: "Casa".to_string(),
            temp_min: 18.0,
            temp_max: 35.0,
            humidity_min: 30.0,
            humidity_max: 70.0,
            light_min: 100,
            light_max: 800,
        }
    }

    #[test]
    fn test_validate_accepts_ordered_ranges() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_inverted_and_equal_bounds() {
        let inverted = ThresholdConfig { temp_min: 20.0, temp_max: 15.0, ..sample() };
        assert_eq!(inverted.validate(), Err(RangeError::Temperature));

        let equal = ThresholdConfig { humidity_min: 50.0, humidity_max: 50.0, ..sample() };
        assert_eq!(equal.validate(), Err(RangeError::Humidity));

        let light = ThresholdConfig { light_min: 900, ..sample() };
        assert_eq!(light.validate(), Err(RangeError::Light));
    }

    #[test]
    fn test_validate_rejects_nan_bounds() {
        let config = ThresholdConfig { temp_min: f64::NAN, ..sample() };
        assert_eq!(config.validate(), Err(RangeError::Temperature));

        let config = ThresholdConfig { temp_max: f64::NAN, ..sample() };
        assert_eq!(config.validate(), Err(RangeError::Temperature));

        let config = ThresholdConfig { humidity_max: f64::NAN, ..sample() };
        assert_eq!(config.validate(), Err(RangeError::Humidity));
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let config = ThresholdConfig::from_snapshot(&json!({ "temp_max": 30.0 }));

        assert_eq!(config.temp_max, 30.0);
        assert_eq!(config.temp_min, 0.0);
        assert_eq!(config.humidity_max, 0.0);
        assert_eq!(config.home_name, "");
        assert_eq!(ThresholdConfig::from_snapshot(&json!(null)), ThresholdConfig::default());
    }

    #[test]
    fn test_malformed_field_keeps_the_rest() {
        let config = ThresholdConfig::from_snapshot(&json!({
            "home_name": 42,
            "temp_min": "cold",
            "temp_max": 30,
            "light_max": 800.0
        }));

        assert_eq!(config.home_name, "");
        assert_eq!(config.temp_min, 0.0);
        assert_eq!(config.temp_max, 30.0);
        assert_eq!(config.light_max, 800);
    }
}
