use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::number_or_zero;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Temperature reading in Celsius
    #[serde(default)]
    pub temperature: f64,
    /// Relative humidity percentage
    #[serde(default)]
    pub humidity: f64,
    /// Light intensity in lux
    #[serde(default)]
    pub light: f64,
}

impl SensorReading {
    pub fn new(temperature: f64, humidity: f64, light: f64) -> Self {
        Self { temperature, humidity, light }
    }

    /// Builds a reading from a pushed `sensors` snapshot. Absent or
    /// non-numeric fields read as zero.
    pub fn from_snapshot(snapshot: &Value) -> Self {
        Self {
            temperature: number_or_zero(snapshot.get("temperature")),
            humidity: number_or_zero(snapshot.get("humidity")),
            light: number_or_zero(snapshot.get("light")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightLevel {
    /// Reading above the darkness threshold, lights should be on
    Low,
    /// Reading at or below the darkness threshold
    Sufficient,
}

impl LightLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LightLevel::Low => "Low light, lights on",
            LightLevel::Sufficient => "Sufficient light, lights off",
        }
    }
}
