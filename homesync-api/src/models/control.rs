use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Fan,
    Lights,
    Alarm,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Fan, Control::Lights, Control::Alarm];

    /// Child key under the `controls` node
    pub fn key(&self) -> &'static str {
        match self {
            Control::Fan => "fan",
            Control::Lights => "lights",
            Control::Alarm => "alarm",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|control| control.key() == key)
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    #[serde(default)]
    pub fan: bool,
    #[serde(default)]
    pub lights: bool,
    #[serde(default)]
    pub alarm: bool,
}

impl ControlState {
    pub fn get(&self, control: Control) -> bool {
        match control {
            Control::Fan => self.fan,
            Control::Lights => self.lights,
            Control::Alarm => self.alarm,
        }
    }

    /// Builds the state from a pushed `controls` snapshot. Absent or
    /// non-boolean children read as off.
    pub fn from_snapshot(snapshot: &Value) -> Self {
        let flag = |control: Control| {
            snapshot
                .get(control.key())
                .and_then(Value::as_bool)
                .unwrap_or(false)
        };

        Self {
            fan: flag(Control::Fan),
            lights: flag(Control::Lights),
            alarm: flag(Control::Alarm),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Devices follow automation rules
    Auto,
    /// Devices follow user toggles
    #[default]
    Manual,
}

impl Mode {
    pub fn from_auto(auto: bool) -> Self {
        if auto { Mode::Auto } else { Mode::Manual }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Mode::Auto)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Auto => "auto",
            Mode::Manual => "manual",
        }
    }

    /// Only the exact string `"auto"` selects automatic mode.
    pub fn from_snapshot(snapshot: &Value) -> Self {
        match snapshot.as_str() {
            Some("auto") => Mode::Auto,
            _ => Mode::Manual,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Auto => "Automatic mode",
            Mode::Manual => "Manual mode",
        }
    }
}
