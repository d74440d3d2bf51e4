use homesync_api::models::{
    Alert, Control, ControlState, LightLevel, Mode, SensorReading, ThresholdConfig,
};
use serde_json::Value;

use crate::services::{classify, evaluate};

pub const DEFAULT_HOME_NAME: &str = "Smart Home Control";

/// A snapshot pushed by the store for one of the dashboard's paths.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Controls(Value),
    Sensors(Value),
    Mode(Value),
    Settings(Value),
}

/// Dashboard's cached copy of store state.
///
/// Only [`MirrorState::apply`] mutates it. Each event replaces its whole
/// section with the pushed snapshot, except that a deleted settings node
/// leaves the thresholds as they were.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MirrorState {
    controls: ControlState,
    mode: Mode,
    reading: SensorReading,
    thresholds: ThresholdConfig,
}

impl MirrorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a pushed snapshot and returns the alerts it raises. Only
    /// sensor snapshots can raise alerts.
    pub fn apply(&mut self, event: StoreEvent) -> Vec<Alert> {
        match event {
            StoreEvent::Controls(snapshot) => {
                self.controls = ControlState::from_snapshot(&snapshot);
                Vec::new()
            }
            StoreEvent::Mode(snapshot) => {
                self.mode = Mode::from_snapshot(&snapshot);
                Vec::new()
            }
            StoreEvent::Settings(snapshot) => {
                // An absent settings node keeps the last known thresholds
                if !snapshot.is_null() {
                    self.thresholds = ThresholdConfig::from_snapshot(&snapshot);
                }
                Vec::new()
            }
            StoreEvent::Sensors(snapshot) => {
                self.reading = SensorReading::from_snapshot(&snapshot);
                evaluate(&self.reading, &self.thresholds)
            }
        }
    }

    pub fn controls(&self) -> ControlState {
        self.controls
    }

    pub fn is_on(&self, control: Control) -> bool {
        self.controls.get(control)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn reading(&self) -> SensorReading {
        self.reading
    }

    pub fn light_level(&self) -> LightLevel {
        classify(self.reading.light)
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    pub fn home_name(&self) -> &str {
        match self.thresholds.home_name.as_str() {
            "" => DEFAULT_HOME_NAME,
            name => name,
        }
    }
}
