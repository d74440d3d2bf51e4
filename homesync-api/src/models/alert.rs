use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Temperature,
    Humidity,
}

impl Metric {
    /// Notification id reused for every alert on this metric, so a new
    /// alert replaces the previous one in the host notification tray.
    pub fn notification_id(&self) -> i32 {
        match self {
            Metric::Temperature => 1,
            Metric::Humidity => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature alert",
            Metric::Humidity => "Humidity alert",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub metric: Metric,
    pub kind: AlertKind,
    /// Reading that crossed the bound
    pub value: f64,
    /// Configured bound that was crossed
    pub bound: f64,
}

impl Alert {
    pub fn body(&self) -> String {
        let unit = self.metric.unit();
        let relation = match self.kind {
            AlertKind::High => "is above the maximum allowed",
            AlertKind::Low => "is below the minimum allowed",
        };

        format!(
            "{} ({:.1} {unit}) {relation} ({:.1} {unit}).",
            self.metric.name(),
            self.value,
            self.bound,
        )
    }
}
