use std::sync::Arc;

use homesync_api::models::{Alert, AlertKind, Metric, SensorReading, ThresholdConfig};

use crate::notify::NotificationSink;

/// Compares temperature and humidity against their configured bounds.
///
/// Light is not checked. Nothing is remembered between calls, so a reading
/// that stays out of range raises the same alert on every update.
pub fn evaluate(reading: &SensorReading, config: &ThresholdConfig) -> Vec<Alert> {
    [
        check(Metric::Temperature, reading.temperature, config.temp_min, config.temp_max),
        check(Metric::Humidity, reading.humidity, config.humidity_min, config.humidity_max),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn check(metric: Metric, value: f64, min: f64, max: f64) -> Option<Alert> {
    if value > max {
        Some(Alert { metric, kind: AlertKind::High, value, bound: max })
    } else if value < min {
        Some(Alert { metric, kind: AlertKind::Low, value, bound: min })
    } else {
        None
    }
}

#[derive(Clone)]
pub struct AlertDispatcher {
    sink: Arc<dyn NotificationSink>,
}

impl AlertDispatcher {
    pub fn new(sink: &Arc<dyn NotificationSink>) -> Self {
        Self { sink: Arc::clone(sink) }
    }

    /// Posts every alert and returns how many reached the sink.
    pub fn dispatch(&self, alerts: &[Alert]) -> usize {
        if alerts.is_empty() {
            return 0;
        }

        if !self.sink.permission_granted() {
            tracing::debug!("notification permission missing, dropping {} alert(s)", alerts.len());
            return 0;
        }

        alerts
            .iter()
            .filter(|alert| {
                let id = alert.metric.notification_id();
                match self.sink.notify(id, alert.metric.title(), &alert.body()) {
                    Ok(()) => {
                        tracing::debug!("alert {:?} {:?} posted as #{}", alert.metric, alert.kind, id);
                        true
                    }
                    Err(e) => {
                        tracing::warn!("failed to post alert #{}: {}", id, e);
                        false
                    }
                }
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::errors::NotifyError;

    fn config() -> ThresholdConfig {
        ThresholdConfig {
            home_name: String::new(),
            temp_min: 18.0,
            temp_max: 35.0,
            humidity_min: 30.0,
            humidity_max: 70.0,
            light_min: 0,
            light_max: 1000,
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        granted: AtomicBool,
        broken: AtomicBool,
        posted: Mutex<Vec<(i32, String, String)>>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn request_permission(&self) -> bool {
            self.granted.load(Ordering::SeqCst)
        }

        fn permission_granted(&self) -> bool {
            self.granted.load(Ordering::SeqCst)
        }

        fn notify(&self, id: i32, title: &str, body: &str) -> Result<(), NotifyError> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(NotifyError::Unavailable("tray closed".to_string()));
            }
            self.posted.lock().unwrap().push((id, title.to_string(), body.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_high_temperature() {
        let alerts = evaluate(&SensorReading::new(36.0, 50.0, 0.0), &config());

        assert_eq!(alerts, vec![Alert {
            metric: Metric::Temperature,
            kind: AlertKind::High,
            value: 36.0,
            bound: 35.0,
        }]);
    }

    #[test]
    fn test_low_humidity() {
        let alerts = evaluate(&SensorReading::new(20.0, 25.0, 0.0), &config());

        assert_eq!(alerts, vec![Alert {
            metric: Metric::Humidity,
            kind: AlertKind::Low,
            value: 25.0,
            bound: 30.0,
        }]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        for (temperature, humidity) in [(18.0, 30.0), (35.0, 70.0), (26.5, 50.0)] {
            let alerts = evaluate(&SensorReading::new(temperature, humidity, 0.0), &config());
            assert!(alerts.is_empty(), "{temperature} / {humidity} raised {alerts:?}");
        }
    }

    #[test]
    fn test_both_metrics_alert_independently() {
        let alerts = evaluate(&SensorReading::new(10.0, 90.0, 0.0), &config());

        assert_eq!(alerts.len(), 2);
        assert_eq!((alerts[0].metric, alerts[0].kind), (Metric::Temperature, AlertKind::Low));
        assert_eq!((alerts[1].metric, alerts[1].kind), (Metric::Humidity, AlertKind::High));
    }

    #[test]
    fn test_high_checked_before_low() {
        let inverted = ThresholdConfig { temp_min: 40.0, temp_max: 30.0, ..config() };
        let alerts = evaluate(&SensorReading::new(35.0, 50.0, 0.0), &inverted);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::High);
        assert_eq!(alerts[0].bound, 30.0);
    }

    #[test]
    fn test_light_is_ignored() {
        let alerts = evaluate(&SensorReading::new(20.0, 50.0, 99_999.0), &config());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_unconfigured_thresholds_alert_on_any_positive_value() {
        let alerts = evaluate(&SensorReading::new(21.0, 45.0, 0.0), &ThresholdConfig::default());

        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|alert| alert.kind == AlertKind::High && alert.bound == 0.0));
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let reading = SensorReading::new(40.0, 10.0, 0.0);

        assert_eq!(evaluate(&reading, &config()), evaluate(&reading, &config()));
    }

    #[test]
    fn test_dispatch_uses_fixed_ids() {
        let sink = Arc::new(RecordingSink::default());
        sink.granted.store(true, Ordering::SeqCst);
        let dispatcher = AlertDispatcher::new(&(sink.clone() as Arc<dyn NotificationSink>));

        let alerts = evaluate(&SensorReading::new(36.0, 25.0, 0.0), &config());
        assert_eq!(dispatcher.dispatch(&alerts), 2);
        assert_eq!(dispatcher.dispatch(&alerts), 2);

        let posted = sink.posted.lock().unwrap();
        let ids: Vec<i32> = posted.iter().map(|(id, _, _)| *id).collect();
        assert_eq!(ids, vec![1, 2, 1, 2]);
        assert_eq!(posted[0].1, "Temperature alert");
        assert_eq!(posted[1].2, "Humidity (25.0 %) is below the minimum allowed (30.0 %).");
    }

    #[test]
    fn test_dispatch_without_permission() {
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = AlertDispatcher::new(&(sink.clone() as Arc<dyn NotificationSink>));

        let alerts = evaluate(&SensorReading::new(36.0, 50.0, 0.0), &config());
        assert_eq!(dispatcher.dispatch(&alerts), 0);
        assert!(sink.posted.lock().unwrap().is_empty());
    }

    #[test]
    fn test_dispatch_survives_sink_failure() {
        let sink = Arc::new(RecordingSink::default());
        sink.granted.store(true, Ordering::SeqCst);
        sink.broken.store(true, Ordering::SeqCst);
        let dispatcher = AlertDispatcher::new(&(sink.clone() as Arc<dyn NotificationSink>));

        let alerts = evaluate(&SensorReading::new(36.0, 25.0, 0.0), &config());
        assert_eq!(dispatcher.dispatch(&alerts), 0);

        sink.broken.store(false, Ordering::SeqCst);
        assert_eq!(dispatcher.dispatch(&alerts), 2);
    }
}
