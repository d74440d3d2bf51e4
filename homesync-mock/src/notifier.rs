use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use homesync_client::errors::NotifyError;
use homesync_client::notify::NotificationSink;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posted {
    pub title: String,
    pub body: String,
    pub posted_at: OffsetDateTime,
    /// Times this id was posted, replacements included
    pub count: u32,
}

/// Notification tray that writes alerts to the log. Posting an id that is
/// already shown replaces it.
pub struct TracingNotifier {
    granted: bool,
    tray: Mutex<BTreeMap<i32, Posted>>,
}

impl TracingNotifier {
    pub fn new(granted: bool) -> Self {
        Self {
            granted,
            tray: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn tray(&self) -> BTreeMap<i32, Posted> {
        self.tray.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl NotificationSink for TracingNotifier {
    async fn request_permission(&self) -> bool {
        tracing::debug!("notification permission granted: {}", self.granted);
        self.granted
    }

    fn permission_granted(&self) -> bool {
        self.granted
    }

    fn notify(&self, id: i32, title: &str, body: &str) -> Result<(), NotifyError> {
        if !self.granted {
            return Err(NotifyError::PermissionDenied);
        }

        tracing::info!("[#{}] {}: {}", id, title, body);

        let mut tray = self.tray.lock().unwrap_or_else(PoisonError::into_inner);
        let count = tray.get(&id).map_or(0, |posted| posted.count) + 1;
        tray.insert(id, Posted {
            title: title.to_string(),
            body: body.to_string(),
            posted_at: OffsetDateTime::now_utc(),
            count,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_id_replaces() {
        let notifier = TracingNotifier::new(true);

        notifier.notify(1, "Temperature alert", "first").unwrap();
        notifier.notify(1, "Temperature alert", "second").unwrap();
        notifier.notify(2, "Humidity alert", "third").unwrap();

        let tray = notifier.tray();
        assert_eq!(tray.len(), 2);
        assert_eq!(tray[&1].body, "second");
        assert_eq!(tray[&1].count, 2);
        assert_eq!(tray[&2].count, 1);
    }

    #[test]
    fn test_denied_permission() {
        let notifier = TracingNotifier::new(false);

        assert_eq!(notifier.notify(1, "t", "b"), Err(NotifyError::PermissionDenied));
        assert!(notifier.tray().is_empty());
    }
}
