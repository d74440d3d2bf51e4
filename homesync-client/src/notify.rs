use async_trait::async_trait;

use crate::errors::NotifyError;

/// Host notification tray.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Asks the host for permission to post notifications.
    async fn request_permission(&self) -> bool;

    fn permission_granted(&self) -> bool;

    /// Posts a notification. A later call with the same `id` replaces it.
    fn notify(&self, id: i32, title: &str, body: &str) -> Result<(), NotifyError>;
}
