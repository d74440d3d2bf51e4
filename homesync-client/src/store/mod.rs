//! Realtime tree store abstraction.
//!
//! A store is a path-addressed JSON tree. Listeners attach with
//! [`TreeStore::subscribe`] and receive the current value of their path
//! followed by a fresh snapshot after every write that touches it. The
//! returned [`Subscription`] owns the listener: dropping it detaches.

mod memory;

pub use memory::MemoryTreeStore;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::errors::StoreError;

pub type SubscriptionId = u64;

pub type StoreUpdate = Result<Value, StoreError>;

#[async_trait]
pub trait TreeStore: Send + Sync {
    /// Replaces the node at `path`. Writing `null` removes it.
    async fn write(&self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Fetches the node at `path` once, `null` when absent.
    async fn read_once(&self, path: &str) -> Result<Value, StoreError>;

    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError>;

    /// Detaches a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

type Release = Box<dyn FnOnce(SubscriptionId) + Send + Sync>;

/// Scoped handle on a store listener.
pub struct Subscription {
    id: SubscriptionId,
    path: String,
    receiver: mpsc::UnboundedReceiver<StoreUpdate>,
    release: Option<Release>,
}

impl Subscription {
    pub fn new<F>(
        id: SubscriptionId,
        path: &str,
        receiver: mpsc::UnboundedReceiver<StoreUpdate>,
        release: F,
    ) -> Self
    where
        F: FnOnce(SubscriptionId) + Send + Sync + 'static,
    {
        Self {
            id,
            path: path.to_string(),
            receiver,
            release: Some(Box::new(release)),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Waits for the next pushed snapshot. `None` once the store has
    /// dropped the listener.
    pub async fn next(&mut self) -> Option<StoreUpdate> {
        self.receiver.recv().await
    }

    /// Detaches now instead of at drop.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            tracing::debug!("detach listener {} on {}", self.id, self.path);
            release(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("path", &self.path)
            .finish()
    }
}
