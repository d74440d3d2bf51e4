use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use async_trait::async_trait;
use homesync_api::schema;
use serde_json::Value;
use tokio::sync::{mpsc, RwLock};

use super::{StoreUpdate, Subscription, SubscriptionId, TreeStore};
use crate::errors::StoreError;

struct Listener {
    path: String,
    sender: mpsc::UnboundedSender<StoreUpdate>,
}

#[derive(Default)]
struct Inner {
    tree: RwLock<Value>,
    listeners: Mutex<HashMap<SubscriptionId, Listener>>,
    denied: Mutex<HashSet<String>>,
    next_id: AtomicU64,
    disconnected: AtomicBool,
    latency: Mutex<Option<Duration>>,
}

impl Inner {
    fn listeners(&self) -> MutexGuard<'_, HashMap<SubscriptionId, Listener>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn detach(&self, id: SubscriptionId) {
        self.listeners().remove(&id);
    }
}

/// In-process tree store.
///
/// Writes are applied under an exclusive lock and fanned out to every
/// listener whose path overlaps the written one before the lock is
/// released, so listeners observe writes in the order they were applied.
#[derive(Clone, Default)]
pub struct MemoryTreeStore {
    inner: Arc<Inner>,
}

impl MemoryTreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tree(tree: Value) -> Self {
        Self {
            inner: Arc::new(Inner {
                tree: RwLock::new(tree),
                ..Default::default()
            }),
        }
    }

    /// Delays every read and write by `latency` before it touches the tree.
    pub fn with_latency(self, latency: Duration) -> Self {
        *self.inner.latency.lock().unwrap_or_else(PoisonError::into_inner) = Some(latency);
        self
    }

    /// Rejects every later operation on a path overlapping `path`.
    pub fn deny_path(&self, path: &str) {
        self.inner
            .denied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(schema::normalize(path));
    }

    pub fn allow_path(&self, path: &str) {
        self.inner
            .denied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&schema::normalize(path));
    }

    /// Cancels every listener and fails later operations until
    /// [`MemoryTreeStore::reconnect`].
    pub fn disconnect(&self) {
        self.inner.disconnected.store(true, Ordering::SeqCst);

        for (id, listener) in self.inner.listeners().drain() {
            tracing::debug!("cancel listener {} on {}", id, listener.path);
            let _ = listener.sender.send(Err(StoreError::Cancelled));
        }
    }

    pub fn reconnect(&self) {
        self.inner.disconnected.store(false, Ordering::SeqCst);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners().len()
    }

    pub async fn snapshot(&self) -> Value {
        self.inner.tree.read().await.clone()
    }

    fn check(&self, path: &str) -> Result<(), StoreError> {
        if self.inner.disconnected.load(Ordering::SeqCst) {
            return Err(StoreError::Disconnected);
        }

        let denied = self.inner.denied.lock().unwrap_or_else(PoisonError::into_inner);
        match denied.iter().find(|denied| schema::overlaps(denied, path)) {
            Some(_) => Err(StoreError::PermissionDenied(path.to_string())),
            None => Ok(()),
        }
    }

    async fn delay(&self) {
        let latency = *self.inner.latency.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl TreeStore for MemoryTreeStore {
    async fn write(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let path = schema::normalize(path);
        self.delay().await;
        self.check(&path)?;

        let mut tree = self.inner.tree.write().await;
        schema::set(&mut tree, &path, value);

        tracing::debug!("write {}", path);

        let mut listeners = self.inner.listeners();
        listeners.retain(|id, listener| {
            if !schema::overlaps(&listener.path, &path) {
                return true;
            }

            let snapshot = schema::get(&tree, &listener.path).cloned().unwrap_or(Value::Null);
            let delivered = listener.sender.send(Ok(snapshot)).is_ok();
            if !delivered {
                tracing::debug!("drop closed listener {}", id);
            }
            delivered
        });

        Ok(())
    }

    async fn read_once(&self, path: &str) -> Result<Value, StoreError> {
        let path = schema::normalize(path);
        self.delay().await;
        self.check(&path)?;

        let tree = self.inner.tree.read().await;
        Ok(schema::get(&tree, &path).cloned().unwrap_or(Value::Null))
    }

    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError> {
        let path = schema::normalize(path);
        self.check(&path)?;

        let tree = self.inner.tree.read().await;
        let (sender, receiver) = mpsc::unbounded_channel();
        let current = schema::get(&tree, &path).cloned().unwrap_or(Value::Null);
        let _ = sender.send(Ok(current));

        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        self.inner.listeners().insert(id, Listener { path: path.clone(), sender });
        drop(tree);

        tracing::debug!("attach listener {} on {}", id, path);

        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        Ok(Subscription::new(id, &path, receiver, move |id| {
            if let Some(inner) = inner.upgrade() {
                inner.detach(id);
            }
        }))
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.detach(id);
    }
}
