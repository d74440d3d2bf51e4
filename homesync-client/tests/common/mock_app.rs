use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use homesync_client::auth::AuthProvider;
use homesync_client::errors::{AuthError, NotifyError};
use homesync_client::notify::NotificationSink;
use homesync_client::session::Session;
use homesync_client::store::{MemoryTreeStore, TreeStore};
use serde_json::{Value, json};

#[derive(Default)]
pub struct FakeAuth {
    pub offline: AtomicBool,
    users: Mutex<HashMap<String, (String, String)>>,
    current: Mutex<Option<String>>,
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AuthError::Network("host unreachable".to_string()));
        }

        let users = self.users.lock().unwrap();
        let (stored, uid) = users.get(email).ok_or(AuthError::UserNotFound)?;

        if stored != password {
            return Err(AuthError::InvalidCredentials);
        }

        *self.current.lock().unwrap() = Some(uid.clone());
        Ok(uid.clone())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(email) {
            return Err(AuthError::EmailExists);
        }

        let uid = format!("uid-{}", users.len() + 1);
        users.insert(email.to_string(), (password.to_string(), uid.clone()));
        Ok(uid)
    }

    async fn sign_out(&self) {
        *self.current.lock().unwrap() = None;
    }

    fn current_user_id(&self) -> Option<String> {
        self.current.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub granted: AtomicBool,
    pub requests: Mutex<usize>,
    pub posted: Mutex<Vec<(i32, String, String)>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn request_permission(&self) -> bool {
        *self.requests.lock().unwrap() += 1;
        self.granted.load(Ordering::SeqCst)
    }

    fn permission_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn notify(&self, id: i32, title: &str, body: &str) -> Result<(), NotifyError> {
        self.posted.lock().unwrap().push((id, title.to_string(), body.to_string()));
        Ok(())
    }
}

impl RecordingSink {
    pub fn ids(&self) -> Vec<i32> {
        self.posted.lock().unwrap().iter().map(|(id, _, _)| *id).collect()
    }
}

pub struct MockApp {
    pub store: MemoryTreeStore,
    pub auth: Arc<FakeAuth>,
    pub sink: Arc<RecordingSink>,
    pub session: Session,
}

impl MockApp {
    pub fn new() -> Self {
        Self::with_tree(Value::Null)
    }

    pub fn with_tree(tree: Value) -> Self {
        let store = MemoryTreeStore::with_tree(tree);
        let auth = Arc::new(FakeAuth::default());
        let sink = Arc::new(RecordingSink::default());
        sink.granted.store(true, Ordering::SeqCst);

        let session = Session::new(
            Arc::new(store.clone()) as Arc<dyn TreeStore>,
            auth.clone() as Arc<dyn AuthProvider>,
            sink.clone() as Arc<dyn NotificationSink>,
        );

        Self { store, auth, sink, session }
    }

    /// Registers and signs in `test@test.com`, returning its user id.
    pub async fn signed_in(&self) -> String {
        self.auth.sign_up("test@test.com", "password123").await.unwrap();
        self.auth.sign_in("test@test.com", "password123").await.unwrap()
    }

    pub async fn seed_thresholds(&self, uid: &str) {
        self.store
            .write(
                &format!("users/{uid}/settings"),
                json!({
                    "home_name": "Test Home",
                    "temp_min": 18.0,
                    "temp_max": 35.0,
                    "humidity_min": 30.0,
                    "humidity_max": 70.0,
                    "light_min": 100,
                    "light_max": 800
                }),
            )
            .await
            .unwrap();
    }
}
