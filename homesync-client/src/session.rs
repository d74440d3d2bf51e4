use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::auth::AuthProvider;
use crate::errors::AuthError;
use crate::notify::NotificationSink;
use crate::screens::{DashboardScreen, LoginScreen, Notice, Outcome, Route, SettingsScreen};
use crate::store::TreeStore;

/// Process-wide handles shared by every screen.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TreeStore>,
    auth: Arc<dyn AuthProvider>,
    sink: Arc<dyn NotificationSink>,
    permission_requested: Arc<AtomicBool>,
}

impl Session {
    pub fn new(
        store: Arc<dyn TreeStore>,
        auth: Arc<dyn AuthProvider>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            auth,
            sink,
            permission_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Asks for notification permission on the first call only, then
    /// routes to the dashboard when a user is already signed in.
    pub async fn start(&self) -> Outcome {
        let mut outcome = match self.auth.current_user_id() {
            Some(uid) => {
                tracing::info!("resuming session for {}", uid);
                Outcome::navigate(Route::Dashboard)
            }
            None => Outcome::navigate(Route::Login),
        };

        if !self.permission_requested.swap(true, Ordering::SeqCst)
            && !self.sink.request_permission().await
        {
            tracing::warn!("notification permission denied");
            outcome = outcome.with_notice(Notice::new(
                "Notification permission is required to receive alerts.",
            ));
        }

        outcome
    }

    pub fn store(&self) -> &Arc<dyn TreeStore> {
        &self.store
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.auth.current_user_id()
    }

    pub fn login(&self) -> LoginScreen {
        LoginScreen::new(&self.auth)
    }

    pub fn dashboard(&self) -> Result<DashboardScreen, AuthError> {
        let uid = self.auth.current_user_id().ok_or(AuthError::NotSignedIn)?;

        Ok(DashboardScreen::new(&uid, &self.store, &self.auth, &self.sink))
    }

    pub fn settings(&self) -> Result<SettingsScreen, AuthError> {
        let uid = self.auth.current_user_id().ok_or(AuthError::NotSignedIn)?;

        Ok(SettingsScreen::new(&uid, &self.store))
    }
}
