use std::sync::Arc;

use homesync_api::models::{Alert, Control};
use homesync_api::schema;
use serde_json::Value;

use crate::auth::AuthProvider;
use crate::errors::AppError;
use crate::notify::NotificationSink;
use crate::screens::{Notice, Outcome, Route};
use crate::services::{AlertDispatcher, ControlService};
use crate::state::{MirrorState, StoreEvent};
use crate::store::{StoreUpdate, Subscription, TreeStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Controls,
    Sensors,
    Mode,
    Settings,
}

impl Section {
    fn event(self, snapshot: Value) -> StoreEvent {
        match self {
            Section::Controls => StoreEvent::Controls(snapshot),
            Section::Sensors => StoreEvent::Sensors(snapshot),
            Section::Mode => StoreEvent::Mode(snapshot),
            Section::Settings => StoreEvent::Settings(snapshot),
        }
    }

    fn failure_context(self) -> &'static str {
        match self {
            Section::Controls => "Failed to read controls",
            Section::Sensors => "Failed to read sensors",
            Section::Mode => "Failed to read mode",
            Section::Settings => "Failed to load notification settings",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// A snapshot was applied to the mirror. `posted` counts the alerts
    /// that reached the notification sink.
    Applied {
        section: Section,
        alerts: Vec<Alert>,
        posted: usize,
    },
    /// A listener reported an error.
    Failed { section: Section, notice: Notice },
}

struct Listeners {
    settings: Subscription,
    controls: Subscription,
    mode: Subscription,
    sensors: Subscription,
}

pub struct DashboardScreen {
    uid: String,
    store: Arc<dyn TreeStore>,
    auth: Arc<dyn AuthProvider>,
    controls: ControlService,
    dispatcher: AlertDispatcher,
    state: MirrorState,
    listeners: Option<Listeners>,
}

impl DashboardScreen {
    pub fn new(
        uid: &str,
        store: &Arc<dyn TreeStore>,
        auth: &Arc<dyn AuthProvider>,
        sink: &Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            uid: uid.to_string(),
            store: Arc::clone(store),
            auth: Arc::clone(auth),
            controls: ControlService::new(store),
            dispatcher: AlertDispatcher::new(sink),
            state: MirrorState::new(),
            listeners: None,
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn state(&self) -> &MirrorState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.listeners.is_some()
    }

    /// Attaches the dashboard's listeners. Calling it while active is a
    /// no-op. If any attach fails, the ones already made are released.
    pub async fn activate(&mut self) -> Result<(), AppError> {
        if self.listeners.is_some() {
            return Ok(());
        }

        let settings = self.store.subscribe(&schema::user_settings_path(&self.uid)).await?;
        let controls = self.store.subscribe(schema::CONTROLS_PATH).await?;
        let mode = self.store.subscribe(schema::MODE_PATH).await?;
        let sensors = self.store.subscribe(schema::SENSORS_PATH).await?;

        self.listeners = Some(Listeners { settings, controls, mode, sensors });
        tracing::info!("dashboard active for {}", self.uid);

        Ok(())
    }

    /// Releases every listener. The mirror keeps its last values.
    pub fn deactivate(&mut self) {
        if self.listeners.take().is_some() {
            tracing::info!("dashboard inactive for {}", self.uid);
        }
    }

    /// Waits for the next push and applies it. Returns `None` when the
    /// dashboard is inactive or the store dropped every listener.
    ///
    /// Pending pushes are taken settings first and sensors last, so the
    /// first sensor snapshot after activation is checked against the
    /// stored thresholds rather than empty ones.
    pub async fn next_event(&mut self) -> Option<DashboardEvent> {
        let listeners = self.listeners.as_mut()?;

        let (section, update) = tokio::select! {
            biased;
            Some(update) = listeners.settings.next() => (Section::Settings, update),
            Some(update) = listeners.controls.next() => (Section::Controls, update),
            Some(update) = listeners.mode.next() => (Section::Mode, update),
            Some(update) = listeners.sensors.next() => (Section::Sensors, update),
            else => return None,
        };

        Some(self.handle(section, update))
    }

    fn handle(&mut self, section: Section, update: StoreUpdate) -> DashboardEvent {
        match update {
            Ok(snapshot) => {
                let alerts = self.state.apply(section.event(snapshot));
                let posted = self.dispatcher.dispatch(&alerts);

                DashboardEvent::Applied { section, alerts, posted }
            }
            Err(e) => {
                let error = AppError::from(e);
                tracing::warn!("{}: {}", section.failure_context(), error);

                DashboardEvent::Failed {
                    section,
                    notice: Notice::from_error(section.failure_context(), &error),
                }
            }
        }
    }

    /// Flips a control in the store. The mirror changes when the store
    /// pushes the new value back.
    pub async fn toggle(&self, control: Control) -> Outcome {
        match self.controls.toggle(control).await {
            Ok(_) => Outcome::stay(),
            Err(e) => Outcome::failed(&format!("Failed to toggle {control}"), &e.into()),
        }
    }

    pub async fn set_mode(&self, auto: bool) -> Outcome {
        match self.controls.set_mode(auto).await {
            Ok(_) => Outcome::stay(),
            Err(e) => Outcome::failed("Failed to change mode", &e.into()),
        }
    }

    pub fn open_settings(&self) -> Outcome {
        Outcome::navigate(Route::Settings)
    }

    pub async fn logout(&mut self) -> Outcome {
        self.deactivate();
        self.auth.sign_out().await;
        tracing::info!("user {} signed out", self.uid);

        Outcome::navigate(Route::Login)
    }
}

impl Drop for DashboardScreen {
    fn drop(&mut self) {
        self.deactivate();
    }
}
