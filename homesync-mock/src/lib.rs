use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use homesync_api::models::Control;
use homesync_api::schema::{self, MigrationReport};
use homesync_client::auth::AuthProvider;
use homesync_client::errors::{AuthError, StoreError};
use homesync_client::notify::NotificationSink;
use homesync_client::screens::{DashboardEvent, DashboardScreen, Outcome};
use homesync_client::session::Session;
use homesync_client::store::{MemoryTreeStore, TreeStore};
use serde_json::{Value, json};
use tokio::time;

use crate::auth::MemoryAuthProvider;
use crate::notifier::TracingNotifier;
use crate::settings::Settings;
use crate::simulate::Simulator;

pub mod auth;
pub mod notifier;
pub mod settings;
pub mod simulate;

/// What a finished run observed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunReport {
    /// Legacy values moved into the canonical layout
    pub migrated: usize,
    pub readings: u32,
    pub alerts: usize,
    pub failures: usize,
    /// Mode the dashboard showed last
    pub auto: bool,
}

/// Tree as older device firmware left it: Spanish sensor keys and a global
/// settings node holding the mode and camelCase thresholds.
pub fn legacy_tree() -> Value {
    json!({
        "sensores": { "temperatura": 21.0, "humedad": 55.0, "luz": 640 },
        "controls": { "fan": false, "lights": true, "alarm": false },
        "device": {
            "settings": {
                "mode": "manual",
                "homeName": "Legacy Home",
                "tempMin": 17.0,
                "tempMax": 27.0
            }
        }
    })
}

/// Rewrites the whole tree into the canonical layout for `uid`. Nothing is
/// written when the tree is already canonical.
pub async fn migrate_store(store: &dyn TreeStore, uid: &str) -> Result<MigrationReport, StoreError> {
    let mut tree = store.read_once("").await?;
    let report = schema::migrate(&mut tree, uid);

    if !report.is_empty() {
        store.write("", tree).await?;
    }
    for (from, to) in &report.moved {
        tracing::debug!("migrated {} -> {}", from, to);
    }
    for from in &report.discarded {
        tracing::debug!("discarded {}", from);
    }

    Ok(report)
}

/// Drives one scripted session against the in-memory backend seeded with
/// [`legacy_tree`]: sign up and in, migrate the tree, save thresholds,
/// watch the dashboard while the simulator publishes readings, flip the fan
/// and the mode once each, then sign out.
pub async fn run(settings: &Arc<Settings>) -> Result<RunReport, Box<dyn Error>> {
    let store: Arc<dyn TreeStore> = Arc::new(MemoryTreeStore::with_tree(legacy_tree()));
    let auth = Arc::new(MemoryAuthProvider::new());
    let notifier = Arc::new(TracingNotifier::new(settings.notifications.granted));

    let session = Session::new(
        store,
        auth as Arc<dyn AuthProvider>,
        notifier.clone() as Arc<dyn NotificationSink>,
    );

    show(session.start().await);

    let login = session.login();
    show(login.register(&settings.account.email, &settings.account.password).await);
    show(login.login(&settings.account.email, &settings.account.password).await);

    let uid = session.current_user_id().ok_or(AuthError::NotSignedIn)?;
    let migration = migrate_store(session.store().as_ref(), &uid).await?;
    tracing::info!(
        "migrated {} legacy value(s), discarded {}",
        migration.moved.len(),
        migration.discarded.len()
    );

    let mut editor = session.settings()?;
    if let Some(notice) = editor.open().await {
        tracing::warn!("{}", notice.message);
    }
    editor.set_draft(settings.thresholds.clone());
    show(editor.save().await);

    let mut dashboard = session.dashboard()?;
    dashboard.activate().await?;

    let mut simulator = Simulator::new(settings.simulator.seed, settings.simulator.ticks_per_day)?;
    let mut interval = time::interval(Duration::from_millis(settings.simulator.interval_ms.max(1)));
    let mut report = RunReport { migrated: migration.moved.len(), ..RunReport::default() };

    let ticks = settings.simulator.ticks;
    loop {
        tokio::select! {
            _ = interval.tick() => {
                if report.readings == ticks {
                    break;
                }

                let reading = simulator.next_reading();
                session.store().write(schema::SENSORS_PATH, serde_json::to_value(reading)?).await?;
                report.readings += 1;

                if report.readings == ticks / 3 {
                    show(dashboard.toggle(Control::Fan).await);
                }
                if report.readings == ticks / 2 {
                    show(dashboard.set_mode(true).await);
                }
            }
            Some(event) = dashboard.next_event() => record(&dashboard, event, &mut report),
        }
    }

    while let Ok(Some(event)) = time::timeout(Duration::from_millis(10), dashboard.next_event()).await {
        record(&dashboard, event, &mut report);
    }

    let state = dashboard.state();
    report.auto = state.mode().is_auto();
    tracing::info!(
        "{} ({}): fan={} lights={} alarm={}, {}",
        state.home_name(),
        dashboard.uid(),
        state.is_on(Control::Fan),
        state.is_on(Control::Lights),
        state.is_on(Control::Alarm),
        state.mode().label(),
    );
    tracing::debug!("notification tray: {:?}", notifier.tray());

    show(dashboard.logout().await);

    Ok(report)
}

fn record(dashboard: &DashboardScreen, event: DashboardEvent, report: &mut RunReport) {
    match event {
        DashboardEvent::Applied { section, alerts, .. } => {
            let state = dashboard.state();
            let reading = state.reading();
            tracing::debug!(
                "{:?} updated: {:.1} °C, {:.1} %, {} ({} alert(s))",
                section,
                reading.temperature,
                reading.humidity,
                state.light_level().label(),
                alerts.len(),
            );
            report.alerts += alerts.len();
        }
        DashboardEvent::Failed { notice, .. } => {
            tracing::warn!("{}", notice.message);
            report.failures += 1;
        }
    }
}

fn show(outcome: Outcome) {
    if let Some(notice) = outcome.notice {
        tracing::info!("{}", notice.message);
    }
    if let Some(route) = outcome.route {
        tracing::debug!("navigate to {:?}", route);
    }
}
