use std::sync::Arc;

use homesync_api::models::ThresholdConfig;
use homesync_api::schema;

use crate::errors::{AppError, StoreError, ValidationError};
use crate::screens::{Notice, Outcome, Route};
use crate::store::TreeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    HomeName,
    TempMin,
    TempMax,
    HumidityMin,
    HumidityMax,
    LightMin,
    LightMax,
}

impl SettingsField {
    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::HomeName => "Home name",
            SettingsField::TempMin => "Minimum temperature",
            SettingsField::TempMax => "Maximum temperature",
            SettingsField::HumidityMin => "Minimum humidity",
            SettingsField::HumidityMax => "Maximum humidity",
            SettingsField::LightMin => "Minimum light",
            SettingsField::LightMax => "Maximum light",
        }
    }
}

/// Threshold editor. Loads the stored config once, edits a draft in memory
/// and writes the whole draft back on save.
pub struct SettingsScreen {
    store: Arc<dyn TreeStore>,
    path: String,
    draft: ThresholdConfig,
}

impl SettingsScreen {
    pub fn new(uid: &str, store: &Arc<dyn TreeStore>) -> Self {
        Self {
            store: Arc::clone(store),
            path: schema::user_settings_path(uid),
            draft: ThresholdConfig::default(),
        }
    }

    /// Loads the stored config into the draft. On failure the draft keeps
    /// its defaults and editing can continue.
    pub async fn open(&mut self) -> Option<Notice> {
        match self.store.read_once(&self.path).await {
            Ok(snapshot) => {
                if !snapshot.is_null() {
                    self.draft = ThresholdConfig::from_snapshot(&snapshot);
                }
                None
            }
            Err(e) => {
                let error = AppError::from(e);
                tracing::warn!("failed to load settings from {}: {}", self.path, error);
                Some(Notice::from_error("Failed to load settings", &error))
            }
        }
    }

    pub fn draft(&self) -> &ThresholdConfig {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: ThresholdConfig) {
        self.draft = draft;
    }

    /// Parses `text` into the draft. The draft is untouched when the text
    /// is not a number.
    pub fn set_field(&mut self, field: SettingsField, text: &str) -> Result<(), ValidationError> {
        let text = text.trim();
        let not_numeric = || ValidationError::NotNumeric(field.label().to_string());

        let decimal = || {
            text.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(not_numeric)
        };
        let whole = || text.parse::<i64>().map_err(|_| not_numeric());

        match field {
            SettingsField::HomeName => self.draft.home_name = text.to_string(),
            SettingsField::TempMin => self.draft.temp_min = decimal()?,
            SettingsField::TempMax => self.draft.temp_max = decimal()?,
            SettingsField::HumidityMin => self.draft.humidity_min = decimal()?,
            SettingsField::HumidityMax => self.draft.humidity_max = decimal()?,
            SettingsField::LightMin => self.draft.light_min = whole()?,
            SettingsField::LightMax => self.draft.light_max = whole()?,
        }

        Ok(())
    }

    /// Validates then writes the draft. Nothing is written when validation
    /// fails.
    pub async fn try_save(&self) -> Result<(), AppError> {
        self.draft.validate().map_err(ValidationError::from)?;

        let value = serde_json::to_value(&self.draft).map_err(StoreError::from)?;
        self.store.write(&self.path, value).await?;

        tracing::info!("settings saved to {}", self.path);

        Ok(())
    }

    pub async fn save(&self) -> Outcome {
        match self.try_save().await {
            Ok(()) => Outcome::navigate(Route::Dashboard).with_notice(Notice::new("Settings saved!")),
            Err(AppError::Validation(e)) => {
                tracing::debug!("settings rejected: {}", e);
                Outcome::stay().with_notice(Notice::new(e.to_string()))
            }
            Err(e) => Outcome::failed("Failed to save settings", &e),
        }
    }

    pub fn back(&self) -> Outcome {
        Outcome::navigate(Route::Dashboard)
    }
}
