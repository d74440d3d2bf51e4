use std::sync::Arc;

use homesync_api::models::{Control, Mode};
use homesync_api::schema;
use serde_json::Value;

use crate::errors::StoreError;
use crate::store::TreeStore;

/// Issues control and mode writes. The resulting state is only observed
/// through the store's push updates, never predicted locally.
#[derive(Clone)]
pub struct ControlService {
    store: Arc<dyn TreeStore>,
}

impl ControlService {
    pub fn new(store: &Arc<dyn TreeStore>) -> Self {
        Self { store: Arc::clone(store) }
    }

    /// Reads the control's current value and writes its negation. Returns
    /// the value written.
    ///
    /// The read and the write are two separate round trips with no
    /// transaction between them. Two toggles in flight at once on the same
    /// control can both read the same value and write the same result, so
    /// one of them is lost.
    pub async fn toggle(&self, control: Control) -> Result<bool, StoreError> {
        let path = schema::control_path(control);

        let current = self
            .store
            .read_once(&path)
            .await?
            .as_bool()
            .unwrap_or(false);

        self.store.write(&path, Value::Bool(!current)).await?;

        tracing::debug!("toggle {}: {} -> {}", control, current, !current);

        Ok(!current)
    }

    /// Writes the mode unconditionally.
    pub async fn set_mode(&self, auto: bool) -> Result<Mode, StoreError> {
        let mode = Mode::from_auto(auto);

        self.store
            .write(schema::MODE_PATH, Value::String(mode.as_str().to_string()))
            .await?;

        tracing::debug!("mode set to {}", mode.as_str());

        Ok(mode)
    }
}
