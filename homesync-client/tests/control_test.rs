use std::sync::Arc;
use std::time::Duration;

use homesync_api::models::Control;
use homesync_client::services::ControlService;
use homesync_client::store::{MemoryTreeStore, TreeStore};
use serde_json::json;

#[tokio::test(start_paused = true)]
async fn test_sequential_toggles_alternate() {
    let store = MemoryTreeStore::new().with_latency(Duration::from_millis(50));
    let service = ControlService::new(&(Arc::new(store.clone()) as Arc<dyn TreeStore>));

    assert_eq!(service.toggle(Control::Alarm).await, Ok(true));
    assert_eq!(service.toggle(Control::Alarm).await, Ok(false));
    assert_eq!(store.read_once("controls/alarm").await, Ok(json!(false)));
}

// Both toggles read before either writes, so the second write repeats the
// first instead of undoing it. This is the known lost-update window of
// read-then-write toggling, not a failure.
#[tokio::test(start_paused = true)]
async fn test_overlapping_toggles_may_lose_an_update() {
    let store = MemoryTreeStore::new().with_latency(Duration::from_millis(50));
    let service = ControlService::new(&(Arc::new(store.clone()) as Arc<dyn TreeStore>));

    let (first, second) = tokio::join!(service.toggle(Control::Alarm), service.toggle(Control::Alarm));

    assert_eq!(first, Ok(true));
    assert_eq!(second, Ok(true));

    let value = store.read_once("controls/alarm").await.unwrap();
    assert_eq!(value, json!(true));
}
