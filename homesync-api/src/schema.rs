//! Store layout and tree helpers.
//!
//! Canonical layout:
//!
//! ```text
//! users/{uid}/settings   ThresholdConfig, snake_case keys
//! sensors                { temperature, humidity, light }
//! controls               { fan, lights, alarm }
//! device/mode            "auto" | "manual"
//! ```
//!
//! Older deployments wrote sensors under `sensores` with Spanish keys, kept
//! thresholds and mode in a global `device/settings` node with camelCase
//! keys, and sometimes used camelCase under the user node too. [`migrate`]
//! rewrites such a tree into the canonical layout; nothing else reads the
//! legacy names.

use serde_json::{Map, Value};

use crate::models::Control;

pub const SENSORS_PATH: &str = "sensors";
pub const CONTROLS_PATH: &str = "controls";
pub const MODE_PATH: &str = "device/mode";

const LEGACY_SENSORS_PATH: &str = "sensores";
const LEGACY_DEVICE_SETTINGS_PATH: &str = "device/settings";

const LEGACY_SENSOR_KEYS: [(&str, &str); 3] = [
    ("temperatura", "temperature"),
    ("humedad", "humidity"),
    ("luz", "light"),
];

const LEGACY_SETTING_KEYS: [(&str, &str); 7] = [
    ("homeName", "home_name"),
    ("tempMin", "temp_min"),
    ("tempMax", "temp_max"),
    ("humidityMin", "humidity_min"),
    ("humidityMax", "humidity_max"),
    ("lightMin", "light_min"),
    ("lightMax", "light_max"),
];

pub fn user_settings_path(uid: &str) -> String {
    join("users", &join(uid, "settings"))
}

pub fn control_path(control: Control) -> String {
    join(CONTROLS_PATH, control.key())
}

/// Splits a path into its non-empty segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Normalizes duplicate and trailing slashes.
pub fn normalize(path: &str) -> String {
    segments(path).collect::<Vec<_>>().join("/")
}

pub fn join(parent: &str, child: &str) -> String {
    normalize(&format!("{parent}/{child}"))
}

/// True when one path equals, contains or is contained by the other. A
/// write to either affects what a listener on the other observes.
pub fn overlaps(left: &str, right: &str) -> bool {
    segments(left).zip(segments(right)).all(|(l, r)| l == r)
}

/// Looks up the node at `path`. The empty path is the root.
pub fn get<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    segments(path).try_fold(tree, |node, segment| node.get(segment))
}

/// Replaces the node at `path`, creating intermediate objects as needed.
/// Writing `null` removes the node.
pub fn set(tree: &mut Value, path: &str, value: Value) {
    let parts: Vec<&str> = segments(path).collect();

    let Some((last, parents)) = parts.split_last() else {
        *tree = value;
        return;
    };

    let mut node = tree;
    for segment in parents {
        if value.is_null() && node.get(*segment).is_none() {
            return;
        }
        node = ensure_object(node)
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    if value.is_null() {
        if let Value::Object(object) = node {
            object.remove(*last);
        }
    } else {
        ensure_object(node).insert(last.to_string(), value);
    }
}

/// Removes and returns the node at `path`.
pub fn take(tree: &mut Value, path: &str) -> Option<Value> {
    let node = get(tree, path)?.clone();
    set(tree, path, Value::Null);
    Some(node)
}

fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }

    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// `from -> to` entries for every value that moved
    pub moved: Vec<(String, String)>,
    /// Legacy values dropped because a canonical value already existed
    pub discarded: Vec<String>,
}

impl MigrationReport {
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty() && self.discarded.is_empty()
    }

    fn record(&mut self, from: &str, to: &str, applied: bool) {
        if applied {
            self.moved.push((from.to_string(), to.to_string()));
        } else {
            self.discarded.push(from.to_string());
        }
    }
}

/// Rewrites a legacy tree into the canonical layout for user `uid`.
///
/// Canonical values always win; a legacy value only fills a missing slot.
/// Legacy nodes are removed either way, so running this twice is a no-op.
pub fn migrate(tree: &mut Value, uid: &str) -> MigrationReport {
    let mut report = MigrationReport::default();

    if let Some(Value::Object(legacy)) = take(tree, LEGACY_SENSORS_PATH) {
        for (from, to) in LEGACY_SENSOR_KEYS {
            if let Some(value) = legacy.get(from) {
                let applied = fill(tree, &join(SENSORS_PATH, to), value.clone());
                report.record(&join(LEGACY_SENSORS_PATH, from), &join(SENSORS_PATH, to), applied);
            }
        }
    }

    let settings_path = user_settings_path(uid);

    if let Some(Value::Object(mut legacy)) = take(tree, LEGACY_DEVICE_SETTINGS_PATH) {
        if let Some(mode) = legacy.remove("mode") {
            let applied = fill(tree, MODE_PATH, mode);
            report.record(&join(LEGACY_DEVICE_SETTINGS_PATH, "mode"), MODE_PATH, applied);
        }

        for (from, to) in LEGACY_SETTING_KEYS {
            let source = legacy.get(from).or_else(|| legacy.get(to));
            if let Some(value) = source {
                let applied = fill(tree, &join(&settings_path, to), value.clone());
                report.record(&join(LEGACY_DEVICE_SETTINGS_PATH, from), &join(&settings_path, to), applied);
            }
        }
    }

    for (from, to) in LEGACY_SETTING_KEYS {
        if let Some(value) = take(tree, &join(&settings_path, from)) {
            let applied = fill(tree, &join(&settings_path, to), value);
            report.record(&join(&settings_path, from), &join(&settings_path, to), applied);
        }
    }

    report
}

fn fill(tree: &mut Value, path: &str, value: Value) -> bool {
    if get(tree, path).is_some() {
        return false;
    }

    set(tree, path, value);
    true
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(user_settings_path("u1"), "users/u1/settings");
        assert_eq!(control_path(Control::Fan), "controls/fan");
        assert_eq!(normalize("/controls//fan/"), "controls/fan");
    }

    #[test]
    fn test_overlaps() {
        assert!(overlaps("controls", "controls/fan"));
        assert!(overlaps("controls/fan", "controls"));
        assert!(overlaps("sensors", "sensors"));
        assert!(overlaps("", "sensors"));
        assert!(!overlaps("controls/fan", "controls/alarm"));
        assert!(!overlaps("sensors", "sensores"));
    }

    #[test]
    fn test_set_and_get() {
        let mut tree = Value::Null;

        set(&mut tree, "controls/fan", json!(true));
        set(&mut tree, "device/mode", json!("auto"));

        assert_eq!(get(&tree, "controls/fan"), Some(&json!(true)));
        assert_eq!(get(&tree, "controls"), Some(&json!({ "fan": true })));
        assert_eq!(get(&tree, "controls/alarm"), None);

        set(&mut tree, "controls/fan", Value::Null);
        assert_eq!(get(&tree, "controls"), Some(&json!({})));

        set(&mut tree, "missing/node", Value::Null);
        assert_eq!(get(&tree, "missing"), None);
    }

    #[test]
    fn test_removing_under_scalar_keeps_scalar() {
        let mut tree = json!({ "controls": 5 });

        set(&mut tree, "controls/fan", Value::Null);
        assert_eq!(tree, json!({ "controls": 5 }));

        set(&mut tree, "controls/fan/state", Value::Null);
        assert_eq!(tree, json!({ "controls": 5 }));
    }

    #[test]
    fn test_migrate_legacy_tree() {
        let mut tree = json!({
            "sensores": { "temperatura": 24.5, "humedad": 51.0, "luz": 300 },
            "controls": { "fan": true },
            "device": {
                "settings": {
                    "mode": "auto",
                    "homeName": "Casa",
                    "tempMin": 18.0,
                    "tempMax": 30.0
                }
            },
            "users": { "u1": { "settings": { "temp_max": 28.0, "humidityMax": 65.0 } } }
        });

        let report = migrate(&mut tree, "u1");

        assert_eq!(tree, json!({
            "sensors": { "temperature": 24.5, "humidity": 51.0, "light": 300 },
            "controls": { "fan": true },
            "device": { "mode": "auto" },
            "users": {
                "u1": {
                    "settings": {
                        "home_name": "Casa",
                        "temp_min": 18.0,
                        "temp_max": 28.0,
                        "humidity_max": 65.0
                    }
                }
            }
        }));
        assert_eq!(report.discarded, vec!["device/settings/tempMax".to_string()]);
        assert_eq!(report.moved.len(), 7);

        let again = migrate(&mut tree, "u1");
        assert!(again.is_empty());
    }
}
