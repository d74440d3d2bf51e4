mod alert;
mod control;
mod sensor;
mod settings;

pub use alert::*;
pub use control::*;
pub use sensor::*;
pub use settings::*;

use serde_json::Value;

/// Reads a number from a tree node, accepting integers and floats alike.
pub(crate) fn number_or_zero(node: Option<&Value>) -> f64 {
    node.and_then(Value::as_f64).unwrap_or(0.0)
}
