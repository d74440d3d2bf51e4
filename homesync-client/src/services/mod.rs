pub mod alert_service;
pub mod control_service;
pub mod light_service;

pub use alert_service::{AlertDispatcher, evaluate};
pub use control_service::ControlService;
pub use light_service::{DARKNESS_THRESHOLD_LUX, classify};
