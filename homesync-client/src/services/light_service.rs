use homesync_api::models::LightLevel;

pub const DARKNESS_THRESHOLD_LUX: f64 = 500.0;

/// Readings strictly above the threshold count as low light.
pub fn classify(light: f64) -> LightLevel {
    if light > DARKNESS_THRESHOLD_LUX {
        LightLevel::Low
    } else {
        LightLevel::Sufficient
    }
}
