use std::error::Error;
use std::path::PathBuf;
use std::{env, fs, io};

use homesync_api::models::ThresholdConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulator {
    pub interval_ms: u64,
    pub ticks: u32,
    pub ticks_per_day: u32,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notifications {
    pub granted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub account: Account,
    pub simulator: Simulator,
    pub notifications: Notifications,
    pub thresholds: ThresholdConfig,
}

impl Settings {
    /// Loads the file named by `HOMESYNC_CONFIG`, or the bundled defaults.
    pub fn new() -> Result<Self, Box<dyn Error>> {
        match env::var("HOMESYNC_CONFIG") {
            Ok(path) => {
                let path = Self::normalize_path(&path)?;
                tracing::debug!("load settings from {}", path.display());

                Ok(Self::from_str(&fs::read_to_string(path)?)?)
            }
            Err(_) => Ok(Self::from_str(include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../",
                "configs/default.toml"
            )))?),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(document: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(document)
    }

    fn normalize_path(path: &str) -> io::Result<PathBuf> {
        let path_buf = PathBuf::from(path);

        Ok(if path_buf.is_absolute() {
            path_buf
        } else {
            env::current_dir()?.join(path_buf)
        })
    }
}
