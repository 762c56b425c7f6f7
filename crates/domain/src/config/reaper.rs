use serde::{Deserialize, Serialize};

use crate::settings::DEFAULT_INACTIVE_TIME_MINUTES;

/// Initial reaper settings.
///
/// Only used to seed the settings store when it holds nothing yet; once
/// settings have been saved the store is authoritative.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReaperSection {
    #[serde(default = "default_inactive_time")]
    pub inactive_time: u32,

    #[serde(default)]
    pub whitelist: Vec<String>,

    #[serde(default = "default_settings_path")]
    pub settings_path: String,
}

impl Default for ReaperSection {
    fn default() -> Self {
        Self {
            inactive_time: default_inactive_time(),
            whitelist: vec![],
            settings_path: default_settings_path(),
        }
    }
}

fn default_inactive_time() -> u32 {
    DEFAULT_INACTIVE_TIME_MINUTES
}

fn default_settings_path() -> String {
    "idle-reaper-settings.toml".to_string()
}
