use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::DomainError;
use crate::exemption::{domain_of, Domain};

pub const DEFAULT_INACTIVE_TIME_MINUTES: u32 = 30;

/// Live reaper policy. Replaced wholesale on every settings update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaperConfig {
    pub inactive_time_minutes: u32,
    pub whitelist: BTreeSet<String>,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            inactive_time_minutes: DEFAULT_INACTIVE_TIME_MINUTES,
            whitelist: BTreeSet::new(),
        }
    }
}

impl ReaperConfig {
    pub fn new(inactive_time_minutes: u32, whitelist: impl IntoIterator<Item = String>) -> Self {
        Self {
            inactive_time_minutes,
            whitelist: whitelist.into_iter().collect(),
        }
    }

    /// Builds the live policy from whatever the store returned.
    ///
    /// Missing or zero thresholds fall back to the default. Whitelist entries
    /// are normalized; entries that cannot be normalized are dropped.
    pub fn from_stored(stored: StoredSettings) -> Self {
        let inactive_time_minutes = stored
            .inactive_time
            .filter(|minutes| *minutes > 0)
            .unwrap_or(DEFAULT_INACTIVE_TIME_MINUTES);

        Self {
            inactive_time_minutes,
            whitelist: stored
                .whitelist
                .unwrap_or_default()
                .iter()
                .filter_map(|entry| normalize_whitelist_entry(entry).ok())
                .collect(),
        }
    }

    pub fn is_exempt(&self, url: &str) -> bool {
        domain_of(url).is_exempt_in(&self.whitelist)
    }

    pub fn to_stored(&self) -> StoredSettings {
        StoredSettings {
            inactive_time: Some(self.inactive_time_minutes),
            whitelist: Some(self.whitelist.iter().cloned().collect()),
        }
    }
}

/// Persisted settings layout. Both keys may be absent on first run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(default, rename = "inactiveTime", alias = "inactive_time")]
    pub inactive_time: Option<u32>,

    #[serde(default)]
    pub whitelist: Option<Vec<String>>,
}

/// Partial write to the settings store; `None` leaves a key untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub inactive_time: Option<u32>,
    pub whitelist: Option<Vec<String>>,
}

impl SettingsPatch {
    pub fn inactive_time(minutes: u32) -> Self {
        Self {
            inactive_time: Some(minutes),
            whitelist: None,
        }
    }

    pub fn whitelist(entries: Vec<String>) -> Self {
        Self {
            inactive_time: None,
            whitelist: Some(entries),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inactive_time.is_none() && self.whitelist.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.inactive_time == Some(0) {
            return Err(DomainError::InvalidSettings(
                "Inactive time must be at least 1 minute".to_string(),
            ));
        }
        if let Some(entries) = &self.whitelist {
            for entry in entries {
                normalize_whitelist_entry(entry)?;
            }
        }
        Ok(())
    }

    pub fn apply_to(&self, stored: &mut StoredSettings) {
        if let Some(minutes) = self.inactive_time {
            stored.inactive_time = Some(minutes);
        }
        if let Some(entries) = &self.whitelist {
            stored.whitelist = Some(entries.clone());
        }
    }
}

/// Trims and lowercases a user-entered whitelist domain.
///
/// Entries are stored exactly as they will be compared; `invalid:url` is
/// refused because it can never match.
pub fn normalize_whitelist_entry(entry: &str) -> Result<String, DomainError> {
    let normalized = entry.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(DomainError::InvalidWhitelistEntry(
            "Whitelist entry cannot be empty".to_string(),
        ));
    }
    if normalized.len() > 253 {
        return Err(DomainError::InvalidWhitelistEntry(format!(
            "Whitelist entry cannot exceed 253 characters: {}",
            normalized
        )));
    }
    if normalized.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidWhitelistEntry(format!(
            "Whitelist entry cannot contain whitespace: {}",
            normalized
        )));
    }
    if normalized == Domain::Invalid.as_str() {
        return Err(DomainError::InvalidWhitelistEntry(format!(
            "{} can never be whitelisted",
            normalized
        )));
    }
    Ok(normalized)
}
