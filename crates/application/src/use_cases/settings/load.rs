use idle_reaper_domain::{DomainError, ReaperConfig, SettingsPatch, StoredSettings};
use std::sync::Arc;
use tracing::{debug, info};

use crate::ports::SettingsStore;

pub struct LoadSettingsUseCase {
    store: Arc<dyn SettingsStore>,
}

impl LoadSettingsUseCase {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Reads the store; absent keys fall back to defaults.
    pub async fn execute(&self) -> Result<ReaperConfig, DomainError> {
        let stored = self.store.load().await?;
        let config = ReaperConfig::from_stored(stored);
        debug!(
            inactive_time = config.inactive_time_minutes,
            whitelist = config.whitelist.len(),
            "Settings loaded"
        );
        Ok(config)
    }

    /// Writes `seed` when the store holds no settings at all.
    ///
    /// Returns whether the store was seeded.
    pub async fn seed_if_empty(&self, seed: &StoredSettings) -> Result<bool, DomainError> {
        let stored = self.store.load().await?;
        if stored != StoredSettings::default() {
            return Ok(false);
        }

        let patch = SettingsPatch {
            inactive_time: seed.inactive_time,
            whitelist: seed.whitelist.clone(),
        };
        if patch.is_empty() {
            return Ok(false);
        }

        patch.validate()?;
        self.store.save(&patch).await?;
        info!("Settings store seeded from configuration file");
        Ok(true)
    }
}
