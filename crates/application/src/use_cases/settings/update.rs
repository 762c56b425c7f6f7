use idle_reaper_domain::settings::normalize_whitelist_entry;
use idle_reaper_domain::{DomainError, ReaperEvent, SettingsPatch};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::ports::{EventPublisher, SettingsStore};

/// Persists settings changes and announces them on the event queue.
pub struct UpdateSettingsUseCase {
    store: Arc<dyn SettingsStore>,
    publisher: Arc<dyn EventPublisher>,
}

impl UpdateSettingsUseCase {
    pub fn new(store: Arc<dyn SettingsStore>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { store, publisher }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, patch: SettingsPatch) -> Result<(), DomainError> {
        if patch.is_empty() {
            return Err(DomainError::InvalidSettings("Nothing to update".to_string()));
        }
        patch.validate()?;

        let patch = SettingsPatch {
            inactive_time: patch.inactive_time,
            whitelist: patch.whitelist.map(normalize_entries).transpose()?,
        };

        self.store.save(&patch).await?;
        info!(
            inactive_time = ?patch.inactive_time,
            whitelist = ?patch.whitelist.as_ref().map(Vec::len),
            "Settings saved"
        );

        if let Err(e) = self.publisher.publish(ReaperEvent::SettingsUpdated) {
            warn!(error = %e, "Settings saved but the update notification was not delivered");
        }

        Ok(())
    }

    pub async fn set_inactive_time(&self, minutes: u32) -> Result<(), DomainError> {
        self.execute(SettingsPatch::inactive_time(minutes)).await
    }

    /// Returns `false` when the domain was already whitelisted.
    pub async fn add_to_whitelist(&self, domain: &str) -> Result<bool, DomainError> {
        let domain = normalize_whitelist_entry(domain)?;
        let mut entries = self.current_whitelist().await?;
        if !entries.insert(domain) {
            return Ok(false);
        }

        self.execute(SettingsPatch::whitelist(entries.into_iter().collect()))
            .await?;
        Ok(true)
    }

    /// Returns `false` when the domain was not whitelisted.
    pub async fn remove_from_whitelist(&self, domain: &str) -> Result<bool, DomainError> {
        let domain = normalize_whitelist_entry(domain)?;
        let mut entries = self.current_whitelist().await?;
        if !entries.remove(&domain) {
            return Ok(false);
        }

        self.execute(SettingsPatch::whitelist(entries.into_iter().collect()))
            .await?;
        Ok(true)
    }

    async fn current_whitelist(&self) -> Result<BTreeSet<String>, DomainError> {
        let stored = self.store.load().await?;
        Ok(stored.whitelist.unwrap_or_default().into_iter().collect())
    }
}

fn normalize_entries(entries: Vec<String>) -> Result<Vec<String>, DomainError> {
    let normalized = entries
        .iter()
        .map(|entry| normalize_whitelist_entry(entry))
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(normalized.into_iter().collect())
}
