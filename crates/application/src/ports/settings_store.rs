use async_trait::async_trait;
use idle_reaper_domain::{DomainError, SettingsPatch, StoredSettings};

/// Persisted `inactiveTime` / `whitelist` settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<StoredSettings, DomainError>;
    async fn save(&self, patch: &SettingsPatch) -> Result<(), DomainError>;
}
