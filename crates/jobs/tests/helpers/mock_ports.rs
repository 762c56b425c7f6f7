#![allow(dead_code)]

use async_trait::async_trait;
use idle_reaper_application::ports::{SettingsStore, TabInspector};
use idle_reaper_domain::{DomainError, SettingsPatch, StoredSettings, TabId, TabSnapshot};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct MockSettingsStore {
    stored: Arc<RwLock<StoredSettings>>,
    save_count: Arc<AtomicU64>,
}

impl MockSettingsStore {
    pub fn new() -> Self {
        Self::with_settings(StoredSettings::default())
    }

    pub fn with_settings(stored: StoredSettings) -> Self {
        Self {
            stored: Arc::new(RwLock::new(stored)),
            save_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn stored(&self) -> StoredSettings {
        self.stored.read().await.clone()
    }

    pub fn save_call_count(&self) -> u64 {
        self.save_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SettingsStore for MockSettingsStore {
    async fn load(&self) -> Result<StoredSettings, DomainError> {
        Ok(self.stored.read().await.clone())
    }

    async fn save(&self, patch: &SettingsPatch) -> Result<(), DomainError> {
        self.save_count.fetch_add(1, Ordering::Relaxed);
        patch.apply_to(&mut *self.stored.write().await);
        Ok(())
    }
}

/// Fixed tab list that counts how often it is listed.
pub struct MockTabInspector {
    tabs: Vec<TabSnapshot>,
    list_count: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockTabInspector {
    pub fn with_tabs(tabs: Vec<TabSnapshot>) -> Self {
        Self {
            tabs,
            list_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub fn list_call_count(&self) -> u64 {
        self.list_count.load(Ordering::Relaxed)
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl TabInspector for MockTabInspector {
    async fn get(&self, tab_id: TabId) -> Result<Option<TabSnapshot>, DomainError> {
        Ok(self.tabs.iter().find(|t| t.id == tab_id).cloned())
    }

    async fn list(&self) -> Result<Vec<TabSnapshot>, DomainError> {
        self.list_count.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::StorageError("tab list unavailable".to_string()));
        }
        Ok(self.tabs.clone())
    }
}
