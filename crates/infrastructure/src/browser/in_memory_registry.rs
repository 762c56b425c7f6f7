use async_trait::async_trait;
use idle_reaper_application::ports::{TabDiscarder, TabInspector};
use idle_reaper_domain::{DomainError, TabId, TabSnapshot};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Single-window tab strip kept in memory.
///
/// Mirrors the browser rules the reaper relies on: at most one tab is
/// active, the active tab cannot be discarded, and activating or navigating
/// a discarded tab reloads it.
pub struct InMemoryTabRegistry {
    tabs: RwLock<BTreeMap<TabId, TabSnapshot>>,
    next_id: AtomicU64,
}

impl InMemoryTabRegistry {
    pub fn new() -> Self {
        Self {
            tabs: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Opens a background tab.
    pub async fn open(&self, url: &str, title: Option<&str>) -> TabSnapshot {
        let id = TabId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut tab = TabSnapshot::new(id, url);
        tab.title = title.map(str::to_string);

        self.tabs.write().await.insert(id, tab.clone());
        debug!(tab_id = %id, url, "Tab opened");
        tab
    }

    /// Brings `tab_id` to the foreground; every other tab goes to the
    /// background.
    pub async fn activate(&self, tab_id: TabId) -> Result<TabSnapshot, DomainError> {
        let mut tabs = self.tabs.write().await;
        if !tabs.contains_key(&tab_id) {
            return Err(DomainError::TabNotFound(tab_id));
        }

        for tab in tabs.values_mut() {
            tab.active = false;
        }

        let tab = tabs
            .get_mut(&tab_id)
            .ok_or(DomainError::TabNotFound(tab_id))?;
        tab.active = true;
        tab.discarded = false;
        Ok(tab.clone())
    }

    pub async fn navigate(
        &self,
        tab_id: TabId,
        url: &str,
        title: Option<&str>,
    ) -> Result<TabSnapshot, DomainError> {
        let mut tabs = self.tabs.write().await;
        let tab = tabs
            .get_mut(&tab_id)
            .ok_or(DomainError::TabNotFound(tab_id))?;

        tab.url = url.to_string();
        tab.title = title.map(str::to_string);
        tab.discarded = false;
        Ok(tab.clone())
    }

    pub async fn close(&self, tab_id: TabId) -> Result<TabSnapshot, DomainError> {
        self.tabs
            .write()
            .await
            .remove(&tab_id)
            .ok_or(DomainError::TabNotFound(tab_id))
    }

    pub async fn len(&self) -> usize {
        self.tabs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tabs.read().await.is_empty()
    }
}

impl Default for InMemoryTabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TabInspector for InMemoryTabRegistry {
    async fn get(&self, tab_id: TabId) -> Result<Option<TabSnapshot>, DomainError> {
        Ok(self.tabs.read().await.get(&tab_id).cloned())
    }

    async fn list(&self) -> Result<Vec<TabSnapshot>, DomainError> {
        Ok(self.tabs.read().await.values().cloned().collect())
    }
}

#[async_trait]
impl TabDiscarder for InMemoryTabRegistry {
    async fn discard(&self, tab_id: TabId) -> Result<(), DomainError> {
        let mut tabs = self.tabs.write().await;
        let tab = tabs
            .get_mut(&tab_id)
            .ok_or(DomainError::TabNotFound(tab_id))?;

        if tab.active {
            return Err(DomainError::DiscardFailed {
                tab_id,
                reason: "the active tab cannot be discarded".to_string(),
            });
        }

        tab.discarded = true;
        Ok(())
    }
}
