use async_trait::async_trait;
use idle_reaper_domain::{DomainError, TabId, TabSnapshot};

#[async_trait]
pub trait TabInspector: Send + Sync {
    /// Fresh snapshot of the tab, or `None` if it no longer exists.
    async fn get(&self, tab_id: TabId) -> Result<Option<TabSnapshot>, DomainError>;

    async fn list(&self) -> Result<Vec<TabSnapshot>, DomainError>;
}
