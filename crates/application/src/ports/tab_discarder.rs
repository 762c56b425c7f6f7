use async_trait::async_trait;
use idle_reaper_domain::{DomainError, TabId};

#[async_trait]
pub trait TabDiscarder: Send + Sync {
    /// Unload the tab's page while keeping it in the tab strip.
    async fn discard(&self, tab_id: TabId) -> Result<(), DomainError>;
}
