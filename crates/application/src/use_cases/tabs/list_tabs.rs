use idle_reaper_domain::{DomainError, TabListing};
use std::sync::Arc;

use crate::ports::TabInspector;

pub struct ListTabsUseCase {
    inspector: Arc<dyn TabInspector>,
}

impl ListTabsUseCase {
    pub fn new(inspector: Arc<dyn TabInspector>) -> Self {
        Self { inspector }
    }

    pub async fn execute(&self) -> Result<Vec<TabListing>, DomainError> {
        let tabs = self.inspector.list().await?;
        Ok(tabs.iter().map(TabListing::from_tab).collect())
    }
}
