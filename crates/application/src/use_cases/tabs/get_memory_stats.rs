use idle_reaper_domain::{DomainError, MemoryStats};
use std::sync::Arc;

use crate::ports::TabInspector;

/// Estimated memory held by live tabs versus reclaimed by discarded ones.
pub struct GetMemoryStatsUseCase {
    inspector: Arc<dyn TabInspector>,
}

impl GetMemoryStatsUseCase {
    pub fn new(inspector: Arc<dyn TabInspector>) -> Self {
        Self { inspector }
    }

    pub async fn execute(&self) -> Result<MemoryStats, DomainError> {
        let tabs = self.inspector.list().await?;
        Ok(MemoryStats::from_tabs(&tabs))
    }
}
