use idle_reaper_domain::{DomainError, TabId};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::ports::{TabDiscarder, TabInspector};
use crate::services::TimerScheduler;

/// Discards a tab on request, regardless of whitelist or focus.
pub struct DiscardTabUseCase {
    inspector: Arc<dyn TabInspector>,
    discarder: Arc<dyn TabDiscarder>,
    timers: Arc<TimerScheduler>,
}

impl DiscardTabUseCase {
    pub fn new(
        inspector: Arc<dyn TabInspector>,
        discarder: Arc<dyn TabDiscarder>,
        timers: Arc<TimerScheduler>,
    ) -> Self {
        Self {
            inspector,
            discarder,
            timers,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, tab_id: TabId) -> Result<(), DomainError> {
        let tab = self
            .inspector
            .get(tab_id)
            .await?
            .ok_or(DomainError::TabNotFound(tab_id))?;

        if tab.discarded {
            return Err(DomainError::AlreadyDiscarded(tab_id));
        }

        self.discarder.discard(tab_id).await?;
        info!(tab_id = %tab_id, url = %tab.url, "Tab discarded on request");

        if let Err(e) = self.timers.disarm(tab_id).await {
            warn!(tab_id = %tab_id, error = %e, "Failed to clear idle timer of discarded tab");
        }

        Ok(())
    }
}
