use idle_reaper_domain::{DomainError, TabId};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::ports::{TabDiscarder, TabInspector};
use crate::services::SettingsHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TabGone,
    Foreground,
    AlreadyDiscarded,
    Exempt,
}

impl SkipReason {
    pub fn to_str(&self) -> &'static str {
        match self {
            SkipReason::TabGone => "tab_gone",
            SkipReason::Foreground => "foreground",
            SkipReason::AlreadyDiscarded => "already_discarded",
            SkipReason::Exempt => "exempt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvictionOutcome {
    Discarded,
    Skipped(SkipReason),
    /// The discard call itself failed; not retried.
    Failed(String),
}

/// Decides, when a tab's idle timer fires, whether to discard it.
///
/// Eligibility is re-read from the browser and the live settings at fire
/// time; nothing observed when the timer was armed is trusted.
pub struct HandleAlarmUseCase {
    inspector: Arc<dyn TabInspector>,
    discarder: Arc<dyn TabDiscarder>,
    settings: Arc<SettingsHandle>,
}

impl HandleAlarmUseCase {
    pub fn new(
        inspector: Arc<dyn TabInspector>,
        discarder: Arc<dyn TabDiscarder>,
        settings: Arc<SettingsHandle>,
    ) -> Self {
        Self {
            inspector,
            discarder,
            settings,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, tab_id: TabId) -> Result<EvictionOutcome, DomainError> {
        let Some(tab) = self.inspector.get(tab_id).await? else {
            debug!(tab_id = %tab_id, "Idle timer fired for a closed tab");
            return Ok(EvictionOutcome::Skipped(SkipReason::TabGone));
        };

        if tab.active {
            debug!(tab_id = %tab_id, "Idle timer fired for the foreground tab");
            return Ok(EvictionOutcome::Skipped(SkipReason::Foreground));
        }

        if tab.discarded {
            return Ok(EvictionOutcome::Skipped(SkipReason::AlreadyDiscarded));
        }

        if self.settings.current().is_exempt(&tab.url) {
            debug!(tab_id = %tab_id, url = %tab.url, "Idle timer fired for a whitelisted tab");
            return Ok(EvictionOutcome::Skipped(SkipReason::Exempt));
        }

        match self.discarder.discard(tab_id).await {
            Ok(()) => {
                info!(tab_id = %tab_id, url = %tab.url, "Discarded idle tab");
                Ok(EvictionOutcome::Discarded)
            }
            Err(e) => {
                warn!(tab_id = %tab_id, error = %e, "Failed to discard idle tab");
                Ok(EvictionOutcome::Failed(e.to_string()))
            }
        }
    }
}
