use idle_reaper_domain::{DomainError, TabId};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::TabInspector;
use crate::services::{SettingsHandle, TimerDecision, TimerScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityOutcome {
    Timer(TimerDecision),
    /// The tab closed before it could be inspected.
    TabGone,
}

/// Resets a tab's idle clock when it is activated or finishes loading.
pub struct TrackTabActivityUseCase {
    inspector: Arc<dyn TabInspector>,
    timers: Arc<TimerScheduler>,
    settings: Arc<SettingsHandle>,
}

impl TrackTabActivityUseCase {
    pub fn new(
        inspector: Arc<dyn TabInspector>,
        timers: Arc<TimerScheduler>,
        settings: Arc<SettingsHandle>,
    ) -> Self {
        Self {
            inspector,
            timers,
            settings,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, tab_id: TabId) -> Result<ActivityOutcome, DomainError> {
        let Some(tab) = self.inspector.get(tab_id).await? else {
            debug!(tab_id = %tab_id, "Tab vanished before activity could be tracked");
            return Ok(ActivityOutcome::TabGone);
        };

        let config = self.settings.current();
        let decision = self.timers.apply_idle_policy(&tab, &config).await?;

        Ok(ActivityOutcome::Timer(decision))
    }
}
