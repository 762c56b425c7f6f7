use idle_reaper_domain::{DomainError, ReaperConfig};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::ports::TabInspector;
use crate::services::{SettingsHandle, TimerDecision, TimerScheduler};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub armed: usize,
    pub disarmed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Installs new settings and re-applies the idle policy to every tab.
pub struct ReconcileSettingsUseCase {
    inspector: Arc<dyn TabInspector>,
    timers: Arc<TimerScheduler>,
    settings: Arc<SettingsHandle>,
}

impl ReconcileSettingsUseCase {
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

    #[instrument(skip(self, new_config), fields(inactive_time = new_config.inactive_time_minutes))]
    pub async fn execute(&self, new_config: ReaperConfig) -> Result<ReconcileSummary, DomainError> {
        let config = Arc::new(new_config);
        self.settings.replace(Arc::clone(&config));

        let tabs = self.inspector.list().await?;
        let mut summary = ReconcileSummary::default();

        for tab in &tabs {
            // Leave the tab in use and already reclaimed tabs alone.
            if tab.is_inert_or_focused() {
                summary.skipped += 1;
                continue;
            }

            match self.timers.apply_idle_policy(tab, &config).await {
                Ok(TimerDecision::Armed { .. }) => summary.armed += 1,
                Ok(TimerDecision::Disarmed) => summary.disarmed += 1,
                Err(e) => {
                    warn!(tab_id = %tab.id, error = %e, "Failed to reconcile idle timer");
                    summary.failed += 1;
                }
            }
        }

        info!(
            tabs = tabs.len(),
            armed = summary.armed,
            disarmed = summary.disarmed,
            skipped = summary.skipped,
            failed = summary.failed,
            "Idle timers reconciled"
        );

        Ok(summary)
    }
}
