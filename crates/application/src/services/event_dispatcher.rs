use idle_reaper_domain::{DomainError, ReaperEvent, TabStatus};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::services::TimerScheduler;
use crate::use_cases::{
    ActivityOutcome, EvictionOutcome, HandleAlarmUseCase, LoadSettingsUseCase,
    ReconcileSettingsUseCase, ReconcileSummary, TrackTabActivityUseCase,
};

/// What handling one event amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Activity(ActivityOutcome),
    Eviction(EvictionOutcome),
    Reconciled(ReconcileSummary),
    TimerCleared { was_pending: bool },
    /// The event carried nothing the reaper acts on.
    Ignored,
}

/// Single entry point for every reaper event.
///
/// Callers feed events one at a time; each handler runs to completion before
/// the next event is dispatched.
pub struct EventDispatcher {
    track_activity: Arc<TrackTabActivityUseCase>,
    handle_alarm: Arc<HandleAlarmUseCase>,
    load_settings: Arc<LoadSettingsUseCase>,
    reconcile: Arc<ReconcileSettingsUseCase>,
    timers: Arc<TimerScheduler>,
}

impl EventDispatcher {
    pub fn new(
        track_activity: Arc<TrackTabActivityUseCase>,
        handle_alarm: Arc<HandleAlarmUseCase>,
        load_settings: Arc<LoadSettingsUseCase>,
        reconcile: Arc<ReconcileSettingsUseCase>,
        timers: Arc<TimerScheduler>,
    ) -> Self {
        Self {
            track_activity,
            handle_alarm,
            load_settings,
            reconcile,
            timers,
        }
    }

    /// Loads the stored settings and rebuilds every idle timer.
    pub async fn initialize(&self) -> Result<ReconcileSummary, DomainError> {
        let summary = self.reload_settings().await?;
        info!(armed = summary.armed, "Idle reaper initialized");
        Ok(summary)
    }

    pub async fn dispatch(&self, event: ReaperEvent) -> Result<DispatchOutcome, DomainError> {
        debug!(kind = event.kind(), "Dispatching event");

        match event {
            ReaperEvent::SettingsUpdated => {
                let summary = self.reload_settings().await?;
                Ok(DispatchOutcome::Reconciled(summary))
            }
            ReaperEvent::AlarmFired(name) => match self.timers.on_fire(&name) {
                Some(tab_id) => {
                    let outcome = self.handle_alarm.execute(tab_id).await?;
                    Ok(DispatchOutcome::Eviction(outcome))
                }
                None => Ok(DispatchOutcome::Ignored),
            },
            ReaperEvent::TabActivated(tab_id) => {
                let outcome = self.track_activity.execute(tab_id).await?;
                Ok(DispatchOutcome::Activity(outcome))
            }
            ReaperEvent::TabUpdated { tab_id, status } => match status {
                TabStatus::Complete => {
                    let outcome = self.track_activity.execute(tab_id).await?;
                    Ok(DispatchOutcome::Activity(outcome))
                }
                TabStatus::Loading => Ok(DispatchOutcome::Ignored),
            },
            ReaperEvent::TabRemoved(tab_id) => {
                let was_pending = self.timers.disarm(tab_id).await?;
                Ok(DispatchOutcome::TimerCleared { was_pending })
            }
        }
    }

    /// Dispatches and logs failures instead of returning them.
    pub async fn dispatch_logged(&self, event: ReaperEvent) -> Option<DispatchOutcome> {
        let kind = event.kind();
        match self.dispatch(event).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!(kind, error = %e, "Event handler failed");
                None
            }
        }
    }

    async fn reload_settings(&self) -> Result<ReconcileSummary, DomainError> {
        let config = self.load_settings.execute().await?;
        self.reconcile.execute(config).await
    }
}
