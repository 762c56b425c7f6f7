use idle_reaper_domain::{Alarm, AlarmName, DomainError, ReaperConfig, TabId, TabSnapshot};
use std::sync::Arc;
use tracing::debug;

use crate::ports::AlarmScheduler;

/// What the idle policy did to a tab's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDecision {
    Armed { delay_minutes: u32 },
    /// Exempt tabs carry no idle timer.
    Disarmed,
}

/// Per-tab idle timers on top of the alarm primitive.
///
/// Keeps no bookkeeping of its own: a tab has a pending timer iff the alarm
/// scheduler holds an alarm named after it.
pub struct TimerScheduler {
    alarms: Arc<dyn AlarmScheduler>,
}

impl TimerScheduler {
    pub fn new(alarms: Arc<dyn AlarmScheduler>) -> Self {
        Self { alarms }
    }

    pub async fn arm(&self, tab_id: TabId, delay_minutes: u32) -> Result<(), DomainError> {
        let name = AlarmName::for_tab(tab_id);
        self.alarms.clear(&name).await?;
        self.alarms.create(&name, delay_minutes).await?;
        debug!(tab_id = %tab_id, delay_minutes, "Idle timer armed");
        Ok(())
    }

    /// Returns whether a timer was pending.
    pub async fn disarm(&self, tab_id: TabId) -> Result<bool, DomainError> {
        let cleared = self.alarms.clear(&AlarmName::for_tab(tab_id)).await?;
        if cleared {
            debug!(tab_id = %tab_id, "Idle timer disarmed");
        }
        Ok(cleared)
    }

    pub async fn pending(&self, tab_id: TabId) -> Result<Option<Alarm>, DomainError> {
        self.alarms.get(&AlarmName::for_tab(tab_id)).await
    }

    /// Maps a fired alarm back to its tab; foreign alarm names yield `None`.
    pub fn on_fire(&self, name: &AlarmName) -> Option<TabId> {
        let tab_id = name.tab_id();
        if tab_id.is_none() {
            debug!(alarm = %name, "Ignoring alarm outside the tab namespace");
        }
        tab_id
    }

    /// Exempt tabs lose their timer, everything else gets a fresh one.
    pub async fn apply_idle_policy(
        &self,
        tab: &TabSnapshot,
        config: &ReaperConfig,
    ) -> Result<TimerDecision, DomainError> {
        if config.is_exempt(&tab.url) {
            self.disarm(tab.id).await?;
            return Ok(TimerDecision::Disarmed);
        }

        self.arm(tab.id, config.inactive_time_minutes).await?;
        Ok(TimerDecision::Armed {
            delay_minutes: config.inactive_time_minutes,
        })
    }
}
