use crate::alarm::AlarmName;
use crate::tab::{TabId, TabStatus};

/// Every notification the reaper reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaperEvent {
    /// Settings were written to the store; re-read and reconcile.
    SettingsUpdated,
    AlarmFired(AlarmName),
    TabActivated(TabId),
    TabUpdated { tab_id: TabId, status: TabStatus },
    TabRemoved(TabId),
}

impl ReaperEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ReaperEvent::SettingsUpdated => "settingsUpdated",
            ReaperEvent::AlarmFired(_) => "alarmFired",
            ReaperEvent::TabActivated(_) => "tabActivated",
            ReaperEvent::TabUpdated { .. } => "tabUpdated",
            ReaperEvent::TabRemoved(_) => "tabRemoved",
        }
    }
}
