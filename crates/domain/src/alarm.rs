use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::tab::TabId;

const TAB_ALARM_PREFIX: &str = "tab-";

/// Flat alarm name as understood by the alarm primitive.
///
/// Reaper alarms are named `tab-{id}`; other names may share the same
/// namespace and are ignored when they fire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlarmName(Arc<str>);

impl AlarmName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn for_tab(tab_id: TabId) -> Self {
        Self(Arc::from(format!("{}{}", TAB_ALARM_PREFIX, tab_id)))
    }

    /// Parses the tab id back out of a `tab-{id}` name.
    ///
    /// Only canonical names, exactly as `for_tab` builds them, map back to a
    /// tab; `tab-007` does not.
    pub fn tab_id(&self) -> Option<TabId> {
        let digits = self.0.strip_prefix(TAB_ALARM_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let tab_id: TabId = digits.parse().ok()?;
        (Self::for_tab(tab_id) == *self).then_some(tab_id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlarmName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AlarmName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A pending one-shot alarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    pub name: AlarmName,
    pub delay_minutes: u32,
    pub scheduled_time: DateTime<Utc>,
}

impl Alarm {
    pub fn new(name: AlarmName, delay_minutes: u32, scheduled_time: DateTime<Utc>) -> Self {
        Self {
            name,
            delay_minutes,
            scheduled_time,
        }
    }
}
