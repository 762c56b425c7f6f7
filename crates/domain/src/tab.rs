use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque browser tab handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

impl TabId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TabId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(TabId)
    }
}

impl From<u64> for TabId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Loading state reported with tab update notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Loading,
    Complete,
}

impl TabStatus {
    pub fn to_str(&self) -> &'static str {
        match self {
            TabStatus::Loading => "loading",
            TabStatus::Complete => "complete",
        }
    }
}

/// Point-in-time view of a tab as reported by the browser.
///
/// Never cached by the reaper: foreground and discarded flags change
/// asynchronously, so every decision re-reads a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSnapshot {
    pub id: TabId,
    pub url: String,
    pub title: Option<String>,
    pub active: bool,
    pub discarded: bool,
}

impl TabSnapshot {
    pub fn new(id: impl Into<TabId>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: None,
            active: false,
            discarded: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn discarded(mut self, discarded: bool) -> Self {
        self.discarded = discarded;
        self
    }

    /// Foreground or already discarded tabs are left alone by the reaper.
    pub fn is_inert_or_focused(&self) -> bool {
        self.active || self.discarded
    }
}
