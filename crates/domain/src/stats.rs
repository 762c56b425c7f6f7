use serde::Serialize;

use crate::tab::{TabId, TabSnapshot};

/// Rough per-tab footprint used for estimates.
pub const ESTIMATED_BYTES_PER_TAB: u64 = 100 * 1024 * 1024;

const LABEL_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemoryStats {
    pub total_tabs: usize,
    pub discarded_tabs: usize,
    pub live_tabs: usize,
    pub estimated_bytes_in_use: u64,
    pub estimated_bytes_saved: u64,
}

impl MemoryStats {
    pub fn from_tabs(tabs: &[TabSnapshot]) -> Self {
        let total_tabs = tabs.len();
        let discarded_tabs = tabs.iter().filter(|t| t.discarded).count();
        let live_tabs = total_tabs - discarded_tabs;

        Self {
            total_tabs,
            discarded_tabs,
            live_tabs,
            estimated_bytes_in_use: live_tabs as u64 * ESTIMATED_BYTES_PER_TAB,
            estimated_bytes_saved: discarded_tabs as u64 * ESTIMATED_BYTES_PER_TAB,
        }
    }
}

/// One row of the tab picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabListing {
    pub id: TabId,
    pub label: String,
    pub title: Option<String>,
    pub discarded: bool,
}

impl TabListing {
    pub fn from_tab(tab: &TabSnapshot) -> Self {
        let title = tab.title.as_deref().unwrap_or("");
        let mut label: String = title.chars().take(LABEL_MAX_CHARS).collect();
        if title.chars().count() > LABEL_MAX_CHARS {
            label.push_str("...");
        }
        if tab.discarded {
            label.push_str(" (Discarded)");
        }

        Self {
            id: tab.id,
            label,
            title: tab.title.clone(),
            discarded: tab.discarded,
        }
    }
}
