use thiserror::Error;

use crate::tab::TabId;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("Tab already discarded: {0}")]
    AlreadyDiscarded(TabId),

    #[error("Failed to discard tab {tab_id}: {reason}")]
    DiscardFailed { tab_id: TabId, reason: String },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid whitelist entry: {0}")]
    InvalidWhitelistEntry(String),

    #[error("Settings storage error: {0}")]
    StorageError(String),

    #[error("Alarm error: {0}")]
    AlarmError(String),

    #[error("Event channel closed")]
    EventChannelClosed,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
