//! Idle Reaper Domain Layer
pub mod alarm;
pub mod config;
pub mod errors;
pub mod events;
pub mod exemption;
pub mod settings;
pub mod stats;
pub mod tab;

pub use alarm::{Alarm, AlarmName};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use events::ReaperEvent;
pub use exemption::{domain_of, is_exempt, Domain};
pub use settings::{ReaperConfig, SettingsPatch, StoredSettings, DEFAULT_INACTIVE_TIME_MINUTES};
pub use stats::{MemoryStats, TabListing, ESTIMATED_BYTES_PER_TAB};
pub use tab::{TabId, TabSnapshot, TabStatus};
