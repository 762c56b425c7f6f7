//! Idle Reaper Infrastructure Layer
pub mod alarms;
pub mod browser;
pub mod settings;

pub use alarms::TokioAlarmScheduler;
pub use browser::InMemoryTabRegistry;
pub use settings::TomlSettingsStore;
