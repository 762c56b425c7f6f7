use idle_reaper_domain::{Config, ReaperEvent};
use idle_reaper_infrastructure::{InMemoryTabRegistry, TokioAlarmScheduler, TomlSettingsStore};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

pub struct Adapters {
    pub browser: Arc<InMemoryTabRegistry>,
    pub alarms: Arc<TokioAlarmScheduler>,
    pub settings_store: Arc<TomlSettingsStore>,
}

impl Adapters {
    pub fn new(config: &Config, events: UnboundedSender<ReaperEvent>) -> Self {
        Self {
            browser: Arc::new(InMemoryTabRegistry::new()),
            alarms: Arc::new(TokioAlarmScheduler::new(events)),
            settings_store: Arc::new(TomlSettingsStore::new(&config.reaper.settings_path)),
        }
    }
}
