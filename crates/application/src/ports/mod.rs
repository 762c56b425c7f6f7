mod alarm_scheduler;
mod event_publisher;
mod settings_store;
mod tab_discarder;
mod tab_inspector;

pub use alarm_scheduler::AlarmScheduler;
pub use event_publisher::EventPublisher;
pub use settings_store::SettingsStore;
pub use tab_discarder::TabDiscarder;
pub use tab_inspector::TabInspector;
