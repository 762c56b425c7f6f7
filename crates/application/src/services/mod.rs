mod event_dispatcher;
mod settings_handle;
mod timer_scheduler;

pub use event_dispatcher::{DispatchOutcome, EventDispatcher};
pub use settings_handle::SettingsHandle;
pub use timer_scheduler::{TimerDecision, TimerScheduler};
