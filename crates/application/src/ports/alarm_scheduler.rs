use async_trait::async_trait;
use idle_reaper_domain::{Alarm, AlarmName, DomainError};

/// Named one-shot wakeups.
///
/// The scheduler is the single source of truth for which alarms are
/// pending. Fired alarms are delivered as `ReaperEvent::AlarmFired`.
#[async_trait]
pub trait AlarmScheduler: Send + Sync {
    /// Schedule `name` to fire after `delay_minutes`, replacing any pending
    /// alarm with the same name.
    async fn create(&self, name: &AlarmName, delay_minutes: u32) -> Result<(), DomainError>;

    /// Cancel `name`. Returns whether an alarm was pending.
    async fn clear(&self, name: &AlarmName) -> Result<bool, DomainError>;

    async fn get(&self, name: &AlarmName) -> Result<Option<Alarm>, DomainError>;

    async fn get_all(&self) -> Result<Vec<Alarm>, DomainError>;
}
