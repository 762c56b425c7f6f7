use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use idle_reaper_application::ports::AlarmScheduler;
use idle_reaper_domain::{Alarm, AlarmName, DomainError, ReaperEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

const SECS_PER_MINUTE: u64 = 60;

struct PendingAlarm {
    alarm: Alarm,
    generation: u64,
    task: JoinHandle<()>,
}

/// Alarm primitive backed by tokio timers.
///
/// Each pending alarm owns one sleeping task. When it wakes it removes its
/// own entry, but only if that entry has not been replaced in the meantime,
/// and pushes `ReaperEvent::AlarmFired` onto the event queue.
pub struct TokioAlarmScheduler {
    pending: Arc<DashMap<AlarmName, PendingAlarm>>,
    events: UnboundedSender<ReaperEvent>,
    generation: AtomicU64,
}

impl TokioAlarmScheduler {
    pub fn new(events: UnboundedSender<ReaperEvent>) -> Self {
        Self {
            pending: Arc::new(DashMap::new()),
            events,
            generation: AtomicU64::new(0),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn spawn_timer(&self, name: AlarmName, delay: Duration, generation: u64) -> JoinHandle<()> {
        let pending = Arc::clone(&self.pending);
        let events = self.events.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let fired = pending
                .remove_if(&name, |_, entry| entry.generation == generation)
                .is_some();
            if !fired {
                return;
            }

            debug!(alarm = %name, "Alarm fired");
            if events.send(ReaperEvent::AlarmFired(name)).is_err() {
                debug!("Event queue closed; dropping fired alarm");
            }
        })
    }
}

fn scheduled_time(delay: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(delay)
        .ok()
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[async_trait]
impl AlarmScheduler for TokioAlarmScheduler {
    async fn create(&self, name: &AlarmName, delay_minutes: u32) -> Result<(), DomainError> {
        let delay = Duration::from_secs(u64::from(delay_minutes) * SECS_PER_MINUTE);
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let alarm = Alarm::new(name.clone(), delay_minutes, scheduled_time(delay));

        // The entry guard is held while the timer task is spawned so the task
        // cannot observe the map before its own entry is in place.
        match self.pending.entry(name.clone()) {
            Entry::Occupied(mut occupied) => {
                let task = self.spawn_timer(name.clone(), delay, generation);
                let replaced = occupied.insert(PendingAlarm {
                    alarm,
                    generation,
                    task,
                });
                replaced.task.abort();
            }
            Entry::Vacant(vacant) => {
                let task = self.spawn_timer(name.clone(), delay, generation);
                vacant.insert(PendingAlarm {
                    alarm,
                    generation,
                    task,
                });
            }
        }

        Ok(())
    }

    async fn clear(&self, name: &AlarmName) -> Result<bool, DomainError> {
        match self.pending.remove(name) {
            Some((_, entry)) => {
                entry.task.abort();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get(&self, name: &AlarmName) -> Result<Option<Alarm>, DomainError> {
        Ok(self.pending.get(name).map(|entry| entry.alarm.clone()))
    }

    async fn get_all(&self) -> Result<Vec<Alarm>, DomainError> {
        Ok(self
            .pending
            .iter()
            .map(|entry| entry.value().alarm.clone())
            .collect())
    }
}

impl Drop for TokioAlarmScheduler {
    fn drop(&mut self) {
        for entry in self.pending.iter() {
            entry.value().task.abort();
        }
    }
}
