use idle_reaper_domain::{DomainError, ReaperEvent};
use tokio::sync::mpsc::UnboundedSender;

/// Fire-and-forget delivery of reaper events onto the event queue.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: ReaperEvent) -> Result<(), DomainError>;
}

impl EventPublisher for UnboundedSender<ReaperEvent> {
    fn publish(&self, event: ReaperEvent) -> Result<(), DomainError> {
        self.send(event).map_err(|_| DomainError::EventChannelClosed)
    }
}
