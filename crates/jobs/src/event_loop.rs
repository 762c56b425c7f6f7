use idle_reaper_application::services::EventDispatcher;
use idle_reaper_domain::ReaperEvent;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Drains the event queue into the dispatcher, one event at a time.
///
/// Browser notifications, fired alarms and settings changes all arrive on the
/// same queue, so handlers never overlap.
pub struct EventLoopJob {
    dispatcher: Arc<EventDispatcher>,
    events: Mutex<Option<UnboundedReceiver<ReaperEvent>>>,
    shutdown: CancellationToken,
}

impl EventLoopJob {
    pub fn new(dispatcher: Arc<EventDispatcher>, events: UnboundedReceiver<ReaperEvent>) -> Self {
        Self {
            dispatcher,
            events: Mutex::new(Some(events)),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        let Some(mut events) = self.events.lock().await.take() else {
            warn!("EventLoopJob: already started");
            return;
        };

        info!("Starting event loop");

        let job = Arc::clone(&self);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = job.shutdown.cancelled() => {
                        info!("EventLoopJob: shutting down");
                        break;
                    }
                    next = events.recv() => {
                        let Some(event) = next else {
                            info!("EventLoopJob: event queue closed");
                            break;
                        };
                        if let Some(outcome) = job.dispatcher.dispatch_logged(event).await {
                            debug!(?outcome, "Event handled");
                        }
                    }
                }
            }
        });
    }
}
