use idle_reaper_application::use_cases::GetMemoryStatsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_INTERVAL_SECS: u64 = 300;
const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Periodically logs how many tabs are live and the estimated memory saved.
pub struct StatsReportJob {
    stats: Arc<GetMemoryStatsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl StatsReportJob {
    pub fn new(stats: Arc<GetMemoryStatsUseCase>) -> Self {
        Self {
            stats,
            interval_secs: DEFAULT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting memory stats report job"
        );

        let job = Arc::clone(&self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(job.interval_secs));
            loop {
                tokio::select! {
                    _ = job.shutdown.cancelled() => {
                        info!("StatsReportJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match job.stats.execute().await {
                            Ok(stats) => info!(
                                total_tabs = stats.total_tabs,
                                discarded_tabs = stats.discarded_tabs,
                                live_tabs = stats.live_tabs,
                                in_use_mib = stats.estimated_bytes_in_use / BYTES_PER_MIB,
                                saved_mib = stats.estimated_bytes_saved / BYTES_PER_MIB,
                                "Memory stats"
                            ),
                            Err(e) => error!(error = %e, "Failed to collect memory stats"),
                        }
                    }
                }
            }
        });
    }
}
