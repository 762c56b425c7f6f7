use clap::Parser;
use idle_reaper_domain::CliOverrides;
use idle_reaper_jobs::{EventLoopJob, JobRunner, StatsReportJob};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod di;
mod driver;

#[derive(Parser)]
#[command(name = "idle-reaper")]
#[command(version)]
#[command(about = "Idle Reaper - discards browser tabs that sit unused in the background")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Minutes a background tab may stay idle before it is discarded
    #[arg(short = 't', long, value_name = "MINUTES")]
    inactive_time: Option<u32>,

    /// Settings store path
    #[arg(short = 's', long, value_name = "FILE")]
    settings: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        inactive_time: cli.inactive_time,
        settings_path: cli.settings.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    if let Some(path) = cli.write_config.as_deref() {
        config.save(path)?;
        println!("configuration written to {}", path);
        return Ok(());
    }

    bootstrap::init_logging(&config);

    info!("Starting Idle Reaper v{}", env!("CARGO_PKG_VERSION"));

    let (events_tx, events_rx) = mpsc::unbounded_channel();

    // Dependency Injection - Build all dependencies
    let adapters = di::Adapters::new(&config, events_tx.clone());
    let use_cases = Arc::new(di::UseCases::new(&adapters, events_tx.clone()));

    if use_cases
        .load_settings
        .seed_if_empty(&config.initial_settings())
        .await?
    {
        info!(path = %config.reaper.settings_path, "Seeded settings store");
    }
    use_cases.dispatcher.initialize().await?;

    let shutdown = CancellationToken::new();
    let mut runner = JobRunner::new()
        .with_event_loop(EventLoopJob::new(use_cases.dispatcher.clone(), events_rx))
        .with_shutdown_token(shutdown.clone());
    if config.jobs.stats_interval_secs > 0 {
        runner = runner.with_stats_report(
            StatsReportJob::new(use_cases.memory_stats.clone())
                .with_interval(config.jobs.stats_interval_secs),
        );
    }
    runner.start().await;

    let driver = driver::Driver::new(
        adapters.browser.clone(),
        adapters.alarms.clone(),
        events_tx,
        use_cases,
    );

    println!("idle-reaper ready; type 'help' for commands");
    tokio::select! {
        result = driver.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("Received Ctrl+C"),
    }

    shutdown.cancel();
    info!("Idle Reaper shutdown complete");
    Ok(())
}
