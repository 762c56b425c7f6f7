pub mod event_loop;
pub mod runner;
pub mod stats_report;

pub use event_loop::EventLoopJob;
pub use runner::JobRunner;
pub use stats_report::StatsReportJob;
