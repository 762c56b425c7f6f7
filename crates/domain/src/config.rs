pub mod errors;
pub mod jobs;
pub mod logging;
pub mod reaper;
pub mod root;

pub use errors::ConfigError;
pub use jobs::JobsConfig;
pub use logging::LoggingConfig;
pub use reaper::ReaperSection;
pub use root::{CliOverrides, Config};
