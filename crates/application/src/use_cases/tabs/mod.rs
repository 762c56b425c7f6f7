pub mod discard_tab;
pub mod get_memory_stats;
pub mod handle_alarm;
pub mod list_tabs;
pub mod track_activity;

pub use discard_tab::DiscardTabUseCase;
pub use get_memory_stats::GetMemoryStatsUseCase;
pub use handle_alarm::{EvictionOutcome, HandleAlarmUseCase, SkipReason};
pub use list_tabs::ListTabsUseCase;
pub use track_activity::{ActivityOutcome, TrackTabActivityUseCase};
