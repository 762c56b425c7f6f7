pub mod settings;
pub mod tabs;

pub use settings::{
    LoadSettingsUseCase, ReconcileSettingsUseCase, ReconcileSummary, UpdateSettingsUseCase,
};
pub use tabs::{
    ActivityOutcome, DiscardTabUseCase, EvictionOutcome, GetMemoryStatsUseCase,
    HandleAlarmUseCase, ListTabsUseCase, SkipReason, TrackTabActivityUseCase,
};
