use arc_swap::ArcSwap;
use idle_reaper_domain::ReaperConfig;
use std::sync::Arc;

/// Process-wide reaper policy.
///
/// Readers take a snapshot with [`SettingsHandle::current`]; the reconciler
/// swaps in a whole new value, so a reader never observes a half-applied
/// update.
pub struct SettingsHandle {
    current: ArcSwap<ReaperConfig>,
}

impl SettingsHandle {
    pub fn new(config: ReaperConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
        }
    }

    pub fn current(&self) -> Arc<ReaperConfig> {
        self.current.load_full()
    }

    /// Install `config` and return the value it replaced.
    pub fn replace(&self, config: Arc<ReaperConfig>) -> Arc<ReaperConfig> {
        self.current.swap(config)
    }
}

impl Default for SettingsHandle {
    fn default() -> Self {
        Self::new(ReaperConfig::default())
    }
}
