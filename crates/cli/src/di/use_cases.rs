use super::Adapters;
use idle_reaper_application::services::{EventDispatcher, SettingsHandle, TimerScheduler};
use idle_reaper_application::use_cases::{
    DiscardTabUseCase, GetMemoryStatsUseCase, HandleAlarmUseCase, ListTabsUseCase,
    LoadSettingsUseCase, ReconcileSettingsUseCase, TrackTabActivityUseCase,
    UpdateSettingsUseCase,
};
use idle_reaper_domain::ReaperEvent;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

pub struct UseCases {
    pub settings: Arc<SettingsHandle>,
    pub load_settings: Arc<LoadSettingsUseCase>,
    pub update_settings: Arc<UpdateSettingsUseCase>,
    pub discard_tab: Arc<DiscardTabUseCase>,
    pub list_tabs: Arc<ListTabsUseCase>,
    pub memory_stats: Arc<GetMemoryStatsUseCase>,
    pub dispatcher: Arc<EventDispatcher>,
}

impl UseCases {
    pub fn new(adapters: &Adapters, events: UnboundedSender<ReaperEvent>) -> Self {
        let settings = Arc::new(SettingsHandle::default());
        let timers = Arc::new(TimerScheduler::new(adapters.alarms.clone()));

        let load_settings = Arc::new(LoadSettingsUseCase::new(adapters.settings_store.clone()));
        let track_activity = Arc::new(TrackTabActivityUseCase::new(
            adapters.browser.clone(),
            timers.clone(),
            settings.clone(),
        ));
        let handle_alarm = Arc::new(HandleAlarmUseCase::new(
            adapters.browser.clone(),
            adapters.browser.clone(),
            settings.clone(),
        ));
        let reconcile = Arc::new(ReconcileSettingsUseCase::new(
            adapters.browser.clone(),
            timers.clone(),
            settings.clone(),
        ));

        Self {
            update_settings: Arc::new(UpdateSettingsUseCase::new(
                adapters.settings_store.clone(),
                Arc::new(events),
            )),
            discard_tab: Arc::new(DiscardTabUseCase::new(
                adapters.browser.clone(),
                adapters.browser.clone(),
                timers.clone(),
            )),
            list_tabs: Arc::new(ListTabsUseCase::new(adapters.browser.clone())),
            memory_stats: Arc::new(GetMemoryStatsUseCase::new(adapters.browser.clone())),
            dispatcher: Arc::new(EventDispatcher::new(
                track_activity,
                handle_alarm,
                load_settings.clone(),
                reconcile,
                timers,
            )),
            load_settings,
            settings,
        }
    }
}
