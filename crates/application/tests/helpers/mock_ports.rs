#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use idle_reaper_application::ports::{
    AlarmScheduler, EventPublisher, SettingsStore, TabDiscarder, TabInspector,
};
use idle_reaper_application::services::{EventDispatcher, SettingsHandle, TimerScheduler};
use idle_reaper_application::use_cases::{
    DiscardTabUseCase, GetMemoryStatsUseCase, HandleAlarmUseCase, ListTabsUseCase,
    LoadSettingsUseCase, ReconcileSettingsUseCase, TrackTabActivityUseCase,
    UpdateSettingsUseCase,
};
use idle_reaper_domain::{
    Alarm, AlarmName, DomainError, ReaperConfig, ReaperEvent, SettingsPatch, StoredSettings,
    TabId, TabSnapshot,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

// ── MockBrowser ──────────────────────────────────────────────────────────────

pub struct MockBrowser {
    tabs: Arc<RwLock<BTreeMap<TabId, TabSnapshot>>>,
    discard_calls: Arc<AtomicU64>,
    should_fail_discard: Arc<RwLock<bool>>,
    should_fail_list: Arc<RwLock<bool>>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self {
            tabs: Arc::new(RwLock::new(BTreeMap::new())),
            discard_calls: Arc::new(AtomicU64::new(0)),
            should_fail_discard: Arc::new(RwLock::new(false)),
            should_fail_list: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn with_tabs(tabs: Vec<TabSnapshot>) -> Self {
        let browser = Self::new();
        for tab in tabs {
            browser.insert(tab).await;
        }
        browser
    }

    pub async fn insert(&self, tab: TabSnapshot) {
        self.tabs.write().await.insert(tab.id, tab);
    }

    pub async fn remove(&self, tab_id: u64) {
        self.tabs.write().await.remove(&TabId(tab_id));
    }

    pub async fn set_active(&self, tab_id: u64, active: bool) {
        if let Some(tab) = self.tabs.write().await.get_mut(&TabId(tab_id)) {
            tab.active = active;
        }
    }

    pub async fn set_discarded(&self, tab_id: u64, discarded: bool) {
        if let Some(tab) = self.tabs.write().await.get_mut(&TabId(tab_id)) {
            tab.discarded = discarded;
        }
    }

    pub async fn set_url(&self, tab_id: u64, url: &str) {
        if let Some(tab) = self.tabs.write().await.get_mut(&TabId(tab_id)) {
            tab.url = url.to_string();
        }
    }

    pub async fn tab(&self, tab_id: u64) -> Option<TabSnapshot> {
        self.tabs.read().await.get(&TabId(tab_id)).cloned()
    }

    pub fn discard_call_count(&self) -> u64 {
        self.discard_calls.load(Ordering::Relaxed)
    }

    pub async fn set_should_fail_discard(&self, fail: bool) {
        *self.should_fail_discard.write().await = fail;
    }

    pub async fn set_should_fail_list(&self, fail: bool) {
        *self.should_fail_list.write().await = fail;
    }
}

#[async_trait]
impl TabInspector for MockBrowser {
    async fn get(&self, tab_id: TabId) -> Result<Option<TabSnapshot>, DomainError> {
        Ok(self.tabs.read().await.get(&tab_id).cloned())
    }

    async fn list(&self) -> Result<Vec<TabSnapshot>, DomainError> {
        if *self.should_fail_list.read().await {
            return Err(DomainError::StorageError("tab query failed".to_string()));
        }
        Ok(self.tabs.read().await.values().cloned().collect())
    }
}

#[async_trait]
impl TabDiscarder for MockBrowser {
    async fn discard(&self, tab_id: TabId) -> Result<(), DomainError> {
        self.discard_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail_discard.read().await {
            return Err(DomainError::DiscardFailed {
                tab_id,
                reason: "browser refused".to_string(),
            });
        }
        match self.tabs.write().await.get_mut(&tab_id) {
            Some(tab) => {
                tab.discarded = true;
                Ok(())
            }
            None => Err(DomainError::TabNotFound(tab_id)),
        }
    }
}

// ── MockAlarmScheduler ───────────────────────────────────────────────────────

pub struct MockAlarmScheduler {
    alarms: Arc<RwLock<HashMap<AlarmName, Alarm>>>,
    create_calls: Arc<AtomicU64>,
    clear_calls: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockAlarmScheduler {
    pub fn new() -> Self {
        Self {
            alarms: Arc::new(RwLock::new(HashMap::new())),
            create_calls: Arc::new(AtomicU64::new(0)),
            clear_calls: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn pending_for(&self, tab_id: u64) -> Option<Alarm> {
        self.alarms
            .read()
            .await
            .get(&AlarmName::for_tab(TabId(tab_id)))
            .cloned()
    }

    pub async fn pending_count(&self) -> usize {
        self.alarms.read().await.len()
    }

    pub async fn insert_foreign(&self, name: &str, delay_minutes: u32) {
        let name = AlarmName::new(name);
        self.alarms
            .write()
            .await
            .insert(name.clone(), Alarm::new(name, delay_minutes, Utc::now()));
    }

    pub fn create_call_count(&self) -> u64 {
        self.create_calls.load(Ordering::Relaxed)
    }

    pub fn clear_call_count(&self) -> u64 {
        self.clear_calls.load(Ordering::Relaxed)
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl AlarmScheduler for MockAlarmScheduler {
    async fn create(&self, name: &AlarmName, delay_minutes: u32) -> Result<(), DomainError> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::AlarmError("alarm create failed".to_string()));
        }
        let scheduled_time = Utc::now() + chrono::Duration::minutes(delay_minutes as i64);
        self.alarms.write().await.insert(
            name.clone(),
            Alarm::new(name.clone(), delay_minutes, scheduled_time),
        );
        Ok(())
    }

    async fn clear(&self, name: &AlarmName) -> Result<bool, DomainError> {
        self.clear_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::AlarmError("alarm clear failed".to_string()));
        }
        Ok(self.alarms.write().await.remove(name).is_some())
    }

    async fn get(&self, name: &AlarmName) -> Result<Option<Alarm>, DomainError> {
        Ok(self.alarms.read().await.get(name).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Alarm>, DomainError> {
        Ok(self.alarms.read().await.values().cloned().collect())
    }
}

// ── MockSettingsStore ────────────────────────────────────────────────────────

pub struct MockSettingsStore {
    stored: Arc<RwLock<StoredSettings>>,
    save_calls: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockSettingsStore {
    pub fn new() -> Self {
        Self::with_settings(StoredSettings::default())
    }

    pub fn with_settings(stored: StoredSettings) -> Self {
        Self {
            stored: Arc::new(RwLock::new(stored)),
            save_calls: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn replace(&self, stored: StoredSettings) {
        *self.stored.write().await = stored;
    }

    pub async fn stored(&self) -> StoredSettings {
        self.stored.read().await.clone()
    }

    pub fn save_call_count(&self) -> u64 {
        self.save_calls.load(Ordering::Relaxed)
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl SettingsStore for MockSettingsStore {
    async fn load(&self) -> Result<StoredSettings, DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::StorageError("settings read failed".to_string()));
        }
        Ok(self.stored.read().await.clone())
    }

    async fn save(&self, patch: &SettingsPatch) -> Result<(), DomainError> {
        self.save_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::StorageError("settings write failed".to_string()));
        }
        patch.apply_to(&mut *self.stored.write().await);
        Ok(())
    }
}

// ── MockEventPublisher ───────────────────────────────────────────────────────

pub struct MockEventPublisher {
    events: Mutex<Vec<ReaperEvent>>,
    should_fail: Mutex<bool>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            should_fail: Mutex::new(false),
        }
    }

    pub fn events(&self) -> Vec<ReaperEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap() = fail;
    }
}

impl EventPublisher for MockEventPublisher {
    fn publish(&self, event: ReaperEvent) -> Result<(), DomainError> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::EventChannelClosed);
        }
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

// ── Harness ──────────────────────────────────────────────────────────────────

pub struct Harness {
    pub browser: Arc<MockBrowser>,
    pub alarms: Arc<MockAlarmScheduler>,
    pub store: Arc<MockSettingsStore>,
    pub publisher: Arc<MockEventPublisher>,
    pub settings: Arc<SettingsHandle>,
    pub timers: Arc<TimerScheduler>,
    pub track_activity: Arc<TrackTabActivityUseCase>,
    pub handle_alarm: Arc<HandleAlarmUseCase>,
    pub load_settings: Arc<LoadSettingsUseCase>,
    pub reconcile: Arc<ReconcileSettingsUseCase>,
    pub update_settings: Arc<UpdateSettingsUseCase>,
    pub discard_tab: Arc<DiscardTabUseCase>,
    pub list_tabs: Arc<ListTabsUseCase>,
    pub memory_stats: Arc<GetMemoryStatsUseCase>,
    pub dispatcher: Arc<EventDispatcher>,
}

impl Harness {
    pub async fn new(tabs: Vec<TabSnapshot>, config: ReaperConfig) -> Self {
        let browser = Arc::new(MockBrowser::with_tabs(tabs).await);
        let alarms = Arc::new(MockAlarmScheduler::new());
        let store = Arc::new(MockSettingsStore::with_settings(config.to_stored()));
        let publisher = Arc::new(MockEventPublisher::new());
        let settings = Arc::new(SettingsHandle::new(config));
        let timers = Arc::new(TimerScheduler::new(alarms.clone()));

        let track_activity = Arc::new(TrackTabActivityUseCase::new(
            browser.clone(),
            timers.clone(),
            settings.clone(),
        ));
        let handle_alarm = Arc::new(HandleAlarmUseCase::new(
            browser.clone(),
            browser.clone(),
            settings.clone(),
        ));
        let load_settings = Arc::new(LoadSettingsUseCase::new(store.clone()));
        let reconcile = Arc::new(ReconcileSettingsUseCase::new(
            browser.clone(),
            timers.clone(),
            settings.clone(),
        ));
        let update_settings = Arc::new(UpdateSettingsUseCase::new(
            store.clone(),
            publisher.clone(),
        ));
        let discard_tab = Arc::new(DiscardTabUseCase::new(
            browser.clone(),
            browser.clone(),
            timers.clone(),
        ));
        let list_tabs = Arc::new(ListTabsUseCase::new(browser.clone()));
        let memory_stats = Arc::new(GetMemoryStatsUseCase::new(browser.clone()));
        let dispatcher = Arc::new(EventDispatcher::new(
            track_activity.clone(),
            handle_alarm.clone(),
            load_settings.clone(),
            reconcile.clone(),
            timers.clone(),
        ));

        Self {
            browser,
            alarms,
            store,
            publisher,
            settings,
            timers,
            track_activity,
            handle_alarm,
            load_settings,
            reconcile,
            update_settings,
            discard_tab,
            list_tabs,
            memory_stats,
            dispatcher,
        }
    }
}

pub fn config(minutes: u32, whitelist: &[&str]) -> ReaperConfig {
    ReaperConfig::new(minutes, whitelist.iter().map(|d| d.to_string()))
}

pub fn background_tab(id: u64, url: &str) -> TabSnapshot {
    TabSnapshot::new(id, url)
}
