mod action_latch;
mod provider_status;

use crate::{PageController, PageSettings, PageView, Severity, StatusBanner};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use cl_auth::IdentitySource;
use cl_core::{
    CampaignId, CampaignRecord, FieldSet, FieldSpec, FieldValue, FormState, KeyPrefix,
    ProviderKind, UserIdentity,
};
use cl_kv::MemoryStore;
use cl_storage::{
    LocalProvider, ProviderSet, SaveAction, SaveOutcome, StorageError, StorageInfo,
    StorageProvider,
};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ViewEvent {
    Controls(bool),
    Status(StatusBanner),
    SyncInfo(String, Severity),
    SignInPrompt,
    Welcome(String),
    Confirm(String),
}

/// Page double that records everything the controller tells it.
pub(crate) struct FakeView {
    form: FormState,
    events: Mutex<Vec<ViewEvent>>,
    confirm_answer: AtomicBool,
}

impl FakeView {
    pub(crate) fn new() -> Self {
        Self {
            form: FormState::new(campaign_fields()),
            events: Mutex::new(Vec::new()),
            confirm_answer: AtomicBool::new(true),
        }
    }

    pub(crate) fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub(crate) fn events(&self) -> Vec<ViewEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn banners(&self) -> Vec<StatusBanner> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Status(banner) => Some(banner),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_banner(&self) -> Option<StatusBanner> {
        self.banners().pop()
    }

    pub(crate) fn last_sync_info(&self) -> Option<(String, Severity)> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::SyncInfo(text, severity) => Some((text, severity)),
            _ => None,
        })
    }

    pub(crate) fn controls_enabled(&self) -> Option<bool> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Controls(enabled) => Some(enabled),
            _ => None,
        })
    }

    fn record(&self, event: ViewEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl FieldSet for FakeView {
    fn specs(&self) -> Vec<FieldSpec> {
        self.form.specs()
    }

    fn value(&self, id: &str) -> Option<FieldValue> {
        self.form.value(id)
    }

    fn apply(&self, id: &str, value: FieldValue) -> bool {
        self.form.apply(id, value)
    }
}

impl PageView for FakeView {
    fn set_controls_enabled(&self, enabled: bool) {
        self.record(ViewEvent::Controls(enabled));
    }

    fn show_status(&self, banner: StatusBanner) {
        self.record(ViewEvent::Status(banner));
    }

    fn set_sync_info(&self, text: &str, severity: Severity) {
        self.record(ViewEvent::SyncInfo(text.to_string(), severity));
    }

    fn show_sign_in_prompt(&self) {
        self.record(ViewEvent::SignInPrompt);
    }

    fn show_welcome(&self, identity: &UserIdentity) {
        self.record(ViewEvent::Welcome(identity.display_name.clone()));
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.record(ViewEvent::Confirm(prompt.to_string()));
        self.confirm_answer.load(Ordering::SeqCst)
    }
}

pub(crate) struct FixedIdentity(pub Option<UserIdentity>);

impl IdentitySource for FixedIdentity {
    fn resolve(&self) -> Option<UserIdentity> {
        self.0.clone()
    }
}

/// Scriptable stand-in for remote file hosting.
#[derive(Default)]
pub(crate) struct FakeRemote {
    pub record: Mutex<Option<CampaignRecord>>,
    pub init_fails: AtomicBool,
    pub load_fails: AtomicBool,
    pub save_fails: AtomicBool,
    pub init_gate: Option<Arc<Notify>>,
    pub save_gate: Option<Arc<Notify>>,
    pub inits: AtomicUsize,
    pub saves: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl FakeRemote {
    pub(crate) fn holding(record: CampaignRecord) -> Self {
        let remote = Self::default();
        *remote.record.lock().unwrap() = Some(record);
        remote
    }

    pub(crate) fn stored(&self) -> Option<CampaignRecord> {
        self.record.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageProvider for FakeRemote {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Remote
    }

    async fn init(&self) -> cl_storage::Result<()> {
        self.inits.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.init_gate {
            gate.notified().await;
        }
        if self.init_fails.load(Ordering::SeqCst) {
            return Err(StorageError::provider_unavailable("authorization timed out"));
        }
        Ok(())
    }

    async fn save(
        &self,
        _campaign: &CampaignId,
        record: &CampaignRecord,
    ) -> cl_storage::Result<SaveOutcome> {
        if let Some(gate) = &self.save_gate {
            gate.notified().await;
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.save_fails.load(Ordering::SeqCst) {
            return Err(StorageError::provider_unavailable("network down"));
        }

        let previous = self.record.lock().unwrap().replace(record.clone());
        let action = match previous {
            Some(_) => SaveAction::Updated,
            None => SaveAction::Created,
        };
        Ok(SaveOutcome::new(action, "file-1"))
    }

    async fn load(&self, _campaign: &CampaignId) -> cl_storage::Result<Option<CampaignRecord>> {
        if self.load_fails.load(Ordering::SeqCst) {
            return Err(StorageError::provider_unavailable("network down"));
        }
        Ok(self.stored())
    }

    async fn delete(&self, _campaign: &CampaignId) -> cl_storage::Result<bool> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(self.record.lock().unwrap().take().is_some())
    }

    fn is_available(&self) -> bool {
        !self.init_fails.load(Ordering::SeqCst)
    }

    fn storage_info(&self) -> StorageInfo {
        StorageInfo::new(ProviderKind::Remote, None, "fake remote")
    }
}

/// A controller wired to in-memory storage.
pub(crate) struct Harness {
    pub controller: PageController<FakeView>,
    pub view: Arc<FakeView>,
    pub fast_path: Arc<LocalProvider>,
    pub emergency: Arc<MemoryStore>,
}

pub(crate) fn u1() -> UserIdentity {
    UserIdentity::new("u1", "Test User").with_email("u1@example.com")
}

pub(crate) fn prefix() -> KeyPrefix {
    KeyPrefix::new("test_log").unwrap()
}

pub(crate) fn campaign() -> CampaignId {
    "mutantGenesis".parse().unwrap()
}

pub(crate) fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub(crate) fn campaign_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("hp"),
        FieldSpec::checkbox("done"),
        FieldSpec::text("hero"),
        FieldSpec::text_area("notes"),
    ]
}

/// Local-only page over `store`.
pub(crate) fn local_harness(identity: Option<UserIdentity>, store: Arc<MemoryStore>) -> Harness {
    let identity: Arc<dyn IdentitySource> = Arc::new(FixedIdentity(identity));
    let fast_path = Arc::new(LocalProvider::new(store, Arc::clone(&identity), prefix()));
    let providers = ProviderSet {
        fast_path: Arc::clone(&fast_path),
        primary: Arc::clone(&fast_path) as Arc<dyn StorageProvider>,
    };
    build(identity, providers, Arc::new(MemoryStore::new()))
}

/// Page with `remote` as primary and an in-memory fast path.
pub(crate) fn remote_harness(identity: Option<UserIdentity>, remote: Arc<FakeRemote>) -> Harness {
    remote_harness_with(identity, remote, Arc::new(MemoryStore::new()))
}

pub(crate) fn remote_harness_with(
    identity: Option<UserIdentity>,
    remote: Arc<FakeRemote>,
    emergency: Arc<MemoryStore>,
) -> Harness {
    let identity: Arc<dyn IdentitySource> = Arc::new(FixedIdentity(identity));
    let fast_path = Arc::new(LocalProvider::new(
        Arc::new(MemoryStore::new()),
        Arc::clone(&identity),
        prefix(),
    ));
    let providers = ProviderSet {
        fast_path,
        primary: remote,
    };
    build(identity, providers, emergency)
}

fn build(
    identity: Arc<dyn IdentitySource>,
    providers: ProviderSet,
    emergency: Arc<MemoryStore>,
) -> Harness {
    let view = Arc::new(FakeView::new());
    let fast_path = Arc::clone(&providers.fast_path);
    let controller = PageController::new(
        campaign(),
        identity,
        providers,
        emergency.clone(),
        prefix(),
        PageSettings::default(),
        Arc::clone(&view),
    );

    Harness {
        controller,
        view,
        fast_path,
        emergency,
    }
}
