use crate::{
    ActionLatch, LoadReport, PageSettings, PageState, PageView, ProviderStatus, RecordSource,
    RecoveryReport, ResetOutcome, SaveReport, Severity, StatusBanner,
};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use cl_auth::IdentitySource;
use cl_core::{
    CampaignId, CampaignRecord, KeyPrefix, ProviderKind, StorageKey, UserIdentity, decode,
    encode, snapshot,
};
use cl_kv::KeyValueStore;
use cl_storage::{
    LocalProvider, ProviderSet, StorageError, StorageErrorKind, StorageProvider,
    read_owned_record, write_owned_record,
};
use log::{debug, error, info, warn};

pub const RESET_PROMPT: &str =
    "Are you sure you want to reset all progress? This cannot be undone.";

/// Drives one campaign page: resolves who is playing, loads the freshest
/// record into the form and persists it on request.
///
/// Every public operation reports its outcome to the view and never panics
/// or returns an error.
pub struct PageController<V: PageView> {
    campaign: CampaignId,
    identity: Arc<dyn IdentitySource>,
    fast_path: Arc<LocalProvider>,
    primary: Arc<dyn StorageProvider>,
    emergency: Arc<dyn KeyValueStore>,
    prefix: KeyPrefix,
    settings: PageSettings,
    view: Arc<V>,
    state: Mutex<PageState>,
    provider_status: Mutex<ProviderStatus>,
    active_actions: AtomicUsize,
    load_latch: ActionLatch,
    save_latch: ActionLatch,
    reset_latch: ActionLatch,
}

/// Keeps the controls disabled while at least one action runs.
struct ControlsLock<'a, V: PageView> {
    controller: &'a PageController<V>,
}

impl<V: PageView> Drop for ControlsLock<'_, V> {
    fn drop(&mut self) {
        if self.controller.active_actions.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.controller.view.set_controls_enabled(true);
        }
    }
}

impl<V: PageView> PageController<V> {
    pub fn new(
        campaign: CampaignId,
        identity: Arc<dyn IdentitySource>,
        providers: ProviderSet,
        emergency: Arc<dyn KeyValueStore>,
        prefix: KeyPrefix,
        settings: PageSettings,
        view: Arc<V>,
    ) -> Self {
        Self {
            campaign,
            identity,
            fast_path: providers.fast_path,
            primary: providers.primary,
            emergency,
            prefix,
            settings,
            view,
            state: Mutex::new(PageState::Uninitialized),
            provider_status: Mutex::new(ProviderStatus::Pending),
            active_actions: AtomicUsize::new(0),
            load_latch: ActionLatch::new("load"),
            save_latch: ActionLatch::new("save"),
            reset_latch: ActionLatch::new("reset"),
        }
    }

    pub fn campaign(&self) -> &CampaignId {
        &self.campaign
    }

    pub fn state(&self) -> PageState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn provider_status(&self) -> ProviderStatus {
        self.provider_status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // =========================================================================
    // Page lifecycle
    // =========================================================================

    /// Page load: resolve identity, prepare the primary provider and show
    /// the freshest record.
    pub async fn open(&self) -> LoadReport {
        let Some(_latch) = self.load_latch.try_acquire() else {
            return self.busy(&self.load_latch, LoadReport::Busy);
        };

        self.set_state(PageState::ResolvingIdentity);
        let Some(identity) = self.identity.resolve() else {
            self.enter_not_signed_in();
            return LoadReport::NotSignedIn;
        };

        self.set_state(PageState::Ready);
        info!("Opening {} for {}", self.campaign, identity.id);
        self.view.show_welcome(&identity);
        self.view.set_controls_enabled(true);

        let _controls = self.lock_controls();
        self.set_state(PageState::Loading);

        // The fast-path record is applied as soon as it is read, while the
        // primary provider may still be waiting on authorization.
        let (init, fast_record) = tokio::join!(self.primary.init(), async {
            let fast = self.fast_path.load(&self.campaign).await;
            self.apply_fast_path(fast)
        });
        self.set_provider_status(ProviderStatus::from(&init));
        if let Err(e) = &init {
            warn!("Primary storage not ready: {e}");
        }

        self.merge_primary(fast_record).await
    }

    /// User-triggered reload with the same freshness merge as `open`.
    pub async fn reload(&self) -> LoadReport {
        let Some(_latch) = self.load_latch.try_acquire() else {
            return self.busy(&self.load_latch, LoadReport::Busy);
        };
        if self.signed_in_identity().is_none() {
            return LoadReport::NotSignedIn;
        }

        let _controls = self.lock_controls();
        self.set_state(PageState::Loading);

        let fast = self.fast_path.load(&self.campaign).await;
        let fast_record = self.apply_fast_path(fast);
        self.ensure_primary().await;

        self.merge_primary(fast_record).await
    }

    fn apply_fast_path(
        &self,
        fast: Result<Option<CampaignRecord>, StorageError>,
    ) -> Option<CampaignRecord> {
        let record = fast.unwrap_or_else(|e| {
            warn!("Fast-path load of {} failed: {e}", self.campaign);
            None
        })?;

        let applied = decode(&record, self.view.as_ref());
        debug!("Applied {applied} field(s) from the fast path");
        Some(record)
    }

    async fn merge_primary(&self, fast_record: Option<CampaignRecord>) -> LoadReport {
        let mut source = fast_record.as_ref().map(|_| RecordSource::FastPath);
        let mut shown = fast_record.as_ref().map(|r| r.metadata.last_modified);

        let mut primary_failure = None;
        if self.primary.kind() == ProviderKind::Local {
            self.view
                .set_sync_info(&with_last_update("Saved on this device", shown), Severity::Info);
        } else if let ProviderStatus::Unavailable { reason } = self.provider_status() {
            primary_failure = Some(StorageErrorKind::ProviderUnavailable);
            self.show_primary_unavailable(&reason);
        } else {
            match self.primary.load(&self.campaign).await {
                Ok(remote) => {
                    if let Some(remote) = remote.filter(|remote| {
                        fast_record
                            .as_ref()
                            .is_none_or(|local| remote.is_newer_than(local))
                    }) {
                        let applied = decode(&remote, self.view.as_ref());
                        debug!("Applied {applied} field(s) from primary storage");
                        source = Some(RecordSource::Primary);
                        shown = Some(remote.metadata.last_modified);
                        if let Err(e) = self.fast_path.save(&self.campaign, &remote).await {
                            warn!("Failed to refresh fast-path cache: {e}");
                        }
                    }
                    self.view.set_sync_info(
                        &with_last_update("Synced with cloud storage", shown),
                        Severity::Success,
                    );
                }
                Err(e) => {
                    warn!("Primary load of {} failed: {e}", self.campaign);
                    primary_failure = Some(e.kind());
                    self.banner(
                        Severity::Warning,
                        "Could not reach cloud storage. Showing progress saved on this device.",
                    );
                    self.view
                        .set_sync_info("Cloud sync failed", Severity::Warning);
                }
            }
        }

        self.set_state(PageState::Loaded);
        LoadReport::Loaded {
            source,
            primary_failure,
        }
    }

    // =========================================================================
    // User actions
    // =========================================================================

    /// Persist the form. Falls back to the emergency slot when the primary
    /// provider refuses the write.
    pub async fn save(&self) -> SaveReport {
        let Some(_latch) = self.save_latch.try_acquire() else {
            return self.busy(&self.save_latch, SaveReport::Busy);
        };
        let Some(identity) = self.signed_in_identity() else {
            return SaveReport::NotSignedIn;
        };

        let _controls = self.lock_controls();
        let previous = self.replace_state(PageState::Saving);
        self.ensure_primary().await;

        let record = encode(&snapshot(self.view.as_ref()), &identity);
        let report = match self.primary.save(&self.campaign, &record).await {
            Ok(outcome) => {
                info!("Saved {} ({:?})", self.campaign, outcome.action);
                self.after_primary_save(&record, &identity).await;
                self.banner(Severity::Success, "Progress saved!");
                SaveReport::Saved {
                    action: outcome.action,
                }
            }
            Err(e) => {
                warn!("Primary save of {} failed: {e}", self.campaign);
                self.save_to_emergency(&record, &identity, e.kind())
            }
        };

        self.set_state(restored(previous));
        report
    }

    /// Clear the form and every stored copy, after confirmation.
    pub async fn reset(&self) -> ResetOutcome {
        let Some(_latch) = self.reset_latch.try_acquire() else {
            return self.busy(&self.reset_latch, ResetOutcome::Busy);
        };
        let Some(identity) = self.signed_in_identity() else {
            return ResetOutcome::NotSignedIn;
        };
        if !self.view.confirm(RESET_PROMPT) {
            debug!("Reset of {} declined", self.campaign);
            return ResetOutcome::Declined;
        }

        let _controls = self.lock_controls();
        let previous = self.replace_state(PageState::Resetting);
        self.view.clear();

        let mut complete = true;
        if let Err(e) = self.fast_path.delete(&self.campaign).await {
            warn!("Failed to delete fast-path record: {e}");
            complete = false;
        }
        if self.primary.kind() != ProviderKind::Local {
            self.ensure_primary().await;
            if let Err(e) = self.primary.delete(&self.campaign).await {
                warn!("Failed to delete primary record: {e}");
                complete = false;
            }
        }
        let slot = self.emergency_key(&identity);
        if let Err(e) = self.emergency.remove(slot.as_str()) {
            warn!("Failed to clear emergency slot {slot}: {e}");
            complete = false;
        }

        if complete {
            self.banner(Severity::Info, "Progress reset.");
        } else {
            self.banner(
                Severity::Warning,
                "Progress reset on this page, but some saved copies could not be removed.",
            );
        }
        info!("Reset {} (complete: {complete})", self.campaign);

        self.set_state(restored(previous));
        ResetOutcome::Reset { complete }
    }

    /// Apply the record left in the emergency slot by a failed save.
    pub async fn recover_emergency(&self) -> RecoveryReport {
        let Some(_latch) = self.load_latch.try_acquire() else {
            return self.busy(&self.load_latch, RecoveryReport::Busy);
        };
        let Some(identity) = self.signed_in_identity() else {
            return RecoveryReport::NotSignedIn;
        };

        let slot = self.emergency_key(&identity);
        match read_owned_record(self.emergency.as_ref(), &slot, &identity) {
            Ok(Some(record)) => {
                let fields_applied = decode(&record, self.view.as_ref());
                info!("Recovered {fields_applied} field(s) from {slot}");
                self.banner(Severity::Info, "Recovered unsaved progress.");
                RecoveryReport::Recovered { fields_applied }
            }
            Ok(None) => RecoveryReport::NothingToRecover,
            Err(e) => {
                warn!("Failed to read emergency slot {slot}: {e}");
                RecoveryReport::NothingToRecover
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[allow(clippy::collapsible_if)]
    async fn after_primary_save(&self, record: &CampaignRecord, identity: &UserIdentity) {
        if self.primary.kind() != ProviderKind::Local {
            if let Err(e) = self.fast_path.save(&self.campaign, record).await {
                warn!("Failed to mirror record into fast path: {e}");
            }
        }

        // A newer record now exists; the emergency copy is stale.
        let slot = self.emergency_key(identity);
        if let Err(e) = self.emergency.remove(slot.as_str()) {
            warn!("Failed to clear emergency slot {slot}: {e}");
        }
    }

    fn save_to_emergency(
        &self,
        record: &CampaignRecord,
        identity: &UserIdentity,
        primary_failure: StorageErrorKind,
    ) -> SaveReport {
        let slot = self.emergency_key(identity);
        match write_owned_record(self.emergency.as_ref(), &slot, record, identity) {
            Ok(()) => {
                warn!("Record for {} kept in emergency slot {slot}", self.campaign);
                self.banner(
                    Severity::Warning,
                    "Could not save to storage. Progress kept on this device.",
                );
                SaveReport::SavedToEmergency { primary_failure }
            }
            Err(e) => {
                error!("Emergency save of {} failed: {e}", self.campaign);
                self.banner(Severity::Error, "Error saving progress. Please try again.");
                SaveReport::Failed { primary_failure }
            }
        }
    }

    /// Retries provider preparation on a user action if it has not
    /// succeeded yet.
    async fn ensure_primary(&self) {
        if self.provider_status().is_ready() {
            return;
        }

        let init = self.primary.init().await;
        self.set_provider_status(ProviderStatus::from(&init));
        if let Err(e) = init {
            warn!("Primary storage still not ready: {e}");
        }
    }

    fn signed_in_identity(&self) -> Option<UserIdentity> {
        let identity = self.identity.resolve();
        if identity.is_none() {
            self.enter_not_signed_in();
        }
        identity
    }

    fn enter_not_signed_in(&self) {
        info!("No identity for {}; waiting for sign-in", self.campaign);
        self.set_state(PageState::NotSignedIn);
        self.view.set_controls_enabled(false);
        self.view.show_sign_in_prompt();
        self.view
            .set_sync_info("Sign in to save your progress", Severity::Warning);
    }

    fn show_primary_unavailable(&self, reason: &str) {
        debug!("Primary storage unavailable: {reason}");
        self.view.set_sync_info(
            "Cloud storage unavailable. Progress is kept on this device.",
            Severity::Warning,
        );
    }

    fn lock_controls(&self) -> ControlsLock<'_, V> {
        if self.active_actions.fetch_add(1, Ordering::AcqRel) == 0 {
            self.view.set_controls_enabled(false);
        }
        ControlsLock { controller: self }
    }

    fn busy<R>(&self, latch: &ActionLatch, report: R) -> R {
        debug!("Ignoring {} request: already running", latch.name());
        report
    }

    fn banner(&self, severity: Severity, message: &str) {
        self.view.show_status(StatusBanner::new(
            severity,
            message,
            self.settings.status_dismiss,
        ));
    }

    fn emergency_key(&self, identity: &UserIdentity) -> StorageKey {
        StorageKey::emergency(&self.prefix, &self.campaign, &identity.id)
    }

    fn set_state(&self, state: PageState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    fn replace_state(&self, state: PageState) -> PageState {
        std::mem::replace(
            &mut *self.state.lock().unwrap_or_else(PoisonError::into_inner),
            state,
        )
    }

    fn set_provider_status(&self, status: ProviderStatus) {
        *self
            .provider_status
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = status;
    }
}

fn with_last_update(text: &str, last_modified: Option<DateTime<Utc>>) -> String {
    match last_modified {
        Some(at) => format!("{text} (last updated {})", at.format("%Y-%m-%d %H:%M UTC")),
        None => text.to_string(),
    }
}

/// State to return to after a save or reset.
fn restored(previous: PageState) -> PageState {
    match previous {
        PageState::Saving | PageState::Resetting | PageState::Loading => PageState::Loaded,
        other => other,
    }
}
