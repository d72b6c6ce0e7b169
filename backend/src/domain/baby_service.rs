//! Caregiving state service.
//!
//! Owns the in-memory profile and event log, commits every mutation to
//! storage synchronously, and schedules a detached glanceable sync after
//! each state change. Glanceable failures never surface to callers of the
//! mutators; they are logged and retried on the next change.

use std::sync::{Arc, RwLock};

use anyhow::Result;
use chrono::Utc;
use shared::DashboardSnapshot;
use tracing::{debug, info, warn};

use crate::domain::age;
use crate::domain::errors::DomainError;
use crate::domain::models::baby::BabyProfile;
use crate::domain::models::event::{BabyEvent, EventKind};
use crate::domain::snapshot::{
    build_dashboard_snapshot, latest_event_of_kind, latest_sleep_event, snapshot_sync_key,
};
use crate::glanceables::{GlanceableSync, SyncOutcome};
use crate::storage::traits::{Connection, EventStorage, ProfileStorage, SettingsStorage};

#[derive(Debug, Default)]
struct BabyState {
    profile: Option<BabyProfile>,
    /// Most-recent-first, mirroring storage order. Derivations scan by
    /// timestamp and never depend on this ordering.
    events: Vec<BabyEvent>,
    onboarding_done: bool,
}

/// Serializes glanceable syncs. The snapshot is recomputed from live state
/// inside this lock, so a sync that waited its turn always pushes current
/// content, and the remembered key only advances after a fully successful
/// push.
#[derive(Debug, Default)]
struct GlanceDriverState {
    last_synced_key: Option<String>,
}

pub struct BabyService<C: Connection> {
    event_repository: C::EventRepository,
    profile_repository: C::ProfileRepository,
    settings_repository: C::SettingsRepository,
    glanceables: Arc<GlanceableSync>,
    state: Arc<RwLock<BabyState>>,
    driver: Arc<tokio::sync::Mutex<GlanceDriverState>>,
}

impl<C: Connection> Clone for BabyService<C> {
    fn clone(&self) -> Self {
        Self {
            event_repository: self.event_repository.clone(),
            profile_repository: self.profile_repository.clone(),
            settings_repository: self.settings_repository.clone(),
            glanceables: self.glanceables.clone(),
            state: self.state.clone(),
            driver: self.driver.clone(),
        }
    }
}

impl<C: Connection> BabyService<C> {
    pub fn new(connection: &C, glanceables: Arc<GlanceableSync>) -> Self {
        Self {
            event_repository: connection.create_event_repository(),
            profile_repository: connection.create_profile_repository(),
            settings_repository: connection.create_settings_repository(),
            glanceables,
            state: Arc::new(RwLock::new(BabyState::default())),
            driver: Arc::new(tokio::sync::Mutex::new(GlanceDriverState::default())),
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, BabyState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, BabyState> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Hydrate the in-memory state from storage. Called once at startup;
    /// also schedules a sync so the surfaces catch up with whatever was
    /// persisted while the app was gone.
    pub fn load(&self) -> Result<()> {
        let profile = self.profile_repository.get_profile()?;
        let events = match &profile {
            Some(profile) => self.event_repository.list_events(&profile.id, None)?,
            None => Vec::new(),
        };
        let onboarding_done = self.settings_repository.is_onboarding_done()?;

        info!(
            has_profile = profile.is_some(),
            event_count = events.len(),
            "loaded caregiving state"
        );

        {
            let mut state = self.write_state();
            state.profile = profile;
            state.events = events;
            state.onboarding_done = onboarding_done;
        }

        self.schedule_glanceable_sync();
        Ok(())
    }

    pub fn profile(&self) -> Option<BabyProfile> {
        self.read_state().profile.clone()
    }

    pub fn events(&self) -> Vec<BabyEvent> {
        self.read_state().events.clone()
    }

    pub fn is_onboarding_done(&self) -> bool {
        self.read_state().onboarding_done
    }

    /// Current dashboard snapshot derived from in-memory state.
    pub fn dashboard_snapshot(&self) -> DashboardSnapshot {
        let state = self.read_state();
        build_dashboard_snapshot(state.profile.as_ref(), &state.events)
    }

    pub fn last_event_of_kind(&self, kind: EventKind) -> Option<BabyEvent> {
        let state = self.read_state();
        latest_event_of_kind(&state.events, kind).cloned()
    }

    pub fn last_sleep_event(&self) -> Option<BabyEvent> {
        let state = self.read_state();
        latest_sleep_event(&state.events).cloned()
    }

    fn validated_profile_fields(name: &str, birth_date: &str) -> Result<(String, String)> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyName.into());
        }
        let normalized = age::normalize_birth_date(birth_date)
            .ok_or_else(|| DomainError::InvalidBirthDate(birth_date.to_string()))?;
        Ok((trimmed.to_string(), normalized))
    }

    /// Create and persist a new profile, replacing any existing one.
    pub fn save_profile(&self, name: &str, birth_date: &str) -> Result<BabyProfile> {
        let (name, birth_date) = Self::validated_profile_fields(name, birth_date)?;
        let profile = BabyProfile::new(&name, &birth_date);
        self.profile_repository.store_profile(&profile)?;

        let events = self.event_repository.list_events(&profile.id, None)?;
        {
            let mut state = self.write_state();
            state.profile = Some(profile.clone());
            state.events = events;
        }

        info!(baby_id = %profile.id, "saved baby profile");
        self.schedule_glanceable_sync();
        Ok(profile)
    }

    /// Update the existing profile in place, keeping its id and creation
    /// time so logged events stay attached.
    pub fn update_profile(&self, name: &str, birth_date: &str) -> Result<BabyProfile> {
        let (name, birth_date) = Self::validated_profile_fields(name, birth_date)?;
        let mut profile = self.profile().ok_or(DomainError::ProfileMissing)?;
        profile.name = name;
        profile.birth_date = birth_date;
        self.profile_repository.store_profile(&profile)?;

        self.write_state().profile = Some(profile.clone());

        self.schedule_glanceable_sync();
        Ok(profile)
    }

    /// Log a caregiving event stamped with the current time. The storage
    /// write is synchronous; the glanceable push happens in the background.
    pub fn log_event(&self, kind: EventKind, metadata_json: &str) -> Result<BabyEvent> {
        let profile = self.profile().ok_or(DomainError::ProfileMissing)?;
        // Consecutive logs can land in the same millisecond; seq keeps their
        // order well-defined for the snapshot derivation.
        let next_seq = {
            let state = self.read_state();
            state.events.iter().map(|e| e.seq).max().unwrap_or(0) + 1
        };
        let event = BabyEvent::new(
            &profile.id,
            kind,
            Utc::now().timestamp_millis(),
            next_seq,
            metadata_json,
        );
        self.event_repository.append_event(&event)?;

        self.write_state().events.insert(0, event.clone());

        debug!(event_id = %event.id, kind = ?kind, "logged event");
        self.schedule_glanceable_sync();
        Ok(event)
    }

    /// Mark onboarding finished. This is the moment the session becomes
    /// active, so the surfaces get their first real push here.
    pub fn complete_onboarding(&self) -> Result<()> {
        self.settings_repository.set_onboarding_done(true)?;
        self.write_state().onboarding_done = true;
        self.schedule_glanceable_sync();
        Ok(())
    }

    /// Wipe every stored fact and blank the glanceable surfaces.
    pub fn reset_all(&self) -> Result<()> {
        self.event_repository.clear_events()?;
        self.profile_repository.delete_profile()?;
        self.settings_repository.clear()?;

        {
            let mut state = self.write_state();
            *state = BabyState::default();
        }

        warn!("reset all caregiving data");
        let service = self.clone();
        spawn_detached(async move {
            service.clear_glanceables().await;
        });
        Ok(())
    }

    /// Proactively blank the surfaces and forget the remembered sync key so
    /// the next real state pushes unconditionally.
    pub async fn clear_glanceables(&self) -> SyncOutcome {
        let mut driver = self.driver.lock().await;
        driver.last_synced_key = None;
        self.glanceables.clear().await
    }

    fn schedule_glanceable_sync(&self) {
        let service = self.clone();
        spawn_detached(async move {
            service.sync_glanceables().await;
        });
    }

    /// Push the current snapshot to the glanceable surfaces, suppressing the
    /// push entirely when nothing observable changed since the last fully
    /// successful sync. Overlapping calls queue on the driver lock; each
    /// recomputes the snapshot once it holds the lock, so stale content is
    /// never pushed.
    ///
    /// Before onboarding finishes, or without a profile, nothing is ever
    /// pushed: the surfaces are cleared once if anything had been synced,
    /// and otherwise left untouched.
    pub async fn sync_glanceables(&self) -> SyncOutcome {
        let mut driver = self.driver.lock().await;

        let session_active = {
            let state = self.read_state();
            state.onboarding_done && state.profile.is_some()
        };
        if !session_active {
            if driver.last_synced_key.take().is_some() {
                debug!("session inactive; clearing glanceable surfaces");
                return self.glanceables.clear().await;
            }
            return SyncOutcome::skipped();
        }

        let snapshot = self.dashboard_snapshot();
        let key = snapshot_sync_key(&snapshot);
        if driver.last_synced_key.as_deref() == Some(key.as_str()) {
            debug!("snapshot unchanged; skipping glanceable sync");
            return SyncOutcome::skipped();
        }

        let outcome = self.glanceables.sync(&snapshot).await;
        if outcome.is_complete() {
            driver.last_synced_key = Some(key);
        } else {
            debug!(?outcome, "partial glanceable sync; will retry on next change");
        }
        outcome
    }
}

/// Mutators are plain sync functions callable from anywhere; outside a
/// runtime the detached sync is dropped and the next in-runtime change
/// catches the surfaces up.
fn spawn_detached<F>(future: F)
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        handle.spawn(async move {
            future.await;
        });
    } else {
        debug!("no async runtime; skipping scheduled glanceable sync");
    }
}
