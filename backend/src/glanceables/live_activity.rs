use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::storage::traits::ActivityHandleStorage;

use super::content::SleepActivityContent;
use super::ids::SLEEP_ACTIVITY_NAME;
use super::ports::{EndActivityOptions, LiveActivityPort};

/// Lifecycle tracker for the sleep live activity.
///
/// Holds the externally-assigned activity id (persisted plus an in-process
/// cache) so updates can target the same instance across process restarts.
/// The OS can end activities behind the app's back, so every write path
/// must tolerate "the handle I remember no longer refers to anything live"
/// and self-heal by restarting rather than erroring out.
#[derive(Clone)]
pub struct SleepLiveActivity {
    port: Arc<dyn LiveActivityPort>,
    handles: Arc<dyn ActivityHandleStorage>,
    // None = not read yet, Some(inner) = known persisted state.
    cached_handle: Arc<Mutex<Option<Option<String>>>>,
}

impl SleepLiveActivity {
    pub fn new(port: Arc<dyn LiveActivityPort>, handles: Arc<dyn ActivityHandleStorage>) -> Self {
        Self {
            port,
            handles,
            cached_handle: Arc::new(Mutex::new(None)),
        }
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, Option<Option<String>>> {
        match self.cached_handle.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn persisted_handle(&self) -> Result<Option<String>> {
        let mut cache = self.lock_cache();
        if let Some(known) = cache.as_ref() {
            return Ok(known.clone());
        }
        let stored = self.handles.get_handle()?;
        *cache = Some(stored.clone());
        Ok(stored)
    }

    fn remember_handle(&self, activity_id: &str) -> Result<()> {
        *self.lock_cache() = Some(Some(activity_id.to_string()));
        self.handles.set_handle(activity_id)
    }

    fn forget_handle(&self) -> Result<()> {
        *self.lock_cache() = Some(None);
        self.handles.clear_handle()
    }

    /// Start a fresh activity instance and persist its id.
    pub async fn start(&self, content: &SleepActivityContent) -> Result<()> {
        let activity_id = self.port.start(SLEEP_ACTIVITY_NAME, content).await?;
        self.remember_handle(&activity_id)?;
        info!(activity_id = %activity_id, "started sleep live activity");
        Ok(())
    }

    /// Push fresh content to the running activity, starting one when none is
    /// running. A failed update clears the persisted handle and restarts,
    /// healing from a stale id without caller involvement.
    pub async fn update_or_start(&self, content: &SleepActivityContent) -> Result<()> {
        let persisted = self.persisted_handle()?;

        if persisted.is_none() && !self.port.is_active(SLEEP_ACTIVITY_NAME) {
            return self.start(content).await;
        }

        let target = persisted.unwrap_or_else(|| SLEEP_ACTIVITY_NAME.to_string());
        match self.port.update(&target, content).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(
                    "sleep activity update failed for {}: {:#}; restarting",
                    target, err
                );
                self.forget_handle()?;
                self.start(content).await
            }
        }
    }

    /// Stop the activity. Every plausible identifier is tried independently,
    /// with a bulk stop as the last resort; the persisted handle is cleared
    /// regardless of how the stops went, so a corrupted id can never lock
    /// the tracker out of a clean start.
    pub async fn end(&self, options: EndActivityOptions) -> Result<()> {
        let mut candidates: Vec<String> = Vec::new();
        if let Some(handle) = self.persisted_handle()? {
            candidates.push(handle);
        }
        if !candidates.iter().any(|c| c == SLEEP_ACTIVITY_NAME) {
            candidates.push(SLEEP_ACTIVITY_NAME.to_string());
        }

        let mut stopped = false;
        for candidate in &candidates {
            match self.port.stop(candidate, options).await {
                Ok(()) => stopped = true,
                Err(err) => debug!("stop failed for {}: {:#}", candidate, err),
            }
        }

        let fallback = if stopped {
            Ok(())
        } else {
            self.port.stop_all(options).await
        };

        self.forget_handle()?;
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glanceables::test_support::{ActivityCall, FakeLiveActivityPort, InMemoryHandleStore};
    use shared::DashboardSnapshot;

    fn content() -> SleepActivityContent {
        crate::glanceables::content::sleep_activity_content(&DashboardSnapshot::empty())
    }

    fn tracker() -> (Arc<FakeLiveActivityPort>, Arc<InMemoryHandleStore>, SleepLiveActivity) {
        let port = Arc::new(FakeLiveActivityPort::new());
        let store = Arc::new(InMemoryHandleStore::default());
        let tracker = SleepLiveActivity::new(port.clone(), store.clone());
        (port, store, tracker)
    }

    #[tokio::test]
    async fn update_or_start_starts_when_nothing_is_running() {
        let (port, store, tracker) = tracker();

        tracker.update_or_start(&content()).await.unwrap();

        assert_eq!(port.calls(), vec![ActivityCall::Start]);
        assert_eq!(store.get_handle().unwrap().as_deref(), Some("activity-1"));
    }

    #[tokio::test]
    async fn update_or_start_updates_the_persisted_handle() {
        let (port, _store, tracker) = tracker();

        tracker.update_or_start(&content()).await.unwrap();
        tracker.update_or_start(&content()).await.unwrap();

        // The second call routes through the update branch; no second start.
        assert_eq!(
            port.calls(),
            vec![
                ActivityCall::Start,
                ActivityCall::Update("activity-1".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn failed_update_clears_handle_and_restarts_once() {
        let (port, store, tracker) = tracker();

        tracker.update_or_start(&content()).await.unwrap();
        port.fail_next_update();
        tracker.update_or_start(&content()).await.unwrap();

        assert_eq!(
            port.calls(),
            vec![
                ActivityCall::Start,
                ActivityCall::Update("activity-1".to_string()),
                ActivityCall::Start,
            ]
        );
        // The healed handle points at the restarted activity.
        assert_eq!(store.get_handle().unwrap().as_deref(), Some("activity-2"));
    }

    #[tokio::test]
    async fn update_targets_the_well_known_name_when_active_without_handle() {
        let (port, _store, tracker) = tracker();
        port.set_active(true);

        tracker.update_or_start(&content()).await.unwrap();

        assert_eq!(
            port.calls(),
            vec![ActivityCall::Update(SLEEP_ACTIVITY_NAME.to_string())]
        );
    }

    #[tokio::test]
    async fn end_stops_every_candidate_and_clears_the_handle() {
        let (port, store, tracker) = tracker();

        tracker.start(&content()).await.unwrap();
        tracker.end(EndActivityOptions::immediate()).await.unwrap();

        assert_eq!(
            port.calls(),
            vec![
                ActivityCall::Start,
                ActivityCall::Stop("activity-1".to_string()),
                ActivityCall::Stop(SLEEP_ACTIVITY_NAME.to_string()),
            ]
        );
        assert_eq!(store.get_handle().unwrap(), None);
    }

    #[tokio::test]
    async fn end_falls_back_to_stop_all_when_every_stop_fails() {
        let (port, store, tracker) = tracker();

        tracker.start(&content()).await.unwrap();
        port.fail_stops(true);

        tracker.end(EndActivityOptions::immediate()).await.unwrap();

        let calls = port.calls();
        assert_eq!(calls.last(), Some(&ActivityCall::StopAll));
        // Handle cleared even though individual stops failed.
        assert_eq!(store.get_handle().unwrap(), None);
    }

    #[tokio::test]
    async fn end_is_idempotent_with_no_activity_state() {
        let (port, _store, tracker) = tracker();

        tracker.end(EndActivityOptions::immediate()).await.unwrap();
        tracker.end(EndActivityOptions::immediate()).await.unwrap();

        // Only the well-known name is targeted when no handle is persisted.
        assert!(port
            .calls()
            .iter()
            .all(|call| matches!(call, ActivityCall::Stop(id) if id == SLEEP_ACTIVITY_NAME)));
    }

    #[tokio::test]
    async fn handle_is_recovered_from_storage_after_restart() {
        let port = Arc::new(FakeLiveActivityPort::new());
        let store = Arc::new(InMemoryHandleStore::default());

        let first = SleepLiveActivity::new(port.clone(), store.clone());
        first.start(&content()).await.unwrap();

        // A fresh tracker over the same store models a process restart.
        let second = SleepLiveActivity::new(port.clone(), store.clone());
        second.update_or_start(&content()).await.unwrap();

        assert_eq!(
            port.calls().last(),
            Some(&ActivityCall::Update("activity-1".to_string()))
        );
    }
}
