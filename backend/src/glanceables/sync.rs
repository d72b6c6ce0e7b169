//! Push of the current dashboard snapshot to the OS glanceable surfaces.

use std::sync::Arc;

use chrono::Utc;
use shared::DashboardSnapshot;
use tracing::{debug, warn};

use super::content::{sleep_activity_content, widget_content};
use super::ids::DASHBOARD_WIDGET_ID;
use super::live_activity::SleepLiveActivity;
use super::ports::{EndActivityOptions, WidgetPort};
use super::GlanceableGate;

/// Result of one sync attempt, per surface.
///
/// A partial outcome tells the caller not to advance its remembered sync
/// key, so the failed surface is retried on the next attempt even when the
/// snapshot has not changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub widget_synced: bool,
    pub activity_synced: bool,
}

impl SyncOutcome {
    /// Outcome when the gate skips the sync entirely. Counts as complete so
    /// callers do not retry a sync that would be skipped again.
    pub fn skipped() -> Self {
        Self {
            widget_synced: true,
            activity_synced: true,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.widget_synced && self.activity_synced
    }
}

/// Fault-tolerant fan-out of the dashboard snapshot to the widget and the
/// sleep live activity. Surface failures are logged, never raised; a broken
/// widget must not take the live activity down with it, and neither may
/// disturb the caller.
pub struct GlanceableSync {
    gate: GlanceableGate,
    widget: Arc<dyn WidgetPort>,
    sleep_activity: SleepLiveActivity,
}

impl GlanceableSync {
    pub fn new(
        gate: GlanceableGate,
        widget: Arc<dyn WidgetPort>,
        sleep_activity: SleepLiveActivity,
    ) -> Self {
        Self {
            gate,
            widget,
            sleep_activity,
        }
    }

    /// Push `snapshot` to both surfaces concurrently.
    pub async fn sync(&self, snapshot: &DashboardSnapshot) -> SyncOutcome {
        if !self.gate.is_enabled() {
            debug!("glanceables disabled; skipping sync");
            return SyncOutcome::skipped();
        }

        let now_ms = Utc::now().timestamp_millis();
        let widget_payload = widget_content(snapshot, now_ms);
        let activity_payload = sleep_activity_content(snapshot);

        let widget_task = self.widget.update(DASHBOARD_WIDGET_ID, &widget_payload);
        let activity_task = async {
            if snapshot.is_sleeping {
                self.sleep_activity.update_or_start(&activity_payload).await
            } else {
                self.sleep_activity
                    .end(EndActivityOptions::immediate())
                    .await
            }
        };

        let (widget_result, activity_result) = tokio::join!(widget_task, activity_task);

        SyncOutcome {
            widget_synced: report("update dashboard widget", widget_result),
            activity_synced: report("sync sleep live activity", activity_result),
        }
    }

    /// Blank both surfaces. Used on full data reset; safe to call when
    /// nothing is showing.
    pub async fn clear(&self) -> SyncOutcome {
        if !self.gate.is_enabled() {
            return SyncOutcome::skipped();
        }

        let widget_task = self.widget.clear(DASHBOARD_WIDGET_ID);
        let activity_task = self.sleep_activity.end(EndActivityOptions::immediate());

        let (widget_result, activity_result) = tokio::join!(widget_task, activity_task);

        SyncOutcome {
            widget_synced: report("clear dashboard widget", widget_result),
            activity_synced: report("end sleep live activity", activity_result),
        }
    }
}

fn report(action: &str, result: anyhow::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!("failed to {}: {:#}", action, err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glanceables::test_support::{
        ActivityCall, FakeLiveActivityPort, FakeWidgetPort, InMemoryHandleStore,
    };
    use shared::SleepStatus;

    fn controller(
        gate: GlanceableGate,
    ) -> (
        Arc<FakeWidgetPort>,
        Arc<FakeLiveActivityPort>,
        GlanceableSync,
    ) {
        let widget = Arc::new(FakeWidgetPort::new());
        let port = Arc::new(FakeLiveActivityPort::new());
        let handles = Arc::new(InMemoryHandleStore::default());
        let activity = SleepLiveActivity::new(port.clone(), handles);
        let sync = GlanceableSync::new(gate, widget.clone(), activity);
        (widget, port, sync)
    }

    fn sleeping_snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            baby_name: "Theo".to_string(),
            baby_age_label: Some("3 weeks old".to_string()),
            last_feed_at: Some(1_700_000_000_000),
            last_diaper_at: None,
            last_sleep_at: Some(1_700_000_000_000),
            sleep_started_at: Some(1_700_000_000_000),
            is_sleeping: true,
            sleep_status: SleepStatus::Sleeping,
        }
    }

    fn awake_snapshot() -> DashboardSnapshot {
        let mut snapshot = sleeping_snapshot();
        snapshot.sleep_started_at = None;
        snapshot.is_sleeping = false;
        snapshot.sleep_status = SleepStatus::Awake;
        snapshot
    }

    #[tokio::test]
    async fn disabled_gate_touches_no_surface() {
        let (widget, port, sync) = controller(GlanceableGate::disabled());

        let outcome = sync.sync(&sleeping_snapshot()).await;

        assert!(outcome.is_complete());
        assert!(widget.updates().is_empty());
        assert!(port.calls().is_empty());
    }

    #[tokio::test]
    async fn sleeping_snapshot_updates_widget_and_starts_activity() {
        let (widget, port, sync) = controller(GlanceableGate::enabled_for_tests());

        let outcome = sync.sync(&sleeping_snapshot()).await;

        assert!(outcome.is_complete());
        let updates = widget.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, DASHBOARD_WIDGET_ID);
        assert_eq!(updates[0].1.baby_name, "Theo");
        assert_eq!(port.calls(), vec![ActivityCall::Start]);
    }

    #[tokio::test]
    async fn awake_snapshot_ends_the_activity() {
        let (widget, port, sync) = controller(GlanceableGate::enabled_for_tests());

        sync.sync(&sleeping_snapshot()).await;
        let outcome = sync.sync(&awake_snapshot()).await;

        assert!(outcome.is_complete());
        assert_eq!(widget.updates().len(), 2);
        assert!(port
            .calls()
            .iter()
            .any(|call| matches!(call, ActivityCall::Stop(_))));
    }

    #[tokio::test]
    async fn widget_failure_does_not_block_the_activity() {
        let (widget, port, sync) = controller(GlanceableGate::enabled_for_tests());
        widget.fail_updates(true);

        let outcome = sync.sync(&sleeping_snapshot()).await;

        assert!(!outcome.widget_synced);
        assert!(outcome.activity_synced);
        assert!(!outcome.is_complete());
        assert_eq!(port.calls(), vec![ActivityCall::Start]);
    }

    #[tokio::test]
    async fn activity_start_failure_is_contained() {
        let (widget, port, sync) = controller(GlanceableGate::enabled_for_tests());
        port.fail_starts(true);

        let outcome = sync.sync(&sleeping_snapshot()).await;

        assert!(outcome.widget_synced);
        assert!(!outcome.activity_synced);
        assert_eq!(widget.updates().len(), 1);
    }

    #[tokio::test]
    async fn clear_blanks_both_surfaces() {
        let (widget, port, sync) = controller(GlanceableGate::enabled_for_tests());

        sync.sync(&sleeping_snapshot()).await;
        let outcome = sync.clear().await;

        assert!(outcome.is_complete());
        assert_eq!(widget.clears(), vec![DASHBOARD_WIDGET_ID.to_string()]);
        assert!(port
            .calls()
            .iter()
            .any(|call| matches!(call, ActivityCall::Stop(_))));
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let (widget, _port, sync) = controller(GlanceableGate::enabled_for_tests());

        assert!(sync.clear().await.is_complete());
        assert!(sync.clear().await.is_complete());
        assert_eq!(widget.clears().len(), 2);
    }
}
