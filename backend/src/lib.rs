//! Caregiving backend for the baby-tracking app.
//!
//! Owns the event log, the baby profile, dashboard snapshot derivation and
//! the pipeline that keeps the OS glanceable surfaces (home-screen widget,
//! sleep live activity) in step with that snapshot. The platform shell
//! embeds [`Backend`] and injects its OS primitives through the port traits
//! in [`glanceables`].

pub mod domain;
pub mod glanceables;
pub mod storage;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use domain::BabyService;
use glanceables::{GlanceableGate, GlanceableSync, LiveActivityPort, SleepLiveActivity, WidgetPort};
use storage::traits::Connection;
use storage::KvConnection;

pub use shared::{DashboardSnapshot, SleepStatus};

/// Fully wired backend over the file-backed key-value store.
pub struct Backend {
    pub baby_service: BabyService<KvConnection>,
    pub glanceables: Arc<GlanceableSync>,
}

impl Backend {
    /// Wire up storage, the sleep activity tracker and the sync controller
    /// under `data_dir`, then hydrate state from disk.
    pub fn new(
        data_dir: &Path,
        gate: GlanceableGate,
        live_activity_port: Arc<dyn LiveActivityPort>,
        widget_port: Arc<dyn WidgetPort>,
    ) -> Result<Self> {
        let connection = KvConnection::new(data_dir)?;

        let handles = Arc::new(connection.create_settings_repository());
        let sleep_activity = SleepLiveActivity::new(live_activity_port, handles);
        let glanceables = Arc::new(GlanceableSync::new(gate, widget_port, sleep_activity));

        let baby_service = BabyService::new(&connection, glanceables.clone());
        baby_service.load()?;

        Ok(Self {
            baby_service,
            glanceables,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::EventKind;
    use glanceables::test_support::{FakeLiveActivityPort, FakeWidgetPort};
    use tempfile::TempDir;

    #[tokio::test]
    async fn backend_survives_a_restart() {
        let data_dir = TempDir::new().unwrap();

        {
            let backend = Backend::new(
                data_dir.path(),
                GlanceableGate::disabled(),
                Arc::new(FakeLiveActivityPort::new()),
                Arc::new(FakeWidgetPort::new()),
            )
            .unwrap();
            backend.baby_service.save_profile("Theo", "2025-06-01").unwrap();
            backend.baby_service.log_event(EventKind::Feed, "{}").unwrap();
        }

        let backend = Backend::new(
            data_dir.path(),
            GlanceableGate::disabled(),
            Arc::new(FakeLiveActivityPort::new()),
            Arc::new(FakeWidgetPort::new()),
        )
        .unwrap();

        assert_eq!(
            backend.baby_service.profile().map(|p| p.name),
            Some("Theo".to_string())
        );
        assert_eq!(backend.baby_service.events().len(), 1);
        assert!(backend.baby_service.dashboard_snapshot().last_feed_at.is_some());
    }
}
