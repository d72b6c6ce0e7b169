//! Recording fakes for the OS ports, shared across glanceable tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::storage::traits::ActivityHandleStorage;

use super::content::{SleepActivityContent, WidgetContent};
use super::ports::{EndActivityOptions, LiveActivityPort, WidgetPort};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityCall {
    Start,
    Update(String),
    Stop(String),
    StopAll,
}

/// Live-activity port that records every call and can be told to fail.
#[derive(Default)]
pub struct FakeLiveActivityPort {
    calls: Mutex<Vec<ActivityCall>>,
    next_id: AtomicU64,
    active: AtomicBool,
    fail_start: AtomicBool,
    fail_next_update: AtomicBool,
    fail_stops: AtomicBool,
}

impl FakeLiveActivityPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ActivityCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    pub fn fail_starts(&self, fail: bool) {
        self.fail_start.store(fail, Ordering::SeqCst);
    }

    /// Fail only the next update call, then recover.
    pub fn fail_next_update(&self) {
        self.fail_next_update.store(true, Ordering::SeqCst);
    }

    pub fn fail_stops(&self, fail: bool) {
        self.fail_stops.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: ActivityCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl LiveActivityPort for FakeLiveActivityPort {
    async fn start(&self, _activity_name: &str, _content: &SleepActivityContent) -> Result<String> {
        if self.fail_start.load(Ordering::SeqCst) {
            bail!("live activities not authorized");
        }
        self.record(ActivityCall::Start);
        self.active.store(true, Ordering::SeqCst);
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("activity-{n}"))
    }

    async fn update(&self, activity_id: &str, _content: &SleepActivityContent) -> Result<()> {
        self.record(ActivityCall::Update(activity_id.to_string()));
        if self.fail_next_update.swap(false, Ordering::SeqCst) {
            bail!("activity {activity_id} not found");
        }
        Ok(())
    }

    async fn stop(&self, activity_id: &str, _options: EndActivityOptions) -> Result<()> {
        self.record(ActivityCall::Stop(activity_id.to_string()));
        if self.fail_stops.load(Ordering::SeqCst) {
            bail!("activity {activity_id} not found");
        }
        self.active.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn stop_all(&self, _options: EndActivityOptions) -> Result<()> {
        self.record(ActivityCall::StopAll);
        self.active.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_active(&self, _activity_name: &str) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Widget port that records updates and clears.
#[derive(Default)]
pub struct FakeWidgetPort {
    updates: Mutex<Vec<(String, WidgetContent)>>,
    clears: Mutex<Vec<String>>,
    fail_updates: AtomicBool,
}

impl FakeWidgetPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<(String, WidgetContent)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn clears(&self) -> Vec<String> {
        self.clears.lock().unwrap().clone()
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl WidgetPort for FakeWidgetPort {
    async fn update(&self, widget_id: &str, content: &WidgetContent) -> Result<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            bail!("widget timeline reload failed");
        }
        self.updates
            .lock()
            .unwrap()
            .push((widget_id.to_string(), content.clone()));
        Ok(())
    }

    async fn clear(&self, widget_id: &str) -> Result<()> {
        self.clears.lock().unwrap().push(widget_id.to_string());
        Ok(())
    }
}

/// Handle store backed by a plain mutex, for tests that do not need a
/// filesystem.
#[derive(Default)]
pub struct InMemoryHandleStore {
    handle: Mutex<Option<String>>,
}

impl ActivityHandleStorage for InMemoryHandleStore {
    fn get_handle(&self) -> Result<Option<String>> {
        Ok(self.handle.lock().unwrap().clone())
    }

    fn set_handle(&self, activity_id: &str) -> Result<()> {
        *self.handle.lock().unwrap() = Some(activity_id.to_string());
        Ok(())
    }

    fn clear_handle(&self) -> Result<()> {
        *self.handle.lock().unwrap() = None;
        Ok(())
    }
}
