//! OS boundary traits for the glanceable surfaces.
//!
//! The platform shell injects implementations of these; everything behind
//! them (rendering, OS permission prompts, activity lifetimes) is opaque to
//! the backend. Calls may fail routinely and callers treat failures as
//! "try again on the next change".

use anyhow::Result;
use async_trait::async_trait;

use super::content::{SleepActivityContent, WidgetContent};

/// How an ended live activity leaves the lock screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DismissalPolicy {
    /// Let the OS decide when to remove the ended activity.
    #[default]
    System,
    /// Remove the activity immediately.
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndActivityOptions {
    pub dismissal_policy: DismissalPolicy,
}

impl EndActivityOptions {
    pub fn immediate() -> Self {
        Self {
            dismissal_policy: DismissalPolicy::Immediate,
        }
    }
}

/// Primitives of the OS live-activity subsystem.
#[async_trait]
pub trait LiveActivityPort: Send + Sync {
    /// Start a new activity instance and return its externally-assigned id.
    async fn start(&self, activity_name: &str, content: &SleepActivityContent) -> Result<String>;

    /// Update an existing activity. Fails when the id no longer refers to a
    /// live activity.
    async fn update(&self, activity_id: &str, content: &SleepActivityContent) -> Result<()>;

    /// Stop one activity by id or name.
    async fn stop(&self, activity_id: &str, options: EndActivityOptions) -> Result<()>;

    /// Stop every activity owned by the app.
    async fn stop_all(&self, options: EndActivityOptions) -> Result<()>;

    /// Whether an activity with the given name is currently running.
    fn is_active(&self, activity_name: &str) -> bool;
}

/// Primitives of the OS widget subsystem.
#[async_trait]
pub trait WidgetPort: Send + Sync {
    async fn update(&self, widget_id: &str, content: &WidgetContent) -> Result<()>;

    async fn clear(&self, widget_id: &str) -> Result<()>;
}
