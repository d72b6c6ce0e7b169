//! # Glanceables Module
//!
//! Keeps the OS glanceable surfaces (home-screen widget, sleep live
//! activity) in step with the dashboard snapshot. The backend owns the
//! decision logic and content derivation; the platform shell injects the
//! OS primitives through the port traits.
//!
//! The whole subsystem is best-effort: surface failures are logged and
//! absorbed so the primary logging flow is never disturbed.

pub mod content;
pub mod ids;
pub mod live_activity;
pub mod ports;
pub mod sync;

#[cfg(test)]
pub mod test_support;

pub use content::{sleep_activity_content, widget_content, SleepActivityContent, WidgetContent};
pub use live_activity::SleepLiveActivity;
pub use ports::{DismissalPolicy, EndActivityOptions, LiveActivityPort, WidgetPort};
pub use sync::{GlanceableSync, SyncOutcome};

/// Whether the glanceable subsystem is allowed to touch the OS at all.
///
/// Two conditions, both required: the platform must support the surfaces
/// and the environment flag must not opt out. An unset flag counts as
/// enabled so production builds need no configuration.
#[derive(Debug, Clone)]
pub struct GlanceableGate {
    platform_supported: bool,
    flag: Option<String>,
}

impl GlanceableGate {
    pub fn new(platform_supported: bool, flag: Option<String>) -> Self {
        Self {
            platform_supported,
            flag,
        }
    }

    /// Gate derived from the build target and the process environment.
    pub fn from_env() -> Self {
        Self::new(
            cfg!(target_os = "ios"),
            std::env::var(ids::ENABLE_GLANCEABLES_ENV).ok(),
        )
    }

    /// Gate that never allows any surface work.
    pub fn disabled() -> Self {
        Self::new(false, None)
    }

    #[cfg(test)]
    pub fn enabled_for_tests() -> Self {
        Self::new(true, None)
    }

    pub fn is_enabled(&self) -> bool {
        self.platform_supported && is_truthy_flag(self.flag.as_deref())
    }
}

/// Unset means enabled; a set flag enables only for "1", "true" or "yes"
/// (case-insensitive, surrounding whitespace ignored).
fn is_truthy_flag(flag: Option<&str>) -> bool {
    match flag {
        None => true,
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        ),
    }
}
