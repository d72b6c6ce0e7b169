//! Well-known identifiers shared with the OS glanceable surfaces.

/// Activity name registered for the sleep-tracking live activity. Also used
/// as the fallback target when no per-instance handle is persisted.
pub const SLEEP_ACTIVITY_NAME: &str = "sleep_tracking";

/// Identifier of the home-screen dashboard widget.
pub const DASHBOARD_WIDGET_ID: &str = "dashboard_snapshot";

/// Deep link attached to every glanceable so taps land on the dashboard.
pub const DASHBOARD_DEEP_LINK: &str = "/dashboard";

/// Environment flag gating the whole glanceable subsystem. Unset counts as
/// enabled; the platform check still applies.
pub const ENABLE_GLANCEABLES_ENV: &str = "STEADYDAD_ENABLE_GLANCEABLES";
