//! Textual content for the glanceable surfaces.
//!
//! Visual layout is owned by the platform shell; the backend only derives
//! the strings and timestamps the shell renders. Builders take an explicit
//! `now` so label derivation is deterministic.

use serde::{Deserialize, Serialize};
use shared::DashboardSnapshot;

use crate::domain::time;

use super::ids::DASHBOARD_DEEP_LINK;

/// Content of the sleep-tracking live activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepActivityContent {
    pub baby_name: String,
    pub headline: String,
    pub subline: String,
    /// When set, the surface renders a count-up timer from this instant.
    pub sleep_started_at: Option<i64>,
    pub deep_link_url: String,
}

/// Sleep block of the dashboard widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepPresentation {
    pub title: String,
    pub detail: String,
    pub compact_value: String,
    pub duration_value: String,
}

/// Content of the dashboard widget across its size variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetContent {
    pub baby_name: String,
    pub header_subline: String,
    pub feed_label: String,
    pub diaper_label: String,
    pub feed_compact: String,
    pub diaper_compact: String,
    pub sleep: SleepPresentation,
    pub deep_link_url: String,
}

pub fn sleep_activity_content(snapshot: &DashboardSnapshot) -> SleepActivityContent {
    let headline = match snapshot.sleep_status {
        shared::SleepStatus::Sleeping => "Sleep in progress",
        shared::SleepStatus::Awake => "Awake",
        shared::SleepStatus::NoData => "No sleep logged yet",
    };

    let subline = if let Some(started) = snapshot.sleep_started_at {
        format!("Started {}", time::clock_label(started))
    } else if let Some(last) = snapshot.last_sleep_at {
        format!("Last sleep {}", time::clock_label(last))
    } else {
        "Track sleep from dashboard".to_string()
    };

    SleepActivityContent {
        baby_name: snapshot.baby_name.clone(),
        headline: headline.to_string(),
        subline,
        sleep_started_at: snapshot.sleep_started_at,
        deep_link_url: DASHBOARD_DEEP_LINK.to_string(),
    }
}

fn sleep_presentation(snapshot: &DashboardSnapshot, now_ms: i64) -> SleepPresentation {
    if let Some(started) = snapshot.sleep_started_at {
        let duration = time::sleep_duration(started, now_ms);
        return SleepPresentation {
            title: "Sleeping".to_string(),
            detail: format!("Sleeping for {}", duration),
            compact_value: "Asleep".to_string(),
            duration_value: duration,
        };
    }

    if let Some(last) = snapshot.last_sleep_at {
        return SleepPresentation {
            title: "Awake".to_string(),
            detail: format!("Last sleep {}", time::relative_time(last, now_ms)),
            compact_value: "Awake".to_string(),
            duration_value: time::compact_relative_time(last, now_ms),
        };
    }

    SleepPresentation {
        title: "No sleep data".to_string(),
        detail: "Log sleep from dashboard".to_string(),
        compact_value: "--".to_string(),
        duration_value: "--".to_string(),
    }
}

fn relative_label(timestamp: Option<i64>, now_ms: i64, fallback: &str) -> String {
    match timestamp {
        Some(ts) => time::relative_time(ts, now_ms),
        None => fallback.to_string(),
    }
}

fn compact_label(timestamp: Option<i64>, now_ms: i64) -> String {
    match timestamp {
        Some(ts) => time::compact_relative_time(ts, now_ms),
        None => "--".to_string(),
    }
}

pub fn widget_content(snapshot: &DashboardSnapshot, now_ms: i64) -> WidgetContent {
    WidgetContent {
        baby_name: snapshot.baby_name.clone(),
        header_subline: snapshot
            .baby_age_label
            .clone()
            .unwrap_or_else(|| "Dashboard snapshot".to_string()),
        feed_label: relative_label(snapshot.last_feed_at, now_ms, "No feeds yet"),
        diaper_label: relative_label(snapshot.last_diaper_at, now_ms, "No diapers yet"),
        feed_compact: compact_label(snapshot.last_feed_at, now_ms),
        diaper_compact: compact_label(snapshot.last_diaper_at, now_ms),
        sleep: sleep_presentation(snapshot, now_ms),
        deep_link_url: DASHBOARD_DEEP_LINK.to_string(),
    }
}
