use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the baby is currently asleep, awake, or has no sleep history yet.
///
/// `NoData` is only produced when the event log contains no sleep event at
/// all; once a single sleep event exists the status is always `Sleeping` or
/// `Awake`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepStatus {
    Sleeping,
    Awake,
    NoData,
}

impl fmt::Display for SleepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SleepStatus::Sleeping => write!(f, "sleeping"),
            SleepStatus::Awake => write!(f, "awake"),
            SleepStatus::NoData => write!(f, "no_data"),
        }
    }
}

/// Point-in-time derived view of caregiving state, recomputed from the full
/// event history on every state change.
///
/// All timestamps are epoch milliseconds. Invariants:
/// - `sleep_started_at` is `Some` iff `is_sleeping` is true
/// - `is_sleeping` is true iff the latest sleep event is a sleep start
/// - `sleep_status` is `NoData` iff no sleep event exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub baby_name: String,
    pub baby_age_label: Option<String>,
    pub last_feed_at: Option<i64>,
    pub last_diaper_at: Option<i64>,
    pub last_sleep_at: Option<i64>,
    pub sleep_started_at: Option<i64>,
    pub is_sleeping: bool,
    pub sleep_status: SleepStatus,
}

impl DashboardSnapshot {
    /// Snapshot for the "nothing known yet" state: placeholder name, no
    /// timestamps, no sleep history.
    pub fn empty() -> Self {
        Self {
            baby_name: "Baby".to_string(),
            baby_age_label: None,
            last_feed_at: None,
            last_diaper_at: None,
            last_sleep_at: None,
            sleep_started_at: None,
            is_sleeping: false,
            sleep_status: SleepStatus::NoData,
        }
    }
}
