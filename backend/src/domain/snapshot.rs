//! Dashboard snapshot derivation.
//!
//! Pure reducer from the append-only event log to the current caregiving
//! state, plus the change-detection fingerprint used to suppress redundant
//! glanceable syncs. No I/O happens here.

use chrono::{Local, NaiveDate};
use shared::{DashboardSnapshot, SleepStatus};

use crate::domain::age;
use crate::domain::models::baby::BabyProfile;
use crate::domain::models::event::{BabyEvent, EventKind};

/// Total order for "latest event" scans: timestamp first, then the insertion
/// counter, so two events logged in the same millisecond resolve toward the
/// one logged last. Event id is the final fallback for pre-`seq` documents,
/// keeping the order total over any stored data. Every consumer scans
/// instead of trusting storage order.
fn is_later(candidate: &BabyEvent, current: &BabyEvent) -> bool {
    (candidate.timestamp, candidate.seq, candidate.id.as_str())
        > (current.timestamp, current.seq, current.id.as_str())
}

pub(crate) fn latest_event_of_kind<'a>(
    events: &'a [BabyEvent],
    kind: EventKind,
) -> Option<&'a BabyEvent> {
    let mut latest: Option<&BabyEvent> = None;
    for event in events {
        if event.kind != kind {
            continue;
        }
        if latest.map_or(true, |current| is_later(event, current)) {
            latest = Some(event);
        }
    }
    latest
}

pub(crate) fn latest_sleep_event(events: &[BabyEvent]) -> Option<&BabyEvent> {
    let mut latest: Option<&BabyEvent> = None;
    for event in events {
        if !event.kind.is_sleep() {
            continue;
        }
        if latest.map_or(true, |current| is_later(event, current)) {
            latest = Some(event);
        }
    }
    latest
}

/// Build a snapshot against a fixed `today` (used for the age label), making
/// the derivation fully deterministic.
///
/// Total over its inputs: empty event lists, a missing profile, and malformed
/// metadata all produce a valid snapshot. Events must already be filtered to
/// the profile of interest. Single linear pass per event family.
pub fn build_dashboard_snapshot_on(
    profile: Option<&BabyProfile>,
    events: &[BabyEvent],
    today: NaiveDate,
) -> DashboardSnapshot {
    let last_feed = latest_event_of_kind(events, EventKind::Feed);
    let last_diaper = latest_event_of_kind(events, EventKind::Diaper);
    let last_sleep = latest_sleep_event(events);
    let is_sleeping = matches!(last_sleep, Some(event) if event.kind == EventKind::SleepStart);

    let baby_name = profile
        .map(|p| p.name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "Baby".to_string());

    let baby_age_label = profile
        .filter(|p| !p.birth_date.is_empty())
        .map(|p| age::age_label_on(&p.birth_date, today));

    let last_sleep_at = last_sleep.map(|event| event.timestamp);

    DashboardSnapshot {
        baby_name,
        baby_age_label,
        last_feed_at: last_feed.map(|event| event.timestamp),
        last_diaper_at: last_diaper.map(|event| event.timestamp),
        last_sleep_at,
        sleep_started_at: if is_sleeping { last_sleep_at } else { None },
        is_sleeping,
        sleep_status: match last_sleep {
            None => SleepStatus::NoData,
            Some(_) if is_sleeping => SleepStatus::Sleeping,
            Some(_) => SleepStatus::Awake,
        },
    }
}

/// Build a snapshot against the current local date.
pub fn build_dashboard_snapshot(
    profile: Option<&BabyProfile>,
    events: &[BabyEvent],
) -> DashboardSnapshot {
    build_dashboard_snapshot_on(profile, events, Local::now().date_naive())
}

/// Change-detection fingerprint: equal iff every snapshot field is equal.
/// Never persisted; only compared within one app session.
pub fn snapshot_sync_key(snapshot: &DashboardSnapshot) -> String {
    serde_json::to_string(snapshot).unwrap_or_default()
}
