//! Relative-time and duration labels shared by the timeline and the
//! glanceable surfaces. All functions take an explicit `now` so derivations
//! stay deterministic under test.

use chrono::{Local, TimeZone, Timelike};

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// "Just now", "12m ago", "3h ago", "Yesterday", "4d ago".
pub fn relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms - timestamp_ms;
    let minutes = diff / MS_PER_MINUTE;
    let hours = diff / MS_PER_HOUR;
    let days = diff / MS_PER_DAY;

    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    if days == 1 {
        return "Yesterday".to_string();
    }
    format!("{}d ago", days)
}

/// Compact variant for tight widget slots: "Now", "12m", "3h", "4d".
pub fn compact_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms - timestamp_ms;
    let minutes = diff / MS_PER_MINUTE;
    let hours = diff / MS_PER_HOUR;
    let days = diff / MS_PER_DAY;

    if minutes < 1 {
        return "Now".to_string();
    }
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    if hours < 24 {
        return format!("{}h", hours);
    }
    if days <= 1 {
        return "1d".to_string();
    }
    format!("{}d", days)
}

/// Elapsed sleep duration: "2h 15m" or "45m".
pub fn sleep_duration(start_ms: i64, now_ms: i64) -> String {
    let diff = (now_ms - start_ms).max(0);
    let hours = diff / MS_PER_HOUR;
    let minutes = (diff % MS_PER_HOUR) / MS_PER_MINUTE;
    if hours > 0 {
        return format!("{}h {}m", hours, minutes);
    }
    format!("{}m", minutes)
}

/// Local wall-clock label in "h:mm AM/PM" form, or "--" when the timestamp
/// cannot be mapped to a local time.
pub fn clock_label(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).earliest() {
        Some(dt) => {
            let (is_pm, hour) = dt.hour12();
            format!(
                "{}:{:02} {}",
                hour,
                dt.minute(),
                if is_pm { "PM" } else { "AM" }
            )
        }
        None => "--".to_string(),
    }
}
