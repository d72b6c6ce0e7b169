//! Birth-date parsing and age-label derivation.
//!
//! Accepts the two input shapes the onboarding flow has always allowed: ISO
//! `YYYY-MM-DD` and `M/D/YY` or `M/D/YYYY` (slash or dash separators). Both
//! are validated against the real calendar before being accepted.

use chrono::{Local, NaiveDate};

const DAYS_PER_MONTH: f64 = 30.44;

fn parse_component(part: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if part.len() < min_len || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn parse_birth_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // ISO form with fixed-width components.
    let parts: Vec<&str> = input.split('-').collect();
    if parts.len() == 3 && parts[0].len() == 4 {
        let year = parse_component(parts[0], 4, 4)?;
        let month = parse_component(parts[1], 2, 2)?;
        let day = parse_component(parts[2], 2, 2)?;
        return NaiveDate::from_ymd_opt(year as i32, month, day);
    }

    // Month-first form with a 2- or 4-digit year.
    let parts: Vec<&str> = input.split(['/', '-']).collect();
    if parts.len() == 3 {
        let month = parse_component(parts[0], 1, 2)?;
        let day = parse_component(parts[1], 1, 2)?;
        let raw_year = parse_component(parts[2], 2, 4)?;
        let year = if parts[2].len() == 2 {
            2000 + raw_year
        } else if parts[2].len() == 4 {
            raw_year
        } else {
            return None;
        };
        return NaiveDate::from_ymd_opt(year as i32, month, day);
    }

    None
}

/// Normalize user birth-date input to `YYYY-MM-DD`, or `None` when the input
/// is not a real calendar date in a supported format.
pub fn normalize_birth_date(input: &str) -> Option<String> {
    parse_birth_date(input).map(|date| date.format("%Y-%m-%d").to_string())
}

fn age_in_days(birth_date: &str, today: NaiveDate) -> Option<i64> {
    let birth = parse_birth_date(birth_date)?;
    Some((today - birth).num_days())
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {} old", count, unit)
    } else {
        format!("{} {}s old", count, unit)
    }
}

/// Age label for a fixed `today`, for deterministic derivation and tests.
pub fn age_label_on(birth_date: &str, today: NaiveDate) -> String {
    let days = match age_in_days(birth_date, today) {
        Some(days) => days,
        None => return "Age unavailable".to_string(),
    };

    if days < 0 {
        return "Not born yet".to_string();
    }
    if days == 0 {
        return "Newborn".to_string();
    }
    if days < 7 {
        return plural(days, "day");
    }

    let weeks = days / 7;
    let remainder_days = days % 7;
    if weeks < 8 {
        if remainder_days == 0 {
            return plural(weeks, "week");
        }
        return format!("{}w {}d old", weeks, remainder_days);
    }

    let months = (days as f64 / DAYS_PER_MONTH).floor() as i64;
    if months < 24 {
        return plural(months, "month");
    }
    plural(months / 12, "year")
}

/// Age label relative to the current local date.
pub fn age_label(birth_date: &str) -> String {
    age_label_on(birth_date, Local::now().date_naive())
}

/// Age in whole days clamped to zero, used to index daily guidance content.
pub fn day_index_on(birth_date: &str, today: NaiveDate) -> i64 {
    age_in_days(birth_date, today).unwrap_or(0).max(0)
}

/// Day index relative to the current local date.
pub fn day_index(birth_date: &str) -> i64 {
    day_index_on(birth_date, Local::now().date_naive())
}
