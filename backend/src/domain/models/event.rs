use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of caregiving event being logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Feed,
    Diaper,
    SleepStart,
    SleepEnd,
    Mood,
}

impl EventKind {
    /// Whether this event participates in sleep-state derivation.
    pub fn is_sleep(&self) -> bool {
        matches!(self, EventKind::SleepStart | EventKind::SleepEnd)
    }

    /// Short label for timeline rendering.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Feed => "Feed",
            EventKind::Diaper => "Diaper",
            EventKind::SleepStart => "Sleep",
            EventKind::SleepEnd => "Wake",
            EventKind::Mood => "Mood",
        }
    }
}

/// Immutable caregiving fact, created once by the logging mutator and never
/// updated. Events are ordered by `timestamp` with `seq` breaking ties, so
/// two events logged within the same millisecond still have a well-defined
/// order: the most recently logged one wins. The stored log is in insertion
/// order; consumers must scan rather than relying on storage order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BabyEvent {
    pub id: String,
    pub baby_id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Monotonic insertion counter within the log. Documents written before
    /// this field existed read back as 0.
    #[serde(default)]
    pub seq: i64,
    /// Kind-specific payload, kept as opaque JSON. Snapshot derivation never
    /// inspects it; only `summary` parses it, and tolerates garbage.
    pub metadata_json: String,
}

impl BabyEvent {
    pub fn new(
        baby_id: &str,
        kind: EventKind,
        timestamp: i64,
        seq: i64,
        metadata_json: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            baby_id: baby_id.to_string(),
            kind,
            timestamp,
            seq,
            metadata_json: metadata_json.to_string(),
        }
    }

    /// Human-readable one-liner for the event, derived from its metadata.
    /// Returns an empty string when the metadata cannot be parsed.
    pub fn summary(&self) -> String {
        match self.kind {
            EventKind::Feed => {
                match serde_json::from_str::<FeedMetadata>(&self.metadata_json) {
                    Ok(meta) => {
                        let label = meta.kind.label();
                        match meta.amount_ml {
                            Some(ml) => format!("{} ({}ml)", label, ml),
                            None => label.to_string(),
                        }
                    }
                    Err(_) => String::new(),
                }
            }
            EventKind::Diaper => {
                match serde_json::from_str::<DiaperMetadata>(&self.metadata_json) {
                    Ok(meta) => meta.kind.label().to_string(),
                    Err(_) => String::new(),
                }
            }
            EventKind::SleepStart => "Fell asleep".to_string(),
            EventKind::SleepEnd => "Woke up".to_string(),
            EventKind::Mood => {
                match serde_json::from_str::<MoodMetadata>(&self.metadata_json) {
                    Ok(meta) => meta.mood.label().to_string(),
                    Err(_) => String::new(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    BreastMilk,
    Formula,
    Solid,
}

impl FeedKind {
    pub fn label(&self) -> &'static str {
        match self {
            FeedKind::BreastMilk => "Breast milk",
            FeedKind::Formula => "Formula",
            FeedKind::Solid => "Solid food",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMetadata {
    #[serde(rename = "type")]
    pub kind: FeedKind,
    pub amount_ml: Option<u32>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiaperKind {
    Wet,
    Dirty,
    Both,
}

impl DiaperKind {
    pub fn label(&self) -> &'static str {
        match self {
            DiaperKind::Wet => "Wet",
            DiaperKind::Dirty => "Dirty",
            DiaperKind::Both => "Wet & dirty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaperMetadata {
    pub kind: DiaperKind,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Fussy,
    Crying,
    Calm,
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Fussy => "Fussy",
            Mood::Crying => "Crying",
            Mood::Calm => "Calm",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodMetadata {
    pub mood: Mood,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepMetadata {
    pub note: Option<String>,
}
