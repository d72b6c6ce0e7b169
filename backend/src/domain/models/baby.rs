use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain model representing the tracked baby.
///
/// Serialized with the same camelCase field names the app has always stored,
/// so existing key-value blobs remain readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BabyProfile {
    pub id: String,
    pub name: String,
    /// Normalized birth date in `YYYY-MM-DD` form.
    pub birth_date: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl BabyProfile {
    pub fn new(name: &str, birth_date: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            birth_date: birth_date.to_string(),
            created_at: Utc::now().timestamp_millis(),
        }
    }
}
