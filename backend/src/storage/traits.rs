//! Storage abstraction traits.
//!
//! The domain layer only ever talks to these traits, so the key-value blob
//! store can be swapped for any other backend without touching domain logic.
//! All operations are synchronous; the primary logging path never waits on
//! anything but the local store.

use anyhow::Result;

use crate::domain::models::baby::BabyProfile;
use crate::domain::models::event::BabyEvent;

/// Append-only caregiving event log.
pub trait EventStorage: Send + Sync {
    /// Append a new event to the log.
    fn append_event(&self, event: &BabyEvent) -> Result<()>;

    /// List events for a profile, most-recent-first as a convenience, capped
    /// at `limit` when given. Callers deriving state must still scan by
    /// timestamp rather than trusting the returned order.
    fn list_events(&self, baby_id: &str, limit: Option<usize>) -> Result<Vec<BabyEvent>>;

    /// Remove every stored event. Only used by full data reset.
    fn clear_events(&self) -> Result<()>;
}

/// Single-profile store for the tracked baby.
pub trait ProfileStorage: Send + Sync {
    fn store_profile(&self, profile: &BabyProfile) -> Result<()>;

    fn get_profile(&self) -> Result<Option<BabyProfile>>;

    fn delete_profile(&self) -> Result<()>;
}

/// App-level settings flags.
pub trait SettingsStorage: Send + Sync {
    fn set_onboarding_done(&self, done: bool) -> Result<()>;

    fn is_onboarding_done(&self) -> Result<bool>;

    /// Remove all settings, including the persisted live-activity handle.
    fn clear(&self) -> Result<()>;
}

/// Persistence for the externally-assigned sleep live-activity identifier,
/// so updates can target the same activity instance across process restarts.
pub trait ActivityHandleStorage: Send + Sync {
    fn get_handle(&self) -> Result<Option<String>>;

    fn set_handle(&self, activity_id: &str) -> Result<()>;

    fn clear_handle(&self) -> Result<()>;
}

/// Factory for storage repositories, abstracting the concrete backing store.
pub trait Connection: Send + Sync + Clone + 'static {
    type EventRepository: EventStorage + Clone + 'static;
    type ProfileRepository: ProfileStorage + Clone + 'static;
    type SettingsRepository: SettingsStorage + ActivityHandleStorage + Clone + 'static;

    fn create_event_repository(&self) -> Self::EventRepository;

    fn create_profile_repository(&self) -> Self::ProfileRepository;

    fn create_settings_repository(&self) -> Self::SettingsRepository;
}
