use thiserror::Error;

/// Validation and precondition failures surfaced to the UI layer.
///
/// External glanceable-sync failures never appear here; those are logged and
/// retried on the next state change instead of being raised to callers.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid birth date: {0:?}")]
    InvalidBirthDate(String),

    #[error("baby name cannot be empty")]
    EmptyName,

    #[error("no baby profile exists yet")]
    ProfileMissing,
}
