//! # Domain Module
//!
//! Pure caregiving logic: models, snapshot derivation, label formatting and
//! the state service that ties them to storage and the glanceable sync.

pub mod age;
pub mod baby_service;
pub mod errors;
pub mod models;
pub mod snapshot;
pub mod time;

pub use baby_service::BabyService;
pub use errors::DomainError;
pub use models::{BabyEvent, BabyProfile, EventKind};
pub use snapshot::{build_dashboard_snapshot, build_dashboard_snapshot_on, snapshot_sync_key};
