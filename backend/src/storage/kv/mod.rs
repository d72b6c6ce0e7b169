//! # Key-Value Storage Module
//!
//! File-backed implementation of the storage traits: one JSON document per
//! well-known key under a data directory, written atomically. This is the
//! only storage backend the app ships; the traits exist so tests and future
//! backends can substitute their own.

pub mod connection;
pub mod event_repository;
pub mod profile_repository;
pub mod settings_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::KvConnection;
pub use event_repository::EventRepository;
pub use profile_repository::ProfileRepository;
pub use settings_repository::SettingsRepository;
