//! # Storage Layer
//!
//! The underlying store is an opaque key-value blob store: one JSON document
//! per well-known key. Repositories expose typed operations over those blobs
//! and are created through the [`Connection`] factory trait so the domain
//! layer stays storage-agnostic.

pub mod kv;
pub mod traits;

pub use kv::KvConnection;
pub use traits::{
    ActivityHandleStorage, Connection, EventStorage, ProfileStorage, SettingsStorage,
};
