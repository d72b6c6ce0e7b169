use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::storage::traits::Connection;

use super::event_repository::EventRepository;
use super::profile_repository::ProfileRepository;
use super::settings_repository::SettingsRepository;

/// Well-known document keys, matching the names the app has always stored
/// under. A full reset removes each of these through its repository.
pub const KEY_BABY_PROFILE: &str = "baby_profile";
pub const KEY_EVENTS: &str = "events";
pub const KEY_ONBOARDING_DONE: &str = "onboarding_done";
pub const KEY_SLEEP_ACTIVITY_ID: &str = "sleep_live_activity_id";

/// JSON-document-per-key blob store rooted at a data directory.
///
/// Writes go through a temp file and an atomic rename so a crash mid-write
/// never leaves a torn document behind.
#[derive(Clone)]
pub struct KvConnection {
    base_directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl KvConnection {
    pub fn new(base_directory: impl Into<PathBuf>) -> Result<Self> {
        let base_directory = base_directory.into();
        fs::create_dir_all(&base_directory).with_context(|| {
            format!("failed to create data directory {}", base_directory.display())
        })?;
        Ok(Self {
            base_directory,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", key))
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("failed to read key {}", key)),
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock_writes();
        let path = self.key_path(key);
        let tmp_path = self.base_directory.join(format!("{}.json.tmp", key));
        fs::write(&tmp_path, value).with_context(|| format!("failed to write key {}", key))?;
        fs::rename(&tmp_path, &path).with_context(|| format!("failed to commit key {}", key))?;
        debug!(key, "stored key-value document");
        Ok(())
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("failed to parse stored document {}", key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize document {}", key))?;
        self.set_raw(key, &raw)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock_writes();
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("failed to remove key {}", key)),
        }
    }
}

impl Connection for KvConnection {
    type EventRepository = EventRepository;
    type ProfileRepository = ProfileRepository;
    type SettingsRepository = SettingsRepository;

    fn create_event_repository(&self) -> EventRepository {
        EventRepository::new(self.clone())
    }

    fn create_profile_repository(&self) -> ProfileRepository {
        ProfileRepository::new(self.clone())
    }

    fn create_settings_repository(&self) -> SettingsRepository {
        SettingsRepository::new(self.clone())
    }
}
