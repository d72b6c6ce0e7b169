use anyhow::Result;

use crate::storage::traits::{ActivityHandleStorage, SettingsStorage};

use super::connection::{KvConnection, KEY_ONBOARDING_DONE, KEY_SLEEP_ACTIVITY_ID};

#[derive(Clone)]
pub struct SettingsRepository {
    connection: KvConnection,
}

impl SettingsRepository {
    pub fn new(connection: KvConnection) -> Self {
        Self { connection }
    }
}

impl SettingsStorage for SettingsRepository {
    fn set_onboarding_done(&self, done: bool) -> Result<()> {
        self.connection.set_json(KEY_ONBOARDING_DONE, &done)
    }

    fn is_onboarding_done(&self) -> Result<bool> {
        Ok(self
            .connection
            .get_json::<bool>(KEY_ONBOARDING_DONE)?
            .unwrap_or(false))
    }

    fn clear(&self) -> Result<()> {
        self.connection.remove(KEY_ONBOARDING_DONE)?;
        self.connection.remove(KEY_SLEEP_ACTIVITY_ID)
    }
}

impl ActivityHandleStorage for SettingsRepository {
    fn get_handle(&self) -> Result<Option<String>> {
        self.connection.get_json(KEY_SLEEP_ACTIVITY_ID)
    }

    fn set_handle(&self, activity_id: &str) -> Result<()> {
        self.connection
            .set_json(KEY_SLEEP_ACTIVITY_ID, &activity_id.to_string())
    }

    fn clear_handle(&self) -> Result<()> {
        self.connection.remove(KEY_SLEEP_ACTIVITY_ID)
    }
}
