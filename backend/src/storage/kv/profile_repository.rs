use anyhow::Result;

use crate::domain::models::baby::BabyProfile;
use crate::storage::traits::ProfileStorage;

use super::connection::{KvConnection, KEY_BABY_PROFILE};

#[derive(Clone)]
pub struct ProfileRepository {
    connection: KvConnection,
}

impl ProfileRepository {
    pub fn new(connection: KvConnection) -> Self {
        Self { connection }
    }
}

impl ProfileStorage for ProfileRepository {
    fn store_profile(&self, profile: &BabyProfile) -> Result<()> {
        self.connection.set_json(KEY_BABY_PROFILE, profile)
    }

    fn get_profile(&self) -> Result<Option<BabyProfile>> {
        self.connection.get_json(KEY_BABY_PROFILE)
    }

    fn delete_profile(&self) -> Result<()> {
        self.connection.remove(KEY_BABY_PROFILE)
    }
}
