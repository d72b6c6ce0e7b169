use anyhow::Result;
use tracing::debug;

use crate::domain::models::event::BabyEvent;
use crate::storage::traits::EventStorage;

use super::connection::{KvConnection, KEY_EVENTS};

/// Event log stored as a single JSON array document, newest insertion first.
#[derive(Clone)]
pub struct EventRepository {
    connection: KvConnection,
}

impl EventRepository {
    pub fn new(connection: KvConnection) -> Self {
        Self { connection }
    }

    fn load_all(&self) -> Result<Vec<BabyEvent>> {
        Ok(self
            .connection
            .get_json::<Vec<BabyEvent>>(KEY_EVENTS)?
            .unwrap_or_default())
    }
}

impl EventStorage for EventRepository {
    fn append_event(&self, event: &BabyEvent) -> Result<()> {
        let mut events = self.load_all()?;
        events.insert(0, event.clone());
        self.connection.set_json(KEY_EVENTS, &events)?;
        debug!(event_id = %event.id, "appended event to log");
        Ok(())
    }

    fn list_events(&self, baby_id: &str, limit: Option<usize>) -> Result<Vec<BabyEvent>> {
        let mut events: Vec<BabyEvent> = self
            .load_all()?
            .into_iter()
            .filter(|event| event.baby_id == baby_id)
            .collect();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if let Some(limit) = limit {
            events.truncate(limit);
        }
        Ok(events)
    }

    fn clear_events(&self) -> Result<()> {
        self.connection.remove(KEY_EVENTS)
    }
}
