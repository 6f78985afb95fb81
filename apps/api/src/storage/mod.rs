//! Persistence for history and progress records.
//!
//! Records live in a pluggable key-value store as JSON strings. [`Storage`] wraps the
//! backend with a write lock that serialises read-modify-write cycles and a broadcast
//! channel that announces every successful write.

pub mod file;
pub mod history;
pub mod memory;

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

pub use file::FileStore;
pub use memory::MemoryStore;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to persist record: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value backend. Implementations must be safe to share across handlers.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Keys are plain identifiers so the file backend can map them to file names.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Announced after a record has been written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    HistoryChanged { id: String },
    StepsChanged,
    TestChecklistChanged,
    SubmissionChanged,
}

pub struct Storage {
    store: Box<dyn KeyValueStore>,
    write_lock: Mutex<()>,
    events: broadcast::Sender<StoreEvent>,
    history_cap: usize,
}

impl Storage {
    pub fn new(store: Box<dyn KeyValueStore>, history_cap: usize) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            write_lock: Mutex::new(()),
            events,
            history_cap,
        }
    }

    pub fn in_memory(history_cap: usize) -> Self {
        Self::new(Box::new(MemoryStore::default()), history_cap)
    }

    pub fn history_cap(&self) -> usize {
        self.history_cap
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Held for the whole of a read-modify-write cycle. Never hold across an `.await`.
    pub(crate) fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn read_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.store.get(key)
    }

    /// Reads a JSON record. Unparseable contents are treated as absent.
    pub(crate) fn read_json(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, "Ignoring unreadable record: {e}");
                Ok(None)
            }
        }
    }

    /// Serialises `value`, writes it under `key` and publishes `event`.
    pub(crate) fn write_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        event: StoreEvent,
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)?;
        debug!(key, bytes = raw.len(), "Record written");
        self.publish(event);
        Ok(())
    }

    fn publish(&self, event: StoreEvent) {
        // Err only means nobody is listening.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("prp_analysis_history_v1").is_ok());
        assert!(validate_key("a-b").is_ok());
        assert!(matches!(validate_key(""), Err(StoreError::InvalidKey(_))));
        assert!(matches!(validate_key("../etc"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(validate_key("a.json"), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_write_publishes_event() {
        let storage = Storage::in_memory(50);
        let mut rx = storage.subscribe();
        storage
            .write_json("k", &json!({"a": 1}), StoreEvent::StepsChanged)
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::StepsChanged);
        assert_eq!(storage.read_json("k").unwrap(), Some(json!({"a": 1})));
    }

    #[test]
    fn test_write_without_subscribers_is_ok() {
        let storage = Storage::in_memory(50);
        assert!(storage
            .write_json("k", &json!([]), StoreEvent::SubmissionChanged)
            .is_ok());
    }

    #[test]
    fn test_unparseable_record_reads_as_absent() {
        let storage = Storage::in_memory(50);
        storage.store.set("k", "{not json").unwrap();
        assert_eq!(storage.read_json("k").unwrap(), None);
        assert_eq!(storage.read_raw("k").unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let value = serde_json::to_value(StoreEvent::HistoryChanged { id: "x".into() }).unwrap();
        assert_eq!(value, json!({"type": "history_changed", "id": "x"}));
        let value = serde_json::to_value(StoreEvent::TestChecklistChanged).unwrap();
        assert_eq!(value, json!({"type": "test_checklist_changed"}));
    }
}
