//! Durable Snapshot Persistence
//!
//! Keyed string storage plus the versioned JSON payload codec.
//! Only items and the filter survive a reload; the editing cursor never
//! hits storage.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::models::{Filter, TodoItem};

pub const STORAGE_KEY: &str = "neumorphic-todo:state";
pub const SCHEMA_VERSION: &str = "v1";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema version `{found}` does not match `{}`", SCHEMA_VERSION)]
    SchemaMismatch { found: String },
    #[error("invalid item: {0}")]
    InvalidItem(String),
}

/// Keyed get/set string storage
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// Browser storage when the page may use it, session memory otherwise
pub fn open_default() -> Box<dyn KeyValueStorage> {
    match BrowserStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("localStorage unavailable, todos will not survive a reload: {}", e);
            Box::new(MemoryStorage::new())
        }
    }
}

// ========================
// Browser localStorage
// ========================

/// `window.localStorage`, resolved once at startup
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Read(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota errors and private-mode denials both surface here
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

// ========================
// In-memory storage
// ========================

/// Session-only storage, used when the browser denies localStorage
///
/// Clones share the same map, so a test can keep a handle and inspect
/// what the store wrote.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.entries.borrow_mut().insert(key.to_string(), value.to_string());
        storage
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Read("read refused".to_string()));
        }
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write("quota exceeded".to_string()));
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ========================
// Payload codec
// ========================

/// The durable subset of store state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurableState {
    pub items: Vec<TodoItem>,
    pub filter: Filter,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PayloadOut<'a> {
    schema_version: &'a str,
    items: &'a [TodoItem],
    filter: Filter,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadIn {
    schema_version: Option<String>,
    #[serde(alias = "todos")]
    items: Vec<TodoItem>,
    #[serde(default, deserialize_with = "lenient_filter")]
    filter: Filter,
}

/// Unknown or non-string filter values read as `all`
fn lenient_filter<'de, D>(deserializer: D) -> Result<Filter, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok())
        .unwrap_or_default())
}

pub fn encode(state: &DurableState) -> Result<String, PayloadError> {
    let payload = PayloadOut {
        schema_version: SCHEMA_VERSION,
        items: &state.items,
        filter: state.filter,
    };
    Ok(serde_json::to_string(&payload)?)
}

pub fn decode(raw: &str) -> Result<DurableState, PayloadError> {
    let payload: PayloadIn = serde_json::from_str(raw)?;
    match payload.schema_version.as_deref() {
        Some(SCHEMA_VERSION) => {}
        other => {
            return Err(PayloadError::SchemaMismatch {
                found: other.unwrap_or("<missing>").to_string(),
            })
        }
    }
    check_items(&payload.items)?;
    Ok(DurableState {
        items: payload.items,
        filter: payload.filter,
    })
}

/// Ids must be unique and text non-blank, same as items built by the store
fn check_items(items: &[TodoItem]) -> Result<(), PayloadError> {
    let mut seen = HashSet::new();
    for item in items {
        if item.text.trim().is_empty() {
            return Err(PayloadError::InvalidItem(format!("`{}` has blank text", item.id)));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(PayloadError::InvalidItem(format!("duplicate id `{}`", item.id)));
        }
    }
    Ok(())
}

/// Read the durable state, falling back to the empty default on any failure
pub fn load(storage: &dyn KeyValueStorage) -> DurableState {
    let raw = match storage.get_item(STORAGE_KEY) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return DurableState::default(),
        Err(e) => {
            log::warn!("Unable to load todos; starting fresh: {}", e);
            return DurableState::default();
        }
    };

    match decode(&raw) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Unable to load todos; starting fresh: {}", e);
            DurableState::default()
        }
    }
}

/// Write the durable state under the fixed key
pub fn save(storage: &dyn KeyValueStorage, state: &DurableState) -> Result<(), StorageError> {
    let raw = encode(state).map_err(|e| StorageError::Write(e.to_string()))?;
    storage.set_item(STORAGE_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, text: &str, completed: bool) -> TodoItem {
        TodoItem {
            id: id.to_string(),
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn test_save_then_load_restores_items_and_filter() {
        let storage = MemoryStorage::new();
        let state = DurableState {
            items: vec![item("2", "B", true), item("1", "A", false)],
            filter: Filter::Completed,
        };

        save(&storage, &state).unwrap();
        assert_eq!(load(&storage), state);
    }

    #[test]
    fn test_payload_shape() {
        let state = DurableState {
            items: vec![item("1", "Buy milk", false)],
            filter: Filter::Active,
        };
        let value: serde_json::Value = serde_json::from_str(&encode(&state).unwrap()).unwrap();

        assert_eq!(value["schemaVersion"], "v1");
        assert_eq!(value["filter"], "active");
        assert_eq!(value["items"][0]["id"], "1");
        assert_eq!(value["items"][0]["text"], "Buy milk");
        assert_eq!(value["items"][0]["completed"], false);
        assert!(value.get("editingId").is_none());
    }

    #[test]
    fn test_missing_key_gives_default() {
        assert_eq!(load(&MemoryStorage::new()), DurableState::default());
    }

    #[test]
    fn test_old_schema_gives_default() {
        let raw = r#"{"schemaVersion":"v0","items":[{"id":"1","text":"A","completed":false}],"filter":"active"}"#;
        let storage = MemoryStorage::with_entry(STORAGE_KEY, raw);
        assert_eq!(load(&storage), DurableState::default());
        assert!(matches!(decode(raw), Err(PayloadError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_missing_schema_gives_default() {
        let raw = r#"{"items":[],"filter":"all"}"#;
        assert!(matches!(decode(raw), Err(PayloadError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_items_not_a_sequence_gives_default() {
        let raw = r#"{"schemaVersion":"v1","items":{"id":"1"},"filter":"all"}"#;
        let storage = MemoryStorage::with_entry(STORAGE_KEY, raw);
        assert_eq!(load(&storage), DurableState::default());
    }

    #[test]
    fn test_garbage_gives_default() {
        let storage = MemoryStorage::with_entry(STORAGE_KEY, "{not json");
        assert_eq!(load(&storage), DurableState::default());
    }

    #[test]
    fn test_read_failure_gives_default() {
        let storage = MemoryStorage::new();
        save(&storage, &DurableState { items: vec![item("1", "A", false)], filter: Filter::All }).unwrap();
        storage.set_fail_reads(true);
        assert_eq!(load(&storage), DurableState::default());
    }

    #[test]
    fn test_lenient_fields() {
        let raw = r#"{"schemaVersion":"v1","todos":[{"id":"1","text":"A"}],"filter":"bogus"}"#;
        let state = decode(raw).unwrap();
        assert_eq!(state.items, vec![item("1", "A", false)]);
        assert_eq!(state.filter, Filter::All);

        let raw = r#"{"schemaVersion":"v1","items":[]}"#;
        assert_eq!(decode(raw).unwrap().filter, Filter::All);
    }

    #[test]
    fn test_duplicate_ids_give_default() {
        let raw = r#"{"schemaVersion":"v1","items":[{"id":"1","text":"A"},{"id":"1","text":"B"}],"filter":"all"}"#;
        assert!(matches!(decode(raw), Err(PayloadError::InvalidItem(_))));
        let storage = MemoryStorage::with_entry(STORAGE_KEY, raw);
        assert_eq!(load(&storage), DurableState::default());
    }

    #[test]
    fn test_blank_text_gives_default() {
        let raw = r#"{"schemaVersion":"v1","items":[{"id":"1","text":"A"},{"id":"2","text":"   "}],"filter":"all"}"#;
        assert!(matches!(decode(raw), Err(PayloadError::InvalidItem(_))));
        let storage = MemoryStorage::with_entry(STORAGE_KEY, raw);
        assert_eq!(load(&storage), DurableState::default());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        let result = save(&storage, &DurableState::default());
        assert!(matches!(result, Err(StorageError::Write(_))));
        assert!(storage.raw(STORAGE_KEY).is_none());
    }
}
