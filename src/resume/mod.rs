//! Resume point persistence for walkthroughs.
//!
//! A tour that triggers a full page transition loses its in-memory state.
//! This module persists the single integer needed to survive that: the
//! absolute index the tour should resume at, stored under the tour's fixed
//! key through an opaque key-value port. Last write wins; the value is the
//! stringified index and nothing else.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

pub mod error;

pub use error::StoreError;

/// Opaque key-value side channel supplied by the host.
///
/// The engine uses exactly one key per tour. Reads that find nothing return
/// `None`; writes may fail and the failure is the caller's to degrade.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw stored value for a key.
    fn read(&self, key: &str) -> Option<String>;

    /// Write the raw value for a key, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process [`KeyValueStore`] backed by a hash map.
///
/// Suitable for tests and for hosts that bridge to their own storage
/// elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed access to the single persisted resume index of one tour.
///
/// # Example
///
/// ```rust
/// use guidepost::resume::{MemoryStore, ResumeSlot};
/// use std::sync::Arc;
///
/// let store = Arc::new(MemoryStore::new());
/// let slot = ResumeSlot::new(store, "virtual-study-tour");
///
/// assert_eq!(slot.load(), None);
/// slot.save(3).unwrap();
/// assert_eq!(slot.load(), Some(3));
/// ```
#[derive(Clone)]
pub struct ResumeSlot {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl ResumeSlot {
    /// Bind a slot to a store under the tour's fixed key.
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        ResumeSlot {
            store,
            key: key.into(),
        }
    }

    /// The key this slot persists under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted resume index, if any.
    ///
    /// A stored value that does not parse as an index is discarded with a
    /// warning rather than failing tour initialization.
    pub fn load(&self) -> Option<usize> {
        let raw = self.store.read(&self.key)?;
        match serde_json::from_str(&raw) {
            Ok(index) => Some(index),
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "discarding unreadable resume point");
                None
            }
        }
    }

    /// Persist the resume index, overwriting any previous value.
    pub fn save(&self, index: usize) -> Result<(), StoreError> {
        let value = serde_json::to_string(&index)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;
        self.store.write(&self.key, &value)
    }

    /// Persist the resume index, degrading to a warning when the backend
    /// rejects the write. Used from entry behaviors, where no caller can
    /// observe a `Result` and a failed write must not abort the tour.
    pub fn save_or_warn(&self, index: usize) {
        if let Err(err) = self.save(index) {
            tracing::warn!(key = %self.key, index, %err, "resume point not persisted");
        }
    }
}

impl std::fmt::Debug for ResumeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeSlot")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
