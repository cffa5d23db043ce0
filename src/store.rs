//! The key-value capability the game core depends on.
//!
//! The core never talks to a concrete database; it holds an `Arc<dyn Store>`
//! handed in at construction time. The contract is deliberately narrow: flat
//! named mappings with field-level get/set and a full snapshot. Two mappings
//! are in use, `"users"` (username to points) and `"games"` (username to the
//! encoded deck).
//!
//! [`MemoryStore`] implements the contract in process memory. Tests run
//! against it, and the server binary can select it with `--memory` to run
//! without a Redis instance.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

/// Opaque failure reported by a store backend.
///
/// "Field absent" is not an error; [`Store::get_field`] reports it as
/// `Ok(None)`. Anything else a backend can fail with collapses into this
/// type, and the caller decides what to do about it.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A flat named-mapping store.
///
/// Every operation round-trips through the store; the core keeps no copy of
/// its own, so the store is the single source of truth.
#[async_trait]
pub trait Store: Send + Sync {
    /// Upserts one field in the named mapping.
    async fn set_field(&self, map: &str, field: &str, value: &str) -> Result<(), StoreError>;

    /// Reads one field from the named mapping.
    ///
    /// Returns `Ok(None)` when the field is absent, keeping "no such key"
    /// distinguishable from a backend failure.
    async fn get_field(&self, map: &str, field: &str) -> Result<Option<String>, StoreError>;

    /// Returns every field of the named mapping.
    ///
    /// An unknown mapping name is an empty result, not an error.
    async fn get_all_fields(&self, map: &str) -> Result<HashMap<String, String>, StoreError>;
}

/// In-process [`Store`] over a mutex-guarded nested map.
///
/// The mutex guards individual get/set calls only. A read-then-write
/// sequence by a caller is still two separate critical sections, so the
/// interleavings a networked store would allow stay observable in tests.
#[derive(Default)]
pub struct MemoryStore {
    maps: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn set_field(&self, map: &str, field: &str, value: &str) -> Result<(), StoreError> {
        let mut maps = self.maps.lock().unwrap();
        maps.entry(map.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn get_field(&self, map: &str, field: &str) -> Result<Option<String>, StoreError> {
        let maps = self.maps.lock().unwrap();
        Ok(maps.get(map).and_then(|fields| fields.get(field)).cloned())
    }

    async fn get_all_fields(&self, map: &str) -> Result<HashMap<String, String>, StoreError> {
        // Clone the mapping to avoid holding the lock while the caller iterates.
        let maps = self.maps.lock().unwrap();
        Ok(maps.get(map).cloned().unwrap_or_default())
    }
}
