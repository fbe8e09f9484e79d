//! # Preference Store
//!
//! On-device UI preferences under namespaced keys.
//!
//! ## Storage Backends
//!
//! - `InMemory`: a `BTreeMap`, volatile.
//! - `Persistent`: a redb file. Values written here are rehydrated the next
//!   time the same file is opened.
//!
//! Values are postcard-encoded regardless of backend, so both backends
//! behave identically for typed reads.

use crate::primitives::{MAX_PREFERENCE_KEY_LENGTH, SIDEBAR_COLLAPSED_KEY, namespaced_key};
use crate::VeridashError;
use redb::{Database, ReadableDatabase, TableDefinition};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::path::Path;

/// Table for preferences: namespaced key -> postcard bytes
const PREFERENCES: TableDefinition<&str, &[u8]> = TableDefinition::new("preferences");

fn storage_err(e: impl std::fmt::Display) -> VeridashError {
    VeridashError::StorageError(e.to_string())
}

/// Where preference values live.
pub enum PreferenceBackend {
    InMemory(BTreeMap<String, Vec<u8>>),
    Persistent(Database),
}

impl std::fmt::Debug for PreferenceBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InMemory(map) => f.debug_tuple("InMemory").field(&map.len()).finish(),
            Self::Persistent(_) => f.debug_tuple("Persistent").finish_non_exhaustive(),
        }
    }
}

impl Default for PreferenceBackend {
    fn default() -> Self {
        Self::InMemory(BTreeMap::new())
    }
}

/// Typed access to namespaced preferences.
#[derive(Debug, Default)]
pub struct PreferenceStore {
    backend: PreferenceBackend,
}

impl PreferenceStore {
    /// Create a volatile store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open or create a redb-backed store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VeridashError> {
        let db = Database::create(path.as_ref()).map_err(storage_err)?;

        // Make sure the table exists so first reads don't fail.
        let write_txn = db.begin_write().map_err(storage_err)?;
        {
            let _ = write_txn.open_table(PREFERENCES).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;

        Ok(Self {
            backend: PreferenceBackend::Persistent(db),
        })
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, PreferenceBackend::Persistent(_))
    }

    fn full_key(key: &str) -> Result<String, VeridashError> {
        let full = namespaced_key(key);
        if key.is_empty() || full.len() > MAX_PREFERENCE_KEY_LENGTH {
            return Err(VeridashError::StorageError(format!(
                "Invalid preference key {:?}",
                key
            )));
        }
        Ok(full)
    }

    // =========================================================================
    // RAW ACCESS
    // =========================================================================

    fn get_raw(&self, full_key: &str) -> Result<Option<Vec<u8>>, VeridashError> {
        match &self.backend {
            PreferenceBackend::InMemory(map) => Ok(map.get(full_key).cloned()),
            PreferenceBackend::Persistent(db) => {
                let read_txn = db.begin_read().map_err(storage_err)?;
                let table = read_txn.open_table(PREFERENCES).map_err(storage_err)?;
                let value = table.get(full_key).map_err(storage_err)?;
                Ok(value.map(|v| v.value().to_vec()))
            }
        }
    }

    fn set_raw(&mut self, full_key: String, bytes: Vec<u8>) -> Result<(), VeridashError> {
        match &mut self.backend {
            PreferenceBackend::InMemory(map) => {
                map.insert(full_key, bytes);
                Ok(())
            }
            PreferenceBackend::Persistent(db) => {
                let write_txn = db.begin_write().map_err(storage_err)?;
                {
                    let mut table = write_txn.open_table(PREFERENCES).map_err(storage_err)?;
                    table
                        .insert(full_key.as_str(), bytes.as_slice())
                        .map_err(storage_err)?;
                }
                write_txn.commit().map_err(storage_err)
            }
        }
    }

    // =========================================================================
    // TYPED ACCESS
    // =========================================================================

    /// Read a preference. `None` when it was never set.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, VeridashError> {
        let full = Self::full_key(key)?;
        match self.get_raw(&full)? {
            Some(bytes) => postcard::from_bytes(&bytes)
                .map(Some)
                .map_err(|e| VeridashError::SerializationError(format!("{}: {}", full, e))),
            None => Ok(None),
        }
    }

    /// Write a preference.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), VeridashError> {
        let full = Self::full_key(key)?;
        let bytes = postcard::to_allocvec(value)
            .map_err(|e| VeridashError::SerializationError(e.to_string()))?;
        self.set_raw(full, bytes)
    }

    // =========================================================================
    // SIDEBAR
    // =========================================================================

    /// Whether the sidebar is collapsed. Defaults to expanded.
    pub fn sidebar_collapsed(&self) -> Result<bool, VeridashError> {
        Ok(self.get(SIDEBAR_COLLAPSED_KEY)?.unwrap_or(false))
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) -> Result<(), VeridashError> {
        self.set(SIDEBAR_COLLAPSED_KEY, &collapsed)
    }

    /// Flip the sidebar flag and return the new value.
    pub fn toggle_sidebar(&mut self) -> Result<bool, VeridashError> {
        let next = !self.sidebar_collapsed()?;
        self.set_sidebar_collapsed(next)?;
        Ok(next)
    }
}

// =============================================================================
// TESTS
// =============================================================================
