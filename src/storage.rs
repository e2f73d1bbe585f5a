//! The persistence collaborator used when the REST backend is replaced by a
//! local store, plus the two bundled implementations.
//!
//! Records are stored in wire form, exactly as a backend would hand them
//! over; the local facades run them through [crate::wire] on every read so
//! the caller sees the same canonical rows either way.

use std::{collections::HashMap, fs, path::PathBuf};

use serde_json::Value;

/// The key the local backend keeps account records under.
pub const ACCOUNTS_KEY: &str = "bb.accounts.v1";
/// The key the local backend keeps transaction records under.
pub const TRANSACTIONS_KEY: &str = "bb.transactions.v1";

/// An error reported by the record store collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record store failure: {0}")]
pub struct StorageError(pub String);

/// A keyed collection of raw records.
///
/// This mirrors the browser's localStorage: `load` returns whatever was last
/// saved under `key`, or an empty list for a key that was never written.
pub trait RecordStore {
    /// Load the records stored under `key`.
    fn load(&self, key: &str) -> Result<Vec<Value>, StorageError>;

    /// Replace the records stored under `key`.
    fn save(&mut self, key: &str, records: &[Value]) -> Result<(), StorageError>;
}

/// An in-memory record store. Contents are lost on drop.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<String, Vec<Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Vec<Value>, StorageError> {
        Ok(self.records.get(key).cloned().unwrap_or_default())
    }

    fn save(&mut self, key: &str, records: &[Value]) -> Result<(), StorageError> {
        self.records.insert(key.to_owned(), records.to_vec());
        Ok(())
    }
}

/// A record store persisted as a single JSON document on disk.
///
/// The whole document is re-read on every load and re-written on every save;
/// collections here hold at most a few hundred records.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`. The file is created on
    /// the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> Result<HashMap<String, Vec<Value>>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let text = fs::read_to_string(&self.path).map_err(|error| {
            StorageError(format!("could not read {}: {error}", self.path.display()))
        })?;

        serde_json::from_str(&text).map_err(|error| {
            StorageError(format!("could not parse {}: {error}", self.path.display()))
        })
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Vec<Value>, StorageError> {
        let mut document = self.read_document()?;

        Ok(document.remove(key).unwrap_or_default())
    }

    fn save(&mut self, key: &str, records: &[Value]) -> Result<(), StorageError> {
        let mut document = self.read_document()?;
        document.insert(key.to_owned(), records.to_vec());

        let text = serde_json::to_string_pretty(&document)
            .map_err(|error| StorageError(format!("could not serialize the store: {error}")))?;

        fs::write(&self.path, text).map_err(|error| {
            StorageError(format!("could not write {}: {error}", self.path.display()))
        })
    }
}
