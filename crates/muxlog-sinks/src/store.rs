//! Configuration stores over the canonical JSON blob.
//!
//! The multiplexer hands the store an opaque object-shaped text blob and
//! reads individual keys back through `get_string`/`get_long`. Both
//! stores here parse the blob eagerly; `write_config` persists the
//! staged text verbatim so the canonical key order survives a round
//! trip.

use muxlog_core::ConfigStore;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced when opening a store. Load failures are reported to
/// the caller at startup; they never reach the logging path.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config blob is not a JSON object")]
    NotAnObject,
}

/// In-memory [`ConfigStore`]. `write_config` only counts persistence
/// requests — useful for tests and for hosts without writable storage.
#[derive(Debug)]
pub struct MemoryStore {
    object: Map<String, Value>,
    blob: String,
    writes: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            object: Map::new(),
            blob: "{}".to_string(),
            writes: 0,
        }
    }

    pub fn from_blob(blob: &str) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_str(blob)?;
        let object = value.as_object().cloned().ok_or(StoreError::NotAnObject)?;
        Ok(Self {
            object,
            blob: blob.to_string(),
            writes: 0,
        })
    }

    /// The staged canonical blob, verbatim.
    pub fn blob(&self) -> &str {
        &self.blob
    }

    /// Number of `write_config` calls seen.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for MemoryStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.object.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => default.to_string(),
        }
    }

    fn get_long(&self, key: &str, default: i64) -> i64 {
        match self.object.get(key) {
            // Malformed numerics read as 0, not as the default.
            Some(Value::String(s)) => s.parse().unwrap_or(0),
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
            Some(_) => 0,
            None => default,
        }
    }

    fn set_config_data(&mut self, canonical: &str) {
        self.blob = canonical.to_string();
        self.object = serde_json::from_str::<Value>(canonical)
            .ok()
            .and_then(|v| v.as_object().cloned())
            .unwrap_or_default();
    }

    fn write_config(&mut self) {
        self.writes += 1;
    }
}

/// File-backed [`ConfigStore`]. Opens (creating an empty blob if the
/// file is missing) and rewrites the whole file on `write_config`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    memory: MemoryStore,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, "{}")?;
        }
        let blob = std::fs::read_to_string(&path)?;
        Ok(Self {
            memory: MemoryStore::from_blob(&blob)?,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.memory.get_string(key, default)
    }

    fn get_long(&self, key: &str, default: i64) -> i64 {
        self.memory.get_long(key, default)
    }

    fn set_config_data(&mut self, canonical: &str) {
        self.memory.set_config_data(canonical);
    }

    fn write_config(&mut self) {
        self.memory.write_config();
        if let Err(err) = std::fs::write(&self.path, self.memory.blob()) {
            tracing::warn!(path = %self.path.display(), %err, "failed to persist config");
        }
    }
}
