//! Key-value record store.
//!
//! Keys are path-like (`doctors/<license>`, `user/<id>`) and values are
//! whole JSON documents. `put` always overwrites.

use crate::value::JsonValue;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store file {} is not a JSON object", path.display())]
    Corrupted { path: PathBuf },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait RecordStore {
    fn put(&mut self, key: &str, value: JsonValue) -> Result<(), StoreError>;
    fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError>;
}

pub fn doctor_key(license: &str) -> String {
    format!("doctors/{}", license)
}

pub fn patient_key(id: &Uuid) -> String {
    format!("user/{}", id)
}

fn check_key(key: &str) -> Result<(), StoreError> {
    if key.trim().is_empty() || key.ends_with('/') {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, JsonValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn put(&mut self, key: &str, value: JsonValue) -> Result<(), StoreError> {
        check_key(key)?;
        self.records.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        check_key(key)?;
        Ok(self.records.get(key).cloned())
    }
}

/// Store persisted as a single JSON object mapping key to record.
///
/// The whole file is rewritten on every `put`, through a temporary file in
/// the same directory that is then renamed over the original.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    records: BTreeMap<String, JsonValue>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match std::fs::read_to_string(&path) {
            Ok(text) => parse_records(&path, &text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                BTreeMap::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!(path = %path.display(), records = records.len(), "opened store");
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn flush(&self) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let mut file =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        serde_json::to_writer_pretty(&mut file, &self.records)?;
        file.write_all(b"\n").map_err(|e| self.io_error(e))?;
        file.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        debug!(path = %self.path.display(), records = self.records.len(), "wrote store");
        Ok(())
    }
}

fn parse_records(
    path: &Path,
    text: &str,
) -> Result<BTreeMap<String, JsonValue>, StoreError> {
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    match JsonValue::decode(text).ok().and_then(JsonValue::into_object) {
        Some(entries) => Ok(entries.into_iter().collect()),
        None => Err(StoreError::Corrupted {
            path: path.to_path_buf(),
        }),
    }
}

impl RecordStore for FileStore {
    fn put(&mut self, key: &str, value: JsonValue) -> Result<(), StoreError> {
        check_key(key)?;
        let previous = self.records.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            match previous {
                Some(previous) => self.records.insert(key.to_string(), previous),
                None => self.records.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        check_key(key)?;
        Ok(self.records.get(key).cloned())
    }
}
