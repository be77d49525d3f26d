use std::fmt;
use std::io;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid document json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid document key: {0:?}")]
    InvalidKey(String),
    #[error("backend offline")]
    Offline,
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// `(collection, id)` address of one stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId {
    pub collection: String,
    pub id: String,
}

impl DocumentId {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Remote key-value document store holding JSON documents.
pub trait DocumentStore {
    /// `Ok(None)` when the document does not exist.
    fn get(&self, id: &DocumentId) -> BackendResult<Option<Value>>;
    fn set(&mut self, id: &DocumentId, document: &Value) -> BackendResult<()>;
    /// Deleting a missing document succeeds.
    fn delete(&mut self, id: &DocumentId) -> BackendResult<()>;
    /// Every document in `collection` as `(id, document)` pairs, in no
    /// particular order.
    fn list_collection(&self, collection: &str) -> BackendResult<Vec<(String, Value)>>;
}

/// Small string cache local to the host, mirroring the working tree.
pub trait LocalCache {
    fn get(&self, key: &str) -> BackendResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> BackendResult<()>;
    fn remove(&mut self, key: &str) -> BackendResult<()>;
}

/// Epoch-millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

/// Rejects keys that could escape their directory when mapped to a path.
pub(crate) fn validate_key(key: &str) -> BackendResult<()> {
    let invalid = key.is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\', '\0']);
    if invalid {
        return Err(BackendError::InvalidKey(key.to_string()));
    }
    Ok(())
}
