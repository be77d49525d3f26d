use std::collections::HashMap;

use serde_json::Value;

use super::backend::{BackendError, BackendResult, DocumentId, DocumentStore, LocalCache};

/// In-process document store. `fail_reads` / `fail_writes` simulate an
/// unreachable backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: HashMap<DocumentId, Value>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Direct read that ignores the failure switches.
    pub fn peek(&self, id: &DocumentId) -> Option<&Value> {
        self.documents.get(id)
    }

    /// Direct write that ignores the failure switches.
    pub fn insert(&mut self, id: DocumentId, document: Value) {
        self.documents.insert(id, document);
    }

    fn check_read(&self) -> BackendResult<()> {
        if self.fail_reads {
            return Err(BackendError::Offline);
        }
        Ok(())
    }

    fn check_write(&self) -> BackendResult<()> {
        if self.fail_writes {
            return Err(BackendError::Offline);
        }
        Ok(())
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get(&self, id: &DocumentId) -> BackendResult<Option<Value>> {
        self.check_read()?;
        Ok(self.documents.get(id).cloned())
    }

    fn set(&mut self, id: &DocumentId, document: &Value) -> BackendResult<()> {
        self.check_write()?;
        self.documents.insert(id.clone(), document.clone());
        Ok(())
    }

    fn delete(&mut self, id: &DocumentId) -> BackendResult<()> {
        self.check_write()?;
        self.documents.remove(id);
        Ok(())
    }

    fn list_collection(&self, collection: &str) -> BackendResult<Vec<(String, Value)>> {
        self.check_read()?;
        Ok(self
            .documents
            .iter()
            .filter(|(id, _)| id.collection == collection)
            .map(|(id, document)| (id.id.clone(), document.clone()))
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
    pub fail_writes: bool,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl LocalCache for MemoryCache {
    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> BackendResult<()> {
        if self.fail_writes {
            return Err(BackendError::Offline);
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> BackendResult<()> {
        if self.fail_writes {
            return Err(BackendError::Offline);
        }
        self.entries.remove(key);
        Ok(())
    }
}
