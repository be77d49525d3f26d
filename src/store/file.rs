use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::backend::{validate_key, BackendResult, DocumentId, DocumentStore, LocalCache};

const DOCUMENT_EXTENSION: &str = "json";

/// One pretty-printed JSON file per document at
/// `<root>/<collection>/<id>.json`.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    root: PathBuf,
}

impl FileDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> BackendResult<PathBuf> {
        validate_key(collection)?;
        Ok(self.root.join(collection))
    }

    fn document_path(&self, id: &DocumentId) -> BackendResult<PathBuf> {
        validate_key(&id.id)?;
        let mut path = self.collection_dir(&id.collection)?;
        path.push(format!("{}.{DOCUMENT_EXTENSION}", id.id));
        Ok(path)
    }
}

impl DocumentStore for FileDocumentStore {
    fn get(&self, id: &DocumentId) -> BackendResult<Option<Value>> {
        let path = self.document_path(id)?;
        match read_optional(&path)? {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }

    fn set(&mut self, id: &DocumentId, document: &Value) -> BackendResult<()> {
        let path = self.document_path(id)?;
        let contents = serde_json::to_string_pretty(document)?;
        write_replacing(&path, &contents)
    }

    fn delete(&mut self, id: &DocumentId) -> BackendResult<()> {
        let path = self.document_path(id)?;
        remove_if_present(&path)
    }

    fn list_collection(&self, collection: &str) -> BackendResult<Vec<(String, Value)>> {
        let dir = self.collection_dir(collection)?;
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut documents = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let contents = fs::read_to_string(&path)?;
            match serde_json::from_str(&contents) {
                Ok(document) => documents.push((id.to_string(), document)),
                Err(err) => {
                    tracing::warn!(path = %path.display(), ?err, "skipping unreadable document");
                }
            }
        }
        Ok(documents)
    }
}

/// One plain file per key under a cache directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> BackendResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

impl LocalCache for FileCache {
    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        read_optional(&self.key_path(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> BackendResult<()> {
        write_replacing(&self.key_path(key)?, value)
    }

    fn remove(&mut self, key: &str) -> BackendResult<()> {
        remove_if_present(&self.key_path(key)?)
    }
}

fn read_optional(path: &Path) -> BackendResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Writes a sibling `.tmp` file, then renames it over `path`.
fn write_replacing(path: &Path, contents: &str) -> BackendResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);
    fs::write(&staging, contents)?;
    fs::rename(&staging, path)?;
    Ok(())
}

fn remove_if_present(path: &Path) -> BackendResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn fixture_root(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "token-studio-{label}-{}-{nanos}",
            std::process::id()
        ))
    }

    fn with_temp_root<T>(label: &str, f: impl FnOnce(&Path) -> T) -> T {
        let root = fixture_root(label);
        let result = f(&root);
        let _ = fs::remove_dir_all(&root);
        result
    }

    #[test]
    fn documents_round_trip_as_pretty_json_files() {
        with_temp_root("doc-roundtrip", |root| {
            let mut store = FileDocumentStore::new(root);
            let id = DocumentId::new("tokens", "musio-design-tokens");
            let document = json!({ "colors": [ { "name": "ink", "value": "#000" } ] });

            store.set(&id, &document).unwrap();
            assert_eq!(store.get(&id).unwrap(), Some(document));

            let on_disk =
                fs::read_to_string(root.join("tokens").join("musio-design-tokens.json")).unwrap();
            assert!(on_disk.contains("\n  \"colors\""));
        });
    }

    #[test]
    fn missing_documents_read_as_none_and_delete_is_idempotent() {
        with_temp_root("doc-missing", |root| {
            let mut store = FileDocumentStore::new(root);
            let id = DocumentId::new("saved-configs", "config-1");
            assert_eq!(store.get(&id).unwrap(), None);
            store.delete(&id).unwrap();

            store.set(&id, &json!({ "name": "one" })).unwrap();
            store.delete(&id).unwrap();
            assert_eq!(store.get(&id).unwrap(), None);
        });
    }

    #[test]
    fn list_collection_skips_foreign_and_corrupt_files() {
        with_temp_root("doc-list", |root| {
            let mut store = FileDocumentStore::new(root);
            assert!(store.list_collection("saved-configs").unwrap().is_empty());

            store
                .set(&DocumentId::new("saved-configs", "a"), &json!({ "name": "A" }))
                .unwrap();
            store
                .set(&DocumentId::new("saved-configs", "b"), &json!({ "name": "B" }))
                .unwrap();
            let dir = root.join("saved-configs");
            fs::write(dir.join("broken.json"), "{ not json").unwrap();
            fs::write(dir.join("notes.txt"), "ignore me").unwrap();

            let mut listed = store.list_collection("saved-configs").unwrap();
            listed.sort_by(|left, right| left.0.cmp(&right.0));
            let ids: Vec<&str> = listed.iter().map(|(id, _)| id.as_str()).collect();
            assert_eq!(ids, vec!["a", "b"]);
        });
    }

    #[test]
    fn unsafe_ids_are_rejected() {
        with_temp_root("doc-keys", |root| {
            let store = FileDocumentStore::new(root);
            let escaped = DocumentId::new("tokens", "../outside");
            assert!(matches!(
                store.get(&escaped),
                Err(crate::store::BackendError::InvalidKey(_))
            ));
        });
    }

    #[test]
    fn cache_entries_round_trip_and_remove() {
        with_temp_root("cache", |root| {
            let mut cache = FileCache::new(root.join("local-cache"));
            assert_eq!(cache.get("musio-tokens").unwrap(), None);
            cache.set("musio-tokens", "{\"colors\":[]}").unwrap();
            assert_eq!(
                cache.get("musio-tokens").unwrap().as_deref(),
                Some("{\"colors\":[]}")
            );
            cache.remove("musio-tokens").unwrap();
            cache.remove("musio-tokens").unwrap();
            assert_eq!(cache.get("musio-tokens").unwrap(), None);
        });
    }
}
