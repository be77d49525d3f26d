//! Working-tree lifecycle: load, edit, save and named snapshots.
//!
//! `TokenStore` owns the canonical and working trees. Bytes live behind the
//! injected [`DocumentStore`] and [`LocalCache`]; every operation replaces the
//! working tree wholesale and the last write wins.

mod backend;
mod file;
mod memory;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::field::FieldValue;
use crate::tokens::{
    canonical_tokens, merge, slugify_color_name, ColorToken, DesignTokens, DesignTokensPatch,
    TokenError, TokenMutation, TokenPath, TokenResult,
};

pub use backend::{
    BackendError, BackendResult, Clock, DocumentId, DocumentStore, LocalCache, SystemClock,
};
pub use file::{FileCache, FileDocumentStore};
pub use memory::{MemoryCache, MemoryDocumentStore};

pub const TOKENS_COLLECTION: &str = "tokens";
pub const TOKENS_DOCUMENT: &str = "musio-design-tokens";
pub const CONFIGS_COLLECTION: &str = "saved-configs";
pub const CACHE_KEY: &str = "musio-tokens";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store unavailable during {operation}: {source}")]
    Unavailable {
        operation: &'static str,
        #[source]
        source: BackendError,
    },
    #[error("saved config not found: {id}")]
    NotFound { id: String },
    #[error("failed to encode tokens: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Where `load` found the working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Remote,
    LocalCache,
    Canonical,
}

/// Named snapshot of a full token tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedConfig {
    pub id: String,
    pub name: String,
    pub tokens: DesignTokens,
    pub created_at: u64,
    pub updated_at: u64,
}

/// Persisted shape of a config; older documents may lack newer token leaves.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredConfig {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    tokens: DesignTokensPatch,
    created_at: u64,
    updated_at: u64,
}

impl StoredConfig {
    fn into_saved(self, document_id: String, canonical: &DesignTokens) -> SavedConfig {
        SavedConfig {
            id: self.id.unwrap_or(document_id),
            name: self.name,
            tokens: merge(canonical, &self.tokens),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn working_document_id() -> DocumentId {
    DocumentId::new(TOKENS_COLLECTION, TOKENS_DOCUMENT)
}

fn config_document_id(id: &str) -> DocumentId {
    DocumentId::new(CONFIGS_COLLECTION, id)
}

fn unavailable(operation: &'static str) -> impl FnOnce(BackendError) -> StoreError {
    move |source| StoreError::Unavailable { operation, source }
}

pub struct TokenStore<D, C> {
    documents: D,
    cache: C,
    clock: Box<dyn Clock>,
    canonical: DesignTokens,
    tokens: DesignTokens,
    saved_configs: Vec<SavedConfig>,
    active_config: Option<String>,
    has_changes: bool,
}

impl<D: DocumentStore, C: LocalCache> TokenStore<D, C> {
    pub fn new(documents: D, cache: C) -> Self {
        Self::with_clock(documents, cache, SystemClock)
    }

    pub fn with_clock(documents: D, cache: C, clock: impl Clock + 'static) -> Self {
        let canonical = canonical_tokens();
        Self {
            documents,
            cache,
            clock: Box::new(clock),
            tokens: canonical.clone(),
            canonical,
            saved_configs: Vec::new(),
            active_config: None,
            has_changes: false,
        }
    }

    pub fn tokens(&self) -> &DesignTokens {
        &self.tokens
    }

    pub fn canonical(&self) -> &DesignTokens {
        &self.canonical
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    /// Saved configs, newest first after `load`.
    pub fn saved_configs(&self) -> &[SavedConfig] {
        &self.saved_configs
    }

    pub fn active_config(&self) -> Option<&SavedConfig> {
        let id = self.active_config.as_deref()?;
        self.find_config(id)
    }

    pub fn active_config_name(&self) -> Option<&str> {
        self.active_config().map(|config| config.name.as_str())
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    pub fn documents_mut(&mut self) -> &mut D {
        &mut self.documents
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    /// Reads the working tree (remote, then local cache, then canonical) and
    /// the saved-config list. Never fails; read errors degrade to fallbacks.
    pub fn load(&mut self) -> TokenSource {
        let (patch, source) = match self.read_remote() {
            Ok(Some(patch)) => (Some(patch), TokenSource::Remote),
            Ok(None) => (None, TokenSource::Canonical),
            Err(err) => {
                tracing::warn!(?err, "remote token read failed; trying local cache");
                match self.read_cache() {
                    Some(patch) => (Some(patch), TokenSource::LocalCache),
                    None => (None, TokenSource::Canonical),
                }
            }
        };

        self.tokens = match &patch {
            Some(patch) => merge(&self.canonical, patch),
            None => self.canonical.clone(),
        };
        self.saved_configs = self.read_configs();
        self.has_changes = false;
        tracing::info!(
            ?source,
            configs = self.saved_configs.len(),
            "working tokens loaded"
        );
        source
    }

    fn read_remote(&self) -> BackendResult<Option<DesignTokensPatch>> {
        let Some(document) = self.documents.get(&working_document_id())? else {
            return Ok(None);
        };
        Ok(Some(DesignTokensPatch::from_json(document)?))
    }

    fn read_cache(&self) -> Option<DesignTokensPatch> {
        let cached = match self.cache.get(CACHE_KEY) {
            Ok(cached) => cached?,
            Err(err) => {
                tracing::warn!(?err, "local cache read failed");
                return None;
            }
        };
        serde_json::from_str(&cached)
            .map_err(|err| tracing::warn!(?err, "ignoring unparseable cached tokens"))
            .ok()
    }

    fn read_configs(&self) -> Vec<SavedConfig> {
        let documents = match self.documents.list_collection(CONFIGS_COLLECTION) {
            Ok(documents) => documents,
            Err(err) => {
                tracing::warn!(?err, "saved config listing failed");
                return Vec::new();
            }
        };

        let mut configs: Vec<SavedConfig> = documents
            .into_iter()
            .filter_map(|(id, document)| {
                match serde_json::from_value::<StoredConfig>(document) {
                    Ok(stored) => Some(stored.into_saved(id, &self.canonical)),
                    Err(err) => {
                        tracing::warn!(%id, ?err, "skipping undecodable saved config");
                        None
                    }
                }
            })
            .collect();
        configs.sort_by(|left, right| right.updated_at.cmp(&left.updated_at));
        configs
    }

    /// Applies one edit to the working tree. Storage is not touched.
    pub fn mutate(&mut self, mutation: &TokenMutation) -> TokenResult<()> {
        self.tokens = mutation.apply(&self.tokens)?;
        self.has_changes = true;
        tracing::debug!(?mutation, "tokens mutated");
        Ok(())
    }

    /// Writes `value` at a dotted path such as `buttons.primary.hover.minWidth`.
    pub fn mutate_path(&mut self, path: &str, value: FieldValue) -> TokenResult<()> {
        let path = TokenPath::parse(path)?;
        let mutation = path.mutation(&self.tokens, value)?;
        self.mutate(&mutation)
    }

    /// Appends a color; `name` is slugified and `value` trimmed first.
    pub fn add_color(&mut self, name: &str, value: &str) -> TokenResult<()> {
        let name = slugify_color_name(name).ok_or(TokenError::InvalidName)?;
        let value = value.trim();
        if value.is_empty() {
            return Err(TokenError::EmptyValue);
        }
        self.mutate(&TokenMutation::AddColor(ColorToken::new(name, value)))
    }

    /// Persists the working tree and refreshes the active config's snapshot.
    /// The local cache is written even when the store is unreachable; pending
    /// changes stay flagged until the store accepts the write.
    pub fn save(&mut self) -> StoreResult<()> {
        self.persist_working_tree("save")?;

        if let Some(index) = self.active_index() {
            let mut updated = self.saved_configs[index].clone();
            updated.tokens = self.tokens.clone();
            updated.updated_at = self.clock.now_ms();
            let document = serde_json::to_value(&updated)?;
            self.documents
                .set(&config_document_id(&updated.id), &document)
                .map_err(unavailable("save"))?;
            tracing::debug!(id = %updated.id, "active config snapshot refreshed");
            self.saved_configs[index] = updated;
        }

        self.has_changes = false;
        tracing::info!("tokens saved");
        Ok(())
    }

    /// Snapshots the working tree under `name` and makes it the active config.
    /// Returns the new config id. On store failure nothing changes.
    pub fn save_as(&mut self, name: &str) -> StoreResult<String> {
        let now = self.clock.now_ms();
        let config = SavedConfig {
            id: format!("config-{}", Uuid::new_v4()),
            name: name.to_string(),
            tokens: self.tokens.clone(),
            created_at: now,
            updated_at: now,
        };
        let document = serde_json::to_value(&config)?;
        self.documents
            .set(&config_document_id(&config.id), &document)
            .map_err(unavailable("save_as"))?;

        let id = config.id.clone();
        tracing::info!(%id, name, "config saved");
        self.saved_configs.insert(0, config);
        self.active_config = Some(id.clone());
        self.has_changes = false;
        Ok(id)
    }

    /// Replaces the working tree with a saved config's tokens (no merge) and
    /// persists it. Local state is updated even if the store write fails.
    pub fn load_config(&mut self, id: &str) -> StoreResult<()> {
        let config = self
            .find_config(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        self.tokens = config.tokens;
        self.active_config = Some(config.id);
        self.has_changes = false;
        tracing::info!(id, name = %config.name, "config loaded");
        self.persist_working_tree("load_config")
    }

    /// Deletes a saved config. The working tree is untouched.
    pub fn delete_config(&mut self, id: &str) -> StoreResult<()> {
        let index = self
            .saved_configs
            .iter()
            .position(|config| config.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        self.documents
            .delete(&config_document_id(id))
            .map_err(unavailable("delete_config"))?;
        self.saved_configs.remove(index);
        if self.active_config.as_deref() == Some(id) {
            self.active_config = None;
        }
        tracing::info!(id, "config deleted");
        Ok(())
    }

    /// Returns to the canonical tree. Local state is reset before the store
    /// write, so a store failure is reported with the reset already applied.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.tokens = self.canonical.clone();
        self.active_config = None;
        self.has_changes = false;
        if let Err(err) = self.cache.remove(CACHE_KEY) {
            tracing::warn!(?err, "failed to clear cached tokens");
        }
        tracing::info!("tokens reset to canonical");

        let document = serde_json::to_value(&self.tokens)?;
        self.documents
            .set(&working_document_id(), &document)
            .map_err(unavailable("reset"))
    }

    fn persist_working_tree(&mut self, operation: &'static str) -> StoreResult<()> {
        let document = serde_json::to_value(&self.tokens)?;
        let remote = self.documents.set(&working_document_id(), &document);
        self.write_cache(&document);
        remote.map_err(unavailable(operation))
    }

    fn write_cache(&mut self, document: &Value) {
        if let Err(err) = self.cache.set(CACHE_KEY, &document.to_string()) {
            tracing::warn!(?err, "failed to mirror tokens into local cache");
        }
    }

    fn find_config(&self, id: &str) -> Option<&SavedConfig> {
        self.saved_configs.iter().find(|config| config.id == id)
    }

    fn active_index(&self) -> Option<usize> {
        let id = self.active_config.as_deref()?;
        self.saved_configs.iter().position(|config| config.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    /// Ticks forward one millisecond per reading.
    struct StepClock(Cell<u64>);

    impl Clock for StepClock {
        fn now_ms(&self) -> u64 {
            let now = self.0.get();
            self.0.set(now + 1);
            now
        }
    }

    fn store() -> TokenStore<MemoryDocumentStore, MemoryCache> {
        TokenStore::with_clock(
            MemoryDocumentStore::new(),
            MemoryCache::new(),
            StepClock(Cell::new(1_000)),
        )
    }

    fn stored_config(id: &str, name: &str, updated_at: u64) -> Value {
        json!({
            "id": id,
            "name": name,
            "tokens": { "typography": { "headings": { "h1": { "fontSize": 40 } } } },
            "createdAt": 1,
            "updatedAt": updated_at,
        })
    }

    #[test]
    fn load_without_any_data_uses_canonical() {
        let mut store = store();
        assert_eq!(store.load(), TokenSource::Canonical);
        assert_eq!(store.tokens(), &canonical_tokens());
        assert!(store.saved_configs().is_empty());
        assert!(!store.has_changes());
    }

    #[test]
    fn load_merges_remote_document_over_canonical() {
        let mut store = store();
        store.documents_mut().insert(
            working_document_id(),
            json!({ "buttons": { "primary": { "hover": { "minWidth": 240 } } } }),
        );
        assert_eq!(store.load(), TokenSource::Remote);
        assert_eq!(store.tokens().buttons.primary.hover.min_width, 240.0);
        assert_eq!(store.tokens().colors, canonical_tokens().colors);
    }

    #[test]
    fn load_falls_back_to_cache_when_store_is_unreachable() {
        let mut store = store();
        store
            .cache_mut()
            .set(CACHE_KEY, r##"{ "colors": [ { "name": "ink", "value": "#000" } ] }"##)
            .unwrap();
        store.documents_mut().fail_reads = true;

        assert_eq!(store.load(), TokenSource::LocalCache);
        assert_eq!(store.tokens().colors, vec![ColorToken::new("ink", "#000")]);
        assert!(store.saved_configs().is_empty());
    }

    #[test]
    fn load_treats_corrupt_remote_document_as_read_failure() {
        let mut store = store();
        store
            .documents_mut()
            .insert(working_document_id(), json!(["not", "a", "document"]));
        store.cache_mut().set(CACHE_KEY, "{ broken").unwrap();
        assert_eq!(store.load(), TokenSource::Canonical);
        assert_eq!(store.tokens(), &canonical_tokens());
    }

    #[test]
    fn load_keeps_user_edits_around_a_malformed_leaf() {
        let mut store = store();
        store.documents_mut().insert(
            working_document_id(),
            json!({
                "colors": [ { "name": "ink", "value": "#000" } ],
                "typography": { "headings": { "h1": { "fontSize": 64, "fontWeight": 450.5 } } },
                "buttons": { "primary": { "default": { "paddingTop": "wide" } } }
            }),
        );

        assert_eq!(store.load(), TokenSource::Remote);
        let tokens = store.tokens();
        assert_eq!(tokens.colors, vec![ColorToken::new("ink", "#000")]);
        assert_eq!(tokens.typography.headings.h1.font_size, 64.0);
        assert_eq!(tokens.typography.headings.h1.font_weight, 451);
        assert_eq!(
            tokens.buttons.primary.default.padding_top,
            canonical_tokens().buttons.primary.default.padding_top
        );
    }

    #[test]
    fn saved_configs_with_float_weights_are_listed() {
        let mut store = store();
        store.documents_mut().insert(
            config_document_id("floaty"),
            json!({
                "id": "floaty",
                "name": "Floaty",
                "tokens": {
                    "typography": { "paragraph": { "large": { "fontWeight": 500.0 } } },
                    "buttons": { "secondary": { "hover": { "fontWeight": 700.0 } } }
                },
                "createdAt": 1,
                "updatedAt": 2,
            }),
        );

        store.load();
        assert_eq!(store.saved_configs().len(), 1);
        let tokens = &store.saved_configs()[0].tokens;
        assert_eq!(tokens.typography.paragraph.large.font_weight, 500);
        assert_eq!(tokens.buttons.secondary.hover.font_weight, 700);
    }

    #[test]
    fn load_lists_configs_newest_first_and_skips_bad_entries() {
        let mut store = store();
        let documents = store.documents_mut();
        documents.insert(config_document_id("old"), stored_config("old", "Old", 10));
        documents.insert(config_document_id("new"), stored_config("new", "New", 30));
        documents.insert(config_document_id("mid"), stored_config("mid", "Mid", 20));
        documents.insert(config_document_id("bad"), json!({ "name": 5 }));

        store.load();
        let names: Vec<&str> = store
            .saved_configs()
            .iter()
            .map(|config| config.name.as_str())
            .collect();
        assert_eq!(names, vec!["New", "Mid", "Old"]);

        let old = &store.saved_configs()[2];
        assert_eq!(old.tokens.typography.headings.h1.font_size, 40.0);
        assert_eq!(old.tokens.typography.headings.h2, canonical_tokens().typography.headings.h2);
    }

    #[test]
    fn mutations_flag_changes_without_touching_storage() {
        let mut store = store();
        store.load();
        store
            .mutate_path("typography.headings.h1.fontSize", FieldValue::from(64))
            .unwrap();
        store
            .mutate(&TokenMutation::UpdateColor {
                index: 0,
                value: "#ff0000".to_string(),
            })
            .unwrap();

        assert!(store.has_changes());
        assert_eq!(store.tokens().typography.headings.h1.font_size, 64.0);
        assert_eq!(store.tokens().colors[0].value, "#ff0000");
        assert!(store.documents().is_empty());
        assert_eq!(store.cache().peek(CACHE_KEY), None);
    }

    #[test]
    fn rejected_mutation_leaves_state_untouched() {
        let mut store = store();
        store.load();
        let err = store
            .mutate_path("typography.headings.h9.fontSize", FieldValue::from(1))
            .unwrap_err();
        assert!(matches!(err, TokenError::InvalidPath { .. }));
        assert_eq!(store.tokens(), &canonical_tokens());
        assert!(!store.has_changes());
    }

    #[test]
    fn add_color_slugifies_name() {
        let mut store = store();
        store.add_color("  Deep Sea Blue ", "#003366").unwrap();
        assert_eq!(
            store.tokens().colors.last(),
            Some(&ColorToken::new("deep-sea-blue", "#003366"))
        );
        assert_eq!(store.add_color("   ", "#fff"), Err(TokenError::InvalidName));
    }

    #[test]
    fn add_color_trims_value_and_rejects_blank() {
        let mut store = store();
        store.add_color("ink", "  #111111 ").unwrap();
        assert_eq!(
            store.tokens().colors.last(),
            Some(&ColorToken::new("ink", "#111111"))
        );

        let before = store.tokens().clone();
        assert_eq!(store.add_color("ink", "   "), Err(TokenError::EmptyValue));
        assert_eq!(store.tokens(), &before);
    }

    #[test]
    fn save_then_load_reproduces_last_values() {
        let mut store = store();
        store.load();
        store
            .mutate_path("buttons.secondary.default.paddingTop", FieldValue::from(12))
            .unwrap();
        store
            .mutate_path("buttons.secondary.default.paddingTop", FieldValue::from(14))
            .unwrap();
        store.save().unwrap();
        assert!(!store.has_changes());
        assert!(store.cache().peek(CACHE_KEY).is_some());

        let saved = store.tokens().clone();
        let mut reopened = TokenStore::new(store.documents().clone(), MemoryCache::new());
        assert_eq!(reopened.load(), TokenSource::Remote);
        assert_eq!(reopened.tokens(), &saved);
        assert_eq!(reopened.tokens().buttons.secondary.default.padding_top, 14.0);
    }

    #[test]
    fn failed_save_keeps_pending_changes_and_still_writes_cache() {
        let mut store = store();
        store.load();
        store
            .mutate_path("colors.1.value", FieldValue::from("#222222"))
            .unwrap();
        store.documents_mut().fail_writes = true;

        let err = store.save().unwrap_err();
        assert!(matches!(
            err,
            StoreError::Unavailable {
                operation: "save",
                ..
            }
        ));
        assert!(store.has_changes());
        let cached = store.cache().peek(CACHE_KEY).expect("cache written");
        assert!(cached.contains("#222222"));
    }

    #[test]
    fn save_succeeds_when_only_the_cache_write_fails() {
        let mut store = store();
        store.load();
        store
            .mutate_path("typography.headings.h3.fontSize", FieldValue::from(30))
            .unwrap();
        store.cache_mut().fail_writes = true;

        store.save().unwrap();
        assert!(!store.has_changes());
        assert_eq!(store.cache().peek(CACHE_KEY), None);
        let persisted = store.documents().peek(&working_document_id()).unwrap();
        assert_eq!(persisted["typography"]["headings"]["h3"]["fontSize"], 30.0);
    }

    #[test]
    fn save_refreshes_active_config_snapshot() {
        let mut store = store();
        store.load();
        let id = store.save_as("Brand v2").unwrap();
        let created = store.active_config().unwrap().updated_at;

        store
            .mutate_path("typography.paragraph.small.fontSize", FieldValue::from(15))
            .unwrap();
        store.save().unwrap();

        let active = store.active_config().unwrap();
        assert_eq!(active.id, id);
        assert!(active.updated_at > created);
        assert_eq!(active.tokens.typography.paragraph.small.font_size, 15.0);
        let stored = store.documents().peek(&config_document_id(&id)).unwrap();
        assert_eq!(stored["tokens"]["typography"]["paragraph"]["small"]["fontSize"], 15.0);
    }

    #[test]
    fn save_as_prepends_and_activates_config() {
        let mut store = store();
        store.documents_mut().insert(config_document_id("older"), stored_config("older", "Older", 5));
        store.load();
        store
            .mutate_path("buttons.primary.default.borderRadius", FieldValue::from(8))
            .unwrap();

        let id = store.save_as("Brand v2").unwrap();
        assert!(id.starts_with("config-"));
        assert!(!store.has_changes());
        assert_eq!(store.active_config_name(), Some("Brand v2"));

        let first = &store.saved_configs()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.created_at, first.updated_at);
        assert_eq!(&first.tokens, store.tokens());
        assert_eq!(store.saved_configs().len(), 2);
        assert!(store.documents().peek(&config_document_id(&id)).is_some());
    }

    #[test]
    fn failed_save_as_changes_nothing() {
        let mut store = store();
        store.load();
        store
            .mutate_path("colors.0.value", FieldValue::from("#010101"))
            .unwrap();
        store.documents_mut().fail_writes = true;

        assert!(store.save_as("Draft").is_err());
        assert!(store.saved_configs().is_empty());
        assert_eq!(store.active_config_name(), None);
        assert!(store.has_changes());
    }

    #[test]
    fn load_config_replaces_tree_exactly_and_switches_active_name() {
        let mut store = store();
        store.load();
        store
            .mutate_path("typography.headings.h2.fontSize", FieldValue::from(44))
            .unwrap();
        let first = store.save_as("First").unwrap();
        let first_tokens = store.tokens().clone();

        store.reset().unwrap();
        store
            .mutate_path("typography.headings.h2.fontSize", FieldValue::from(55))
            .unwrap();
        store.save_as("Brand v2").unwrap();
        assert_eq!(store.active_config_name(), Some("Brand v2"));

        store
            .mutate_path("colors.0.value", FieldValue::from("#abcdef"))
            .unwrap();
        store.load_config(&first).unwrap();

        assert_eq!(store.active_config_name(), Some("First"));
        assert_eq!(store.tokens(), &first_tokens);
        assert!(!store.has_changes());
        let persisted = store.documents().peek(&working_document_id()).unwrap();
        assert_eq!(persisted, &serde_json::to_value(&first_tokens).unwrap());
    }

    #[test]
    fn load_config_with_failing_store_still_updates_local_state() {
        let mut store = store();
        store.load();
        let id = store.save_as("Snapshot").unwrap();
        store
            .mutate_path("colors.2.value", FieldValue::from("#333333"))
            .unwrap();
        store.documents_mut().fail_writes = true;

        assert!(matches!(
            store.load_config(&id),
            Err(StoreError::Unavailable { .. })
        ));
        assert_eq!(store.tokens(), &canonical_tokens());
        assert!(!store.has_changes());
        assert!(store.cache().peek(CACHE_KEY).is_some());
    }

    #[test]
    fn unknown_config_ids_are_not_found() {
        let mut store = store();
        store.load();
        assert!(matches!(
            store.load_config("config-missing"),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete_config("config-missing"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_config_removes_entry_and_clears_active_marker() {
        let mut store = store();
        store.load();
        let id = store.save_as("Throwaway").unwrap();
        store
            .mutate_path("colors.3.value", FieldValue::from("#444444"))
            .unwrap();
        let working = store.tokens().clone();

        store.delete_config(&id).unwrap();
        assert!(store.saved_configs().is_empty());
        assert_eq!(store.active_config_name(), None);
        assert_eq!(store.tokens(), &working);
        assert!(store.documents().peek(&config_document_id(&id)).is_none());
    }

    #[test]
    fn failed_delete_keeps_list() {
        let mut store = store();
        store.load();
        let id = store.save_as("Keep").unwrap();
        store.documents_mut().fail_writes = true;
        assert!(store.delete_config(&id).is_err());
        assert_eq!(store.saved_configs().len(), 1);
        assert_eq!(store.active_config_name(), Some("Keep"));
    }

    #[test]
    fn reset_restores_canonical_and_clears_cache() {
        let mut store = store();
        store.load();
        store
            .mutate_path("buttons.primary.hover.background", FieldValue::from("#000000"))
            .unwrap();
        store.save_as("Dark").unwrap();
        store.save().unwrap();
        assert!(store.cache().peek(CACHE_KEY).is_some());

        store.reset().unwrap();
        assert_eq!(store.tokens(), &canonical_tokens());
        assert_eq!(store.active_config_name(), None);
        assert!(!store.has_changes());
        assert_eq!(store.cache().peek(CACHE_KEY), None);
        assert_eq!(
            store.documents().peek(&working_document_id()),
            Some(&serde_json::to_value(canonical_tokens()).unwrap())
        );
        assert_eq!(store.saved_configs().len(), 1);
    }

    #[test]
    fn reset_reports_store_failure_after_resetting_locally() {
        let mut store = store();
        store.load();
        store
            .mutate_path("colors.0.name", FieldValue::from("brand"))
            .unwrap();
        store.documents_mut().fail_writes = true;

        assert!(matches!(
            store.reset(),
            Err(StoreError::Unavailable {
                operation: "reset",
                ..
            })
        ));
        assert_eq!(store.tokens(), &canonical_tokens());
        assert!(!store.has_changes());
    }
}
