//! In-memory document store implementation
//!
//! This module provides an in-memory implementation of the [`DocumentStore`]
//! trait, suitable for testing, development, or scenarios where persistence
//! is handled externally (e.g. by saving/loading the whole state to a file).

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{Document, DocumentStore, Filter, StoreOptions, document_id};
use crate::Result;
use crate::store::errors::StoreError;

/// Documents in one collection, keyed by id.
type Collection = BTreeMap<String, Document>;

#[derive(Debug, Default)]
struct State {
    opened: bool,
    collections: HashMap<String, Collection>,
}

/// A simple in-memory document store backed by per-collection maps.
///
/// Collections must be registered with [`InMemory::add_supported_collections`]
/// and the store opened with [`InMemory::open`] before any operation is
/// accepted; this mirrors the initialization contract of a networked store.
/// The connection parameters themselves are ignored.
///
/// Basic persistence is available via [`InMemory::save_to_file`] and
/// [`InMemory::load_from_file`], serializing the collections to JSON.
#[derive(Debug, Default)]
pub struct InMemory {
    state: RwLock<State>,
}

impl InMemory {
    /// Creates a new, unopened store with no registered collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the collections this store will accept operations on.
    ///
    /// Registering an already-known collection is a no-op and preserves its
    /// documents.
    pub fn add_supported_collections(&self, names: &[&str]) {
        let mut state = self.state.write().unwrap();
        for name in names {
            state.collections.entry(name.to_string()).or_default();
        }
    }

    /// Open the store against connection parameters.
    ///
    /// The in-memory backend has nothing to dial, but operations before
    /// `open` still fail with [`StoreError::NotOpened`] so code developed
    /// against this backend honors the real initialization order.
    pub fn open(&self, options: &StoreOptions) -> Result<()> {
        let mut state = self.state.write().unwrap();
        state.opened = true;
        tracing::debug!(
            database = %options.name,
            collections = state.collections.len(),
            "Opened in-memory store"
        );
        Ok(())
    }

    /// Saves all collections to a file as JSON.
    ///
    /// Registration survives a save/load cycle; the opened flag does not,
    /// since it stands for a live connection.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let state = self.state.read().unwrap();
        let json = serde_json::to_string_pretty(&state.collections)
            .map_err(|source| StoreError::Serialization { source })?;
        std::fs::write(path.as_ref(), json).map_err(|source| StoreError::FileIo { source })?;
        tracing::debug!(path = %path.as_ref().display(), "Saved in-memory store");
        Ok(())
    }

    /// Loads collections from a JSON file.
    ///
    /// If the file does not exist, a new, empty store is returned. The
    /// returned store is unopened.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            return Ok(Self::new());
        }
        let json =
            std::fs::read_to_string(path.as_ref()).map_err(|source| StoreError::FileIo { source })?;
        let collections: HashMap<String, Collection> =
            serde_json::from_str(&json).map_err(|source| StoreError::Serialization { source })?;
        tracing::debug!(
            path = %path.as_ref().display(),
            collections = collections.len(),
            "Loaded in-memory store"
        );
        Ok(Self {
            state: RwLock::new(State {
                opened: false,
                collections,
            }),
        })
    }

    fn collection<'a>(state: &'a State, collection: &str) -> Result<&'a Collection> {
        if !state.opened {
            return Err(StoreError::NotOpened.into());
        }
        state.collections.get(collection).ok_or_else(|| {
            StoreError::CollectionNotSupported {
                collection: collection.to_string(),
            }
            .into()
        })
    }

    fn collection_mut<'a>(state: &'a mut State, collection: &str) -> Result<&'a mut Collection> {
        if !state.opened {
            return Err(StoreError::NotOpened.into());
        }
        state.collections.get_mut(collection).ok_or_else(|| {
            StoreError::CollectionNotSupported {
                collection: collection.to_string(),
            }
            .into()
        })
    }

    fn require_id(collection: &str, document: &Document) -> Result<String> {
        document_id(document)
            .map(str::to_string)
            .ok_or_else(|| {
                StoreError::MissingId {
                    collection: collection.to_string(),
                }
                .into()
            })
    }
}

#[async_trait]
impl DocumentStore for InMemory {
    /// Inserting a document whose id already exists overwrites it, matching
    /// the last-write-wins semantics callers are told to expect from the
    /// store on conflicting paths.
    async fn insert(&self, collection: &str, document: Document) -> Result<()> {
        let id = Self::require_id(collection, &document)?;
        let mut state = self.state.write().unwrap();
        Self::collection_mut(&mut state, collection)?.insert(id, document);
        Ok(())
    }

    async fn query_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let state = self.state.read().unwrap();
        Ok(Self::collection(&state, collection)?.get(id).cloned())
    }

    async fn query_by_options(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        let state = self.state.read().unwrap();
        Ok(Self::collection(&state, collection)?
            .values()
            .filter(|document| filter.matches(document))
            .cloned()
            .collect())
    }

    async fn update_by_id(&self, collection: &str, document: Document) -> Result<()> {
        let id = Self::require_id(collection, &document)?;
        let mut state = self.state.write().unwrap();
        let documents = Self::collection_mut(&mut state, collection)?;
        match documents.get_mut(&id) {
            Some(slot) => {
                *slot = document;
                Ok(())
            }
            None => Err(StoreError::DocumentNotFound {
                collection: collection.to_string(),
                id,
            }
            .into()),
        }
    }

    /// Removing an absent id succeeds; only the store being misconfigured
    /// is an error here.
    async fn remove_by_id(&self, collection: &str, id: &str) -> Result<()> {
        let mut state = self.state.write().unwrap();
        Self::collection_mut(&mut state, collection)?.remove(id);
        Ok(())
    }

    async fn remove_by_options(&self, collection: &str, filter: &Filter) -> Result<()> {
        let mut state = self.state.write().unwrap();
        Self::collection_mut(&mut state, collection)?
            .retain(|_, document| !filter.matches(document));
        Ok(())
    }
}
