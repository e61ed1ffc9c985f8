//! Document store abstraction for persisting identity records.
//!
//! This module defines the [`DocumentStore`] trait, the account manager's
//! only external dependency, and the bundled [`InMemory`] implementation.
//! A store is addressed by logical collection name and speaks JSON
//! documents; the manager is independent of the concrete storage engine.
//!
//! Before a store is usable it must be opened against connection parameters
//! ([`StoreOptions`]) and have its collections registered. Those are
//! initialization preconditions enforced by implementations, not part of
//! the lifecycle algorithms.

mod errors;
mod in_memory;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

pub use errors::StoreError;
pub use in_memory::InMemory;

/// A persisted record, as the store sees it.
///
/// Documents are JSON objects carrying at least an `"id"` string field.
/// Typed records ([`crate::record::User`] and friends) are converted to and
/// from documents at the manager boundary.
pub type Document = serde_json::Value;

/// Read a document's `"id"` field, if present.
pub fn document_id(document: &Document) -> Option<&str> {
    document.get("id").and_then(|id| id.as_str())
}

/// Connection parameters for opening a store.
///
/// Network-backed implementations dial `host:port`; the in-memory backend
/// accepts and ignores them but still requires the open step.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Database host name or address
    pub host: String,
    /// Database listening port
    pub port: u16,
    /// Database name
    pub name: String,
    /// Optional credentials
    pub username: Option<String>,
    /// Optional credentials
    pub password: Option<String>,
}

/// An equality filter over top-level document fields.
///
/// All listed fields must match for a document to be selected. An empty
/// filter matches every document in the collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    fields: BTreeMap<String, serde_json::Value>,
}

impl Filter {
    /// Create an empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter selecting documents owned by the given user.
    pub fn by_user_id(user_id: impl Into<String>) -> Self {
        Self::new().field("user_id", user_id.into())
    }

    /// Add an equality condition on a top-level field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Check whether a document satisfies every condition in this filter.
    pub fn matches(&self, document: &Document) -> bool {
        self.fields
            .iter()
            .all(|(key, expected)| document.get(key) == Some(expected))
    }
}

/// Storage trait abstracting the persistence mechanism for identity records.
///
/// Implementations must be `Send + Sync` so a single store can back
/// concurrent manager calls. Each operation is atomic on its own; the trait
/// offers no transactions spanning multiple calls, and multi-step manager
/// operations are built directly on that limitation.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document into a collection.
    async fn insert(&self, collection: &str, document: Document) -> Result<()>;

    /// Look up a single document by its id.
    ///
    /// Returns `Ok(None)` when no document matches; absence is not an
    /// error, only a failed query is.
    async fn query_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Return all documents in a collection matching the filter.
    ///
    /// Returns an empty vector (not an error) when nothing matches.
    async fn query_by_options(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>>;

    /// Replace the document whose id matches `document`'s own `"id"` field.
    ///
    /// Fails with a not-found error when no such document exists, so a
    /// caller updating a record that raced with a deletion sees the
    /// conflict instead of silently recreating the record.
    async fn update_by_id(&self, collection: &str, document: Document) -> Result<()>;

    /// Remove the document with the given id.
    async fn remove_by_id(&self, collection: &str, id: &str) -> Result<()>;

    /// Remove all documents matching the filter.
    ///
    /// Succeeds even when zero documents matched.
    async fn remove_by_options(&self, collection: &str, filter: &Filter) -> Result<()>;
}
