//! Error types for the document store layer.
//!
//! These are the failures a store implementation itself can produce. The
//! account manager wraps them with operation context before surfacing them
//! to callers.

use thiserror::Error;

/// Errors that can occur during document store operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Operation attempted before the store was opened.
    #[error("Store has not been opened")]
    NotOpened,

    /// Collection was never registered with the store.
    #[error("Collection not supported: {collection}")]
    CollectionNotSupported {
        /// The collection name that was not registered
        collection: String,
    },

    /// Document passed to insert/update has no string `"id"` field.
    #[error("Document for collection {collection} is missing an id")]
    MissingId {
        /// The collection the document was destined for
        collection: String,
    },

    /// Update targeted a document that does not exist.
    #[error("Document not found in {collection}: {id}")]
    DocumentNotFound {
        /// The collection that was searched
        collection: String,
        /// The id of the document that was not found
        id: String,
    },

    /// Serialization of store state failed.
    #[error("Serialization failed")]
    Serialization {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error during persistence.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::DocumentNotFound { .. })
    }

    /// Check if this error indicates a misconfigured store (not opened or
    /// unregistered collection).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            StoreError::NotOpened | StoreError::CollectionNotSupported { .. }
        )
    }

    /// Check if this error is related to I/O or serialization.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            StoreError::FileIo { .. } | StoreError::Serialization { .. }
        )
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
