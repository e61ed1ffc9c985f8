//!
//! Identra: identity record lifecycle management.
//!
//! This library manages three kinds of identity records and the operations
//! that tie their lifecycles together:
//!
//! * **Users (`record::User`)**: local accounts, immutable after creation.
//! * **Keys (`record::Key`)**: authentication keys owned by a user. Every
//!   freshly created user gets exactly one `root`-level key; further keys
//!   are created at `normal` level.
//! * **Open profiles (`record::OProfile`)**: links between a local account
//!   and an external identity provider's profile.
//!
//! ## Core Concepts
//!
//! * **Record Factory (`record::RecordFactory`)**: builds well-formed records
//!   from partial input, filling identifiers and timestamps when absent.
//! * **Document Store (`store::DocumentStore`)**: a pluggable persistence
//!   layer addressed by collection name. The manager is independent of the
//!   concrete storage mechanism; `store::InMemory` is the bundled backend.
//! * **Account Manager (`manager::AccountManager`)**: orchestrates multi-step
//!   operations: user creation with its root key, cascading deletion, and
//!   the merge algorithm that moves one user's keys and profiles to another.
//!
//! Multi-step operations are deliberately non-transactional: a failure midway
//! leaves earlier steps applied, and that partial state is part of the
//! documented contract rather than a defect. Callers needing atomicity must
//! layer their own reconciliation on top.

pub mod clock;
pub mod constants;
pub mod manager;
pub mod record;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use manager::AccountManager;
pub use record::RecordFactory;

#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;

/// Result type used throughout the Identra library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Identra library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured errors from the document store layer
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured errors from the account lifecycle manager
    #[error(transparent)]
    Manager(manager::ManagerError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Store(_) => "store",
            Error::Manager(_) => "manager",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    ///
    /// Note that single-entity lookups report "nothing found" as `Ok(None)`,
    /// never as an error; this helper only matches failures such as an
    /// update targeting a document that does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_not_found(),
            Error::Manager(manager_err) => manager_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is store-related.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Check if this error came from a failed single write to the store.
    pub fn is_write_error(&self) -> bool {
        match self {
            Error::Manager(manager_err) => manager_err.is_write_error(),
            _ => false,
        }
    }

    /// Check if this error came from a failed lookup or query.
    pub fn is_read_error(&self) -> bool {
        match self {
            Error::Manager(manager_err) => manager_err.is_read_error(),
            _ => false,
        }
    }

    /// Check if this error came from a failed step of a user merge.
    pub fn is_merge_error(&self) -> bool {
        match self {
            Error::Manager(manager_err) => manager_err.is_merge_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Store(store_err) => store_err.is_io_error(),
            _ => false,
        }
    }
}
