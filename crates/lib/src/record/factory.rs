//! Record factory: builds well-formed records from partial input.

use std::sync::Arc;

use uuid::Uuid;

use super::types::{Key, KeyLevel, OProfile, RecordKind, User};
use crate::clock::{Clock, SystemClock};

/// Partial input for building a [`User`].
#[derive(Clone, Debug, Default)]
pub struct UserOptions {
    /// Explicit identifier; a UUID is generated when absent
    pub id: Option<String>,
    /// Display name
    pub name: Option<String>,
}

/// Partial input for building a [`Key`].
#[derive(Clone, Debug, Default)]
pub struct KeyOptions {
    /// Explicit identifier; a UUID is generated when absent
    pub id: Option<String>,
    /// Id of the owning user
    pub user_id: String,
    /// Privilege level, `Normal` by default
    pub level: KeyLevel,
    /// Optional expiry timestamp (Unix milliseconds)
    pub expired_at: Option<i64>,
}

/// Partial input for building an [`OProfile`].
#[derive(Clone, Debug, Default)]
pub struct OProfileOptions {
    /// Explicit identifier; a UUID is generated when absent
    pub id: Option<String>,
    /// Id of the owning user
    pub user_id: String,
    /// Provider name
    pub provider: Option<String>,
    /// Opaque provider-specific profile data
    pub detail: Option<serde_json::Value>,
    /// Opaque credential data
    pub oauth: Option<serde_json::Value>,
}

/// Builds in-memory identity records from partial options.
///
/// The factory fills generated identifiers and clock-sourced timestamps;
/// everything else is copied verbatim from the options. It performs no I/O
/// and never fails. The output always has every declared field present
/// (optional ones possibly `None`).
#[derive(Clone, Debug)]
pub struct RecordFactory {
    clock: Arc<dyn Clock>,
}

impl Default for RecordFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordFactory {
    /// Create a factory backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a factory with an explicit time provider.
    ///
    /// Tests inject a deterministic clock here so `created_at` values are
    /// predictable.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Build a [`User`] record.
    pub fn make_user(&self, options: UserOptions) -> User {
        User {
            kind: RecordKind::User,
            id: options.id.unwrap_or_else(generate_id),
            name: options.name,
            created_at: self.clock.now_millis(),
        }
    }

    /// Build a [`Key`] record.
    pub fn make_key(&self, options: KeyOptions) -> Key {
        Key {
            kind: RecordKind::Key,
            id: options.id.unwrap_or_else(generate_id),
            user_id: options.user_id,
            level: options.level,
            created_at: self.clock.now_millis(),
            expired_at: options.expired_at,
        }
    }

    /// Build an [`OProfile`] record.
    pub fn make_oprofile(&self, options: OProfileOptions) -> OProfile {
        OProfile {
            kind: RecordKind::OProfile,
            id: options.id.unwrap_or_else(generate_id),
            user_id: options.user_id,
            provider: options.provider,
            detail: options.detail,
            oauth: options.oauth,
            created_at: self.clock.now_millis(),
        }
    }
}

/// Generate a fresh unique record identifier.
fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
