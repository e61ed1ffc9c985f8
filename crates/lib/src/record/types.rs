//! Core data types for identity records

use serde::{Deserialize, Serialize};

/// Discriminator stored in every record's `type` field.
///
/// Doubles as the logical collection a record belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    User,
    Key,
    OProfile,
}

impl RecordKind {
    /// The collection name this kind of record is persisted into.
    pub fn collection(&self) -> &'static str {
        match self {
            RecordKind::User => crate::constants::USER,
            RecordKind::Key => crate::constants::KEY,
            RecordKind::OProfile => crate::constants::OPROFILE,
        }
    }
}

/// Privilege level of an authentication key.
///
/// A freshly created user gets exactly one `Root` key. Keys created later
/// are `Normal`, and a `Root` key is downgraded to `Normal` when its owner
/// is merged into another user.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeyLevel {
    Root,
    #[default]
    Normal,
}

/// A user account.
///
/// Field values are immutable after creation: a user is never updated in
/// place, only created and (directly or via merge) deleted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Record discriminator, always [`RecordKind::User`]
    #[serde(rename = "type")]
    pub kind: RecordKind,

    /// Unique identifier; generated when not supplied at creation
    pub id: String,

    /// Display name
    pub name: Option<String>,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

/// An authentication key owned by a user.
///
/// `user_id` is a reference, not an ownership relation; the store is the
/// sole owner of a key's lifetime. During a merge the `user_id` is
/// reassigned and a `root` level is downgraded; nothing else ever mutates
/// a key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Key {
    /// Record discriminator, always [`RecordKind::Key`]
    #[serde(rename = "type")]
    pub kind: RecordKind,

    /// Unique identifier; generated when not supplied at creation
    pub id: String,

    /// Id of the owning user
    pub user_id: String,

    /// Privilege level
    pub level: KeyLevel,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Optional expiry timestamp (Unix milliseconds)
    pub expired_at: Option<i64>,
}

/// A link between a local user account and an external identity provider's
/// profile.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OProfile {
    /// Record discriminator, always [`RecordKind::OProfile`]
    #[serde(rename = "type")]
    pub kind: RecordKind,

    /// Unique identifier; generated when not supplied at creation
    pub id: String,

    /// Id of the owning user
    pub user_id: String,

    /// Provider name, e.g. "box"
    pub provider: Option<String>,

    /// Opaque provider-specific profile data
    pub detail: Option<serde_json::Value>,

    /// Opaque credential data from the provider's OAuth flow
    pub oauth: Option<serde_json::Value>,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}
