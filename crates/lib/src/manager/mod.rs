//! Account lifecycle manager
//!
//! [`AccountManager`] orchestrates the multi-step operations on identity
//! records: creating a user together with its root key, cascading deletion
//! of a user's dependents, and the merge algorithm that moves one user's
//! keys and profiles to another.
//!
//! The manager holds no mutable state between calls beyond the injected
//! store handle and record factory, so any number of callers may invoke it
//! concurrently. Calls touching different entity ids are independent; calls
//! racing on the same id are resolved by the store's last-write-wins and
//! not-found semantics rather than synchronized here.
//!
//! ## Partial failure
//!
//! Multi-step operations are not transactional. When a step fails, earlier
//! steps stay applied and the error tells the caller which step failed.
//! Step ordering is chosen to keep the damage bounded: deletion removes
//! dependents before the user record so an interrupted delete orphans
//! dependents rather than leaving a dangling user, and a merge deletes the
//! losing user only after every dependent has been reassigned.

pub mod errors;

use std::sync::Arc;

use futures::future;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::record::{
    Key, KeyLevel, KeyOptions, OProfile, OProfileOptions, RecordFactory, User, UserOptions,
};
use crate::store::{Document, DocumentStore, Filter};
use crate::{Result, constants};

pub use errors::{ManagerError, MergeStep};

/// Orchestrates creation, lookup, deletion, and merging of identity records.
///
/// Construct one manager at process start and share it by reference; it is
/// a plain struct with no global state.
///
/// ## Example
///
/// ```
/// # use std::sync::Arc;
/// # use identra::{AccountManager, constants, record::UserOptions, store::{InMemory, StoreOptions}};
/// # #[tokio::main]
/// # async fn main() -> identra::Result<()> {
/// let store = InMemory::new();
/// store.add_supported_collections(constants::ALL_COLLECTIONS);
/// store.open(&StoreOptions::default())?;
///
/// let manager = AccountManager::new(Arc::new(store));
/// let user = manager
///     .create_user(UserOptions {
///         name: Some("alice".to_string()),
///         ..Default::default()
///     })
///     .await?;
/// let keys = manager.get_keys_of_user(&user.id).await?;
/// assert_eq!(keys.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AccountManager {
    store: Arc<dyn DocumentStore>,
    factory: RecordFactory,
}

impl std::fmt::Debug for AccountManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountManager")
            .field("store", &"<DocumentStore>")
            .field("factory", &self.factory)
            .finish()
    }
}

impl AccountManager {
    /// Create a manager over an opened store, using the system clock for
    /// record timestamps.
    ///
    /// The store must already be opened and have the [`constants`]
    /// collections registered; that initialization is the caller's
    /// responsibility, not part of the lifecycle logic.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_factory(store, RecordFactory::new())
    }

    /// Create a manager with an explicit record factory.
    ///
    /// Used by tests to inject a deterministic clock.
    pub fn with_factory(store: Arc<dyn DocumentStore>, factory: RecordFactory) -> Self {
        Self { store, factory }
    }

    /// Create a new user and its root key.
    ///
    /// The user record is persisted first, then a `root`-level key
    /// referencing the new user's id. If the key insert fails after the
    /// user insert succeeded, the user record remains persisted; that
    /// partial state is accepted and not auto-corrected.
    ///
    /// Returns the new user (without the key).
    pub async fn create_user(&self, options: UserOptions) -> Result<User> {
        let user = self.factory.make_user(options);
        self.insert(constants::USER, "create_user", &user).await?;

        // The first key of a user MUST be root.
        let key = self.factory.make_key(KeyOptions {
            user_id: user.id.clone(),
            level: KeyLevel::Root,
            ..Default::default()
        });
        self.insert(constants::KEY, "create_user", &key).await?;

        tracing::debug!(user_id = %user.id, key_id = %key.id, "Created user with root key");
        Ok(user)
    }

    /// Return the user with the given id, or `None` if no such user exists.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.query_one(constants::USER, id).await
    }

    /// Delete a user and all of its keys and open profiles.
    ///
    /// Removes, strictly in order: open profiles, then keys, then the user
    /// record. Each step is awaited before the next begins and earlier
    /// deletions are not undone on failure.
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        let filter = Filter::by_user_id(id);

        self.store
            .remove_by_options(constants::OPROFILE, &filter)
            .await
            .map_err(|source| write_error(constants::OPROFILE, "delete_user", source))?;

        self.store
            .remove_by_options(constants::KEY, &filter)
            .await
            .map_err(|source| write_error(constants::KEY, "delete_user", source))?;

        self.store
            .remove_by_id(constants::USER, id)
            .await
            .map_err(|source| write_error(constants::USER, "delete_user", source))?;

        tracing::debug!(user_id = %id, "Deleted user and dependents");
        Ok(())
    }

    /// Add an open profile linking a user to an external provider.
    pub async fn add_oprofile(&self, options: OProfileOptions) -> Result<OProfile> {
        let profile = self.factory.make_oprofile(options);
        self.insert(constants::OPROFILE, "add_oprofile", &profile)
            .await?;
        tracing::debug!(
            profile_id = %profile.id,
            user_id = %profile.user_id,
            "Added open profile"
        );
        Ok(profile)
    }

    /// Return all open profiles owned by a user (empty when none).
    pub async fn get_oprofiles_of_user(&self, user_id: &str) -> Result<Vec<OProfile>> {
        self.query_owned(constants::OPROFILE, user_id).await
    }

    /// Create a `normal`-level key for an existing user.
    pub async fn create_key_for_user(&self, user_id: &str) -> Result<Key> {
        let key = self.factory.make_key(KeyOptions {
            user_id: user_id.to_string(),
            level: KeyLevel::Normal,
            ..Default::default()
        });
        self.insert(constants::KEY, "create_key_for_user", &key)
            .await?;
        tracing::debug!(key_id = %key.id, user_id = %user_id, "Created key");
        Ok(key)
    }

    /// Return the key with the given id, or `None` if no such key exists.
    pub async fn get_key(&self, id: &str) -> Result<Option<Key>> {
        self.query_one(constants::KEY, id).await
    }

    /// Return all keys owned by a user (empty when none).
    pub async fn get_keys_of_user(&self, user_id: &str) -> Result<Vec<Key>> {
        self.query_owned(constants::KEY, user_id).await
    }

    /// Merge the loser's keys and open profiles into the winner, then
    /// delete the loser.
    ///
    /// The winner is never read or mutated; its id is only written into the
    /// loser's former dependents. Steps, strictly ordered:
    ///
    /// 1. Fetch all of the loser's open profiles.
    /// 2. Reassign each to the winner and persist the updates. Sibling
    ///    updates are issued concurrently; an empty fetch makes this a
    ///    no-op.
    /// 3. Fetch all of the loser's keys.
    /// 4. Reassign each to the winner, downgrading `root` keys to `normal`,
    ///    and persist the updates (same concurrency rule).
    /// 5. Delete the loser's user record.
    ///
    /// On failure the error carries the step that failed. Records already
    /// updated by a partially completed step stay updated; callers must
    /// treat a failed merge as leaving an intermediate state that needs
    /// reconciliation.
    pub async fn merge_users(&self, winner: &User, loser: &User) -> Result<()> {
        let profiles = self
            .get_oprofiles_of_user(&loser.id)
            .await
            .map_err(|source| merge_error(MergeStep::FetchProfiles, source))?;

        future::try_join_all(profiles.into_iter().map(|mut profile| {
            profile.user_id = winner.id.clone();
            async move {
                let document = serde_json::to_value(&profile)?;
                self.store.update_by_id(constants::OPROFILE, document).await
            }
        }))
        .await
        .map_err(|source| merge_error(MergeStep::UpdateProfiles, source))?;

        let keys = self
            .get_keys_of_user(&loser.id)
            .await
            .map_err(|source| merge_error(MergeStep::FetchKeys, source))?;

        future::try_join_all(keys.into_iter().map(|mut key| {
            key.user_id = winner.id.clone();
            if key.level == KeyLevel::Root {
                key.level = KeyLevel::Normal;
            }
            async move {
                let document = serde_json::to_value(&key)?;
                self.store.update_by_id(constants::KEY, document).await
            }
        }))
        .await
        .map_err(|source| merge_error(MergeStep::UpdateKeys, source))?;

        self.store
            .remove_by_id(constants::USER, &loser.id)
            .await
            .map_err(|source| merge_error(MergeStep::DeleteLoser, source))?;

        tracing::debug!(winner = %winner.id, loser = %loser.id, "Merged users");
        Ok(())
    }

    // Persist one typed record into a collection, tagging failures with the
    // issuing operation.
    async fn insert<T: Serialize>(
        &self,
        collection: &'static str,
        operation: &'static str,
        record: &T,
    ) -> Result<()> {
        let document = serde_json::to_value(record)?;
        self.store
            .insert(collection, document)
            .await
            .map_err(|source| write_error(collection, operation, source))
    }

    async fn query_one<T: DeserializeOwned>(
        &self,
        collection: &'static str,
        id: &str,
    ) -> Result<Option<T>> {
        let document = self
            .store
            .query_by_id(collection, id)
            .await
            .map_err(|source| read_error(collection, source))?;
        document.map(from_document).transpose()
    }

    async fn query_owned<T: DeserializeOwned>(
        &self,
        collection: &'static str,
        user_id: &str,
    ) -> Result<Vec<T>> {
        let documents = self
            .store
            .query_by_options(collection, &Filter::by_user_id(user_id))
            .await
            .map_err(|source| read_error(collection, source))?;
        documents.into_iter().map(from_document).collect()
    }
}

fn from_document<T: DeserializeOwned>(document: Document) -> Result<T> {
    Ok(serde_json::from_value(document)?)
}

fn write_error(
    collection: &'static str,
    operation: &'static str,
    source: crate::Error,
) -> crate::Error {
    ManagerError::Write {
        collection,
        operation,
        source: Box::new(source),
    }
    .into()
}

fn read_error(collection: &'static str, source: crate::Error) -> crate::Error {
    ManagerError::Read {
        collection,
        source: Box::new(source),
    }
    .into()
}

fn merge_error(step: MergeStep, source: crate::Error) -> crate::Error {
    ManagerError::Merge {
        step,
        source: Box::new(source),
    }
    .into()
}
