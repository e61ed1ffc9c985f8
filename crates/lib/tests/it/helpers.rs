//! Shared test setup: store construction and a fault-injecting store double.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use identra::{
    AccountManager, Result, constants,
    record::{User, UserOptions},
    store::{Document, DocumentStore, Filter, InMemory, StoreOptions},
};

/// Build an opened in-memory store with the manager's collections registered.
pub fn open_store() -> Arc<InMemory> {
    let store = InMemory::new();
    store.add_supported_collections(constants::ALL_COLLECTIONS);
    store
        .open(&StoreOptions::default())
        .expect("opening the in-memory store cannot fail");
    Arc::new(store)
}

/// A manager over a fresh in-memory store.
pub fn setup_manager() -> AccountManager {
    AccountManager::new(open_store())
}

/// A manager plus a handle to its store, for tests that need to inspect or
/// mutate persisted state directly.
pub fn setup_manager_with_store() -> (AccountManager, Arc<InMemory>) {
    let store = open_store();
    (AccountManager::new(store.clone()), store)
}

/// Create a user with the given display name.
pub async fn create_named_user(manager: &AccountManager, name: &str) -> User {
    manager
        .create_user(UserOptions {
            name: Some(name.to_string()),
            ..Default::default()
        })
        .await
        .expect("user creation should succeed")
}

/// A store wrapper that fails selected operations with an injected fault.
///
/// Faults are keyed by (operation, collection) so a test can make exactly
/// one step of a multi-step manager operation fail and observe the
/// resulting partial-completion state.
pub struct FailingStore {
    inner: Arc<InMemory>,
    faults: Mutex<HashSet<(&'static str, &'static str)>>,
}

impl FailingStore {
    pub fn new(inner: Arc<InMemory>) -> Self {
        Self {
            inner,
            faults: Mutex::new(HashSet::new()),
        }
    }

    /// Make the given operation fail for the given collection.
    ///
    /// Operation names are the `DocumentStore` method names.
    pub fn fail_on(&self, operation: &'static str, collection: &'static str) {
        self.faults.lock().unwrap().insert((operation, collection));
    }

    fn check(&self, operation: &'static str, collection: &str) -> Result<()> {
        let faults = self.faults.lock().unwrap();
        for (fault_op, fault_collection) in faults.iter() {
            if *fault_op == operation && *fault_collection == collection {
                return Err(std::io::Error::other(format!(
                    "injected fault: {operation} on {collection}"
                ))
                .into());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<()> {
        self.check("insert", collection)?;
        self.inner.insert(collection, document).await
    }

    async fn query_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.check("query_by_id", collection)?;
        self.inner.query_by_id(collection, id).await
    }

    async fn query_by_options(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        self.check("query_by_options", collection)?;
        self.inner.query_by_options(collection, filter).await
    }

    async fn update_by_id(&self, collection: &str, document: Document) -> Result<()> {
        self.check("update_by_id", collection)?;
        self.inner.update_by_id(collection, document).await
    }

    async fn remove_by_id(&self, collection: &str, id: &str) -> Result<()> {
        self.check("remove_by_id", collection)?;
        self.inner.remove_by_id(collection, id).await
    }

    async fn remove_by_options(&self, collection: &str, filter: &Filter) -> Result<()> {
        self.check("remove_by_options", collection)?;
        self.inner.remove_by_options(collection, filter).await
    }
}

/// A manager whose store can be told to fail, plus handles to both layers.
pub fn setup_failing_manager() -> (AccountManager, Arc<FailingStore>, Arc<InMemory>) {
    let inner = open_store();
    let failing = Arc::new(FailingStore::new(inner.clone()));
    (AccountManager::new(failing.clone()), failing, inner)
}
