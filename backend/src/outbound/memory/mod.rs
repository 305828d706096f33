//! In-process `UserRegistry` used by tests and local runs without a database.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::User;
use crate::domain::ports::{UserRegistry, UserRegistryError};

#[derive(Debug, Default)]
struct Store {
    by_email: HashMap<String, User>,
    ids: HashSet<Uuid>,
}

/// Mutex-guarded user map keyed by email.
///
/// Uniqueness checks and the insert happen under one lock, so concurrent
/// duplicate creates have exactly one winner. The email check runs before the
/// identifier check.
#[derive(Debug, Default)]
pub struct InMemoryUserRegistry {
    store: Mutex<Store>,
}

impl InMemoryUserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with `users`.
    ///
    /// Later entries sharing an email or identifier with an earlier one are
    /// skipped.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut store = Store::default();
        for user in users {
            if store.by_email.contains_key(user.email()) || store.ids.contains(user.id()) {
                continue;
            }
            store.ids.insert(*user.id());
            store.by_email.insert(user.email().to_owned(), user);
        }
        Self {
            store: Mutex::new(store),
        }
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.lock().by_email.len()
    }

    /// Whether the registry holds no users.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a user is registered under `email`.
    pub fn contains_email(&self, email: &str) -> bool {
        self.lock().by_email.contains_key(email)
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserRegistry for InMemoryUserRegistry {
    async fn get_user(&self, email: &str) -> Result<User, UserRegistryError> {
        self.lock()
            .by_email
            .get(email)
            .cloned()
            .ok_or_else(UserRegistryError::not_found)
    }

    async fn create_user(&self, user: &User) -> Result<(), UserRegistryError> {
        user.validate()
            .map_err(|err| UserRegistryError::malformed_input(err.to_string()))?;

        let mut store = self.lock();
        if store.by_email.contains_key(user.email()) {
            return Err(UserRegistryError::email_already_exists());
        }
        if store.ids.contains(user.id()) {
            return Err(UserRegistryError::id_already_exists());
        }
        store.ids.insert(*user.id());
        store.by_email.insert(user.email().to_owned(), user.clone());
        Ok(())
    }
}
