//! In-memory user store.
//!
//! This module provides the process-wide collection of user records and the
//! five operations over it: list, create, get, update and delete.

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::user::{NewUser, UpdateUser, User, UserId};

/// The records present when a seeded store starts.
#[must_use]
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(1, "John Doe", "john@example.com"),
        User::new(2, "Jane Doe", "jane@example.com"),
    ]
}

/// Storage engine for user records.
///
/// Records are keyed by id and kept in insertion order. Ids handed out by
/// [`UserStore::create`] come from a counter that only moves forward, so a
/// deleted id is never reissued.
///
/// All access goes through an internal lock; share the store between request
/// handlers with an `Arc`.
#[derive(Debug)]
pub struct UserStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    users: IndexMap<UserId, User>,
    next_id: UserId,
}

impl UserStore {
    /// Create an empty store. The first created user gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: IndexMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store holding the two seed records.
    #[must_use]
    pub fn seeded() -> Self {
        let users = seed_users();
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(Inner {
                users: users.into_iter().map(|u| (u.id, u)).collect(),
                next_id,
            }),
        }
    }

    /// Create a store from existing records, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdConflict`] if two records share an id.
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Result<Self> {
        let mut map = IndexMap::new();
        let mut next_id: UserId = 1;
        for user in users {
            if map.contains_key(&user.id) {
                return Err(Error::IdConflict { id: user.id });
            }
            next_id = next_id.max(user.id.saturating_add(1));
            map.insert(user.id, user);
        }
        Ok(Self {
            inner: RwLock::new(Inner {
                users: map,
                next_id,
            }),
        })
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    /// Check if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().users.is_empty()
    }

    /// All records, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.inner.read().users.values().cloned().collect()
    }

    /// Append a new record and return it with its assigned id.
    ///
    /// Any id carried by `candidate` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the id space is exhausted.
    pub fn create(&self, candidate: NewUser) -> Result<User> {
        let mut inner = self.inner.write();

        let id = inner.next_id;
        inner.next_id = id
            .checked_add(1)
            .ok_or_else(|| Error::internal("user id space exhausted"))?;

        if let Some(ignored) = candidate.id {
            debug!("Ignoring client-supplied id {} on create", ignored);
        }

        let user = User::new(id, candidate.name, candidate.email);
        inner.users.insert(id, user.clone());
        debug!("Created user {}", id);
        Ok(user)
    }

    /// Get a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UserNotFound`] if no record has this id.
    pub fn get(&self, id: UserId) -> Result<User> {
        self.inner
            .read()
            .users
            .get(&id)
            .cloned()
            .ok_or(Error::UserNotFound { id })
    }

    /// Apply `patch` to the record with `id` and return the result.
    ///
    /// Fields missing from the patch keep their current values. If the patch
    /// carries a new id the record is renamed in place and keeps its position
    /// in the listing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UserNotFound`] if no record has this id, or
    /// [`Error::IdConflict`] if the new id belongs to another record. The
    /// store is unchanged in both cases.
    pub fn update(&self, id: UserId, patch: UpdateUser) -> Result<User> {
        let mut inner = self.inner.write();

        let Some(index) = inner.users.get_index_of(&id) else {
            return Err(Error::UserNotFound { id });
        };

        let new_id = patch.id.unwrap_or(id);
        if new_id != id && inner.users.contains_key(&new_id) {
            warn!("Rejected update of user {} to taken id {}", id, new_id);
            return Err(Error::IdConflict { id: new_id });
        }

        let mut user = inner.users[index].clone();
        user.apply(patch);

        if new_id == id {
            inner.users[index] = user.clone();
        } else {
            inner.users.shift_remove_index(index);
            inner.users.shift_insert(index, new_id, user.clone());
            if new_id >= inner.next_id {
                inner.next_id = new_id.saturating_add(1);
            }
            debug!("Renamed user {} to {}", id, new_id);
        }

        debug!("Updated user {}", new_id);
        Ok(user)
    }

    /// Remove the record with `id` and return it.
    ///
    /// The remaining records keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UserNotFound`] if no record has this id.
    pub fn delete(&self, id: UserId) -> Result<User> {
        let removed = self
            .inner
            .write()
            .users
            .shift_remove(&id)
            .ok_or(Error::UserNotFound { id })?;
        debug!("Deleted user {}", id);
        Ok(removed)
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
