//! User record types.
//!
//! This module defines the record held by the store and the request payloads
//! decoded from create and update bodies.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Identifier of a user record.
pub type UserId = i64;

/// A single user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier, assigned by the store.
    #[schema(example = 1)]
    pub id: UserId,

    /// Display name.
    #[schema(example = "John Doe")]
    pub name: String,

    /// Contact email. Not validated.
    #[schema(example = "john@example.com")]
    pub email: String,
}

impl User {
    /// Create a new user record.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Apply the fields present in `patch` to this record.
    pub fn apply(&mut self, patch: UpdateUser) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }
}

/// Payload for creating a user.
///
/// Any `id` in the body is accepted and discarded; missing or `null` fields
/// decode to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewUser {
    /// Ignored. The store assigns ids.
    #[serde(skip_serializing)]
    pub id: Option<UserId>,

    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "Bob")]
    pub name: String,

    /// Contact email.
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "bob@example.com")]
    pub email: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewUser {
    /// Create a payload from a name and email.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Payload for updating a user.
///
/// Absent fields leave the stored value unchanged. A present `id` renames
/// the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateUser {
    /// New identifier for the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,

    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<User> for UpdateUser {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id),
            name: Some(user.name),
            email: Some(user.email),
        }
    }
}
