//! User and principal models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{MAX_NAME_LENGTH, MIN_NAME_LENGTH};

/// User record of the local credential table
///
/// Email uniqueness is checked at signup time only; nothing enforces it
/// persistently. `last_activity` is advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub last_activity: DateTime<Utc>,
}

impl User {
    /// The capability view of this user
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Authenticated identity attributed to the current session, regardless of
/// which identity backend produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    pub is_admin: bool,
}

/// Profile persisted in the session storage slot (never carries the
/// password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl SessionProfile {
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id.clone(),
            is_admin: self.is_admin,
        }
    }
}

impl From<&User> for SessionProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Signup request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = MIN_NAME_LENGTH, max = MAX_NAME_LENGTH))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    pub password: String,
}
