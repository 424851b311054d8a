use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input, already shape-checked by the caller.
#[derive(Clone, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub fullname: String,
    pub password: String,
}

/// Login input
#[derive(Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterInput")
            .field("email", &self.email)
            .field("fullname", &self.fullname)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput").field("email", &self.email).finish_non_exhaustive()
    }
}

/// Stored user as seen by the service, including the password hash.
///
/// Not serializable; convert with [`UserRecord::profile`] before leaving the service.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub fullname: String,
    pub password_hash: String,
}

impl UserRecord {
    pub fn profile(&self) -> PublicProfile {
        PublicProfile { user_id: self.id, email: self.email.clone(), fullname: self.fullname.clone() }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("fullname", &self.fullname)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// The part of a user that may be returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub email: String,
    pub fullname: String,
}

/// Successful login: the profile plus the identifier repeated at top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub data: PublicProfile,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

impl From<PublicProfile> for AuthSession {
    fn from(data: PublicProfile) -> Self {
        let user_id = data.user_id;
        Self { data, user_id }
    }
}
