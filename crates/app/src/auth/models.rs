//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    auth::ApiTokenVersion,
    domain::users::records::{Role, UserId, UserRecord, UserUuid},
};

/// Authenticated caller identity.
///
/// Produced by bearer authentication and handed to handlers and services in
/// place of any raw token payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub subject_id: UserId,
    pub subject_uuid: UserUuid,
    pub role: Role,
    pub email: String,
}

impl Claims {
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor {
            user: self.subject_id,
            role: self.role,
        }
    }
}

/// Who is performing an operation, for ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user: UserId,
    pub role: Role,
}

impl Actor {
    /// Owners may act on their own records; admins on anyone's.
    #[must_use]
    pub fn may_access(self, owner: UserId) -> bool {
        self.role.is_admin() || self.user == owner
    }
}

/// API token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub version: ApiTokenVersion,

    /// SHA-256 verifier for the token secret material.
    pub token_hash: String,

    pub user: UserRecord,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub user_id: UserId,
    pub version: ApiTokenVersion,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewApiToken {
    pub uuid: Uuid,
    pub user_id: UserId,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Login result carrying the one-time raw token.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: UserRecord,
}
