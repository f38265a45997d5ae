//! Auth service errors.

use thiserror::Error;

use crate::auth::ApiTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown, expired, revoked or malformed bearer token. Callers see one
    /// variant for all of these so a token's state is never disclosed.
    #[error("token not found")]
    NotFound,

    #[error("token storage failed")]
    Sql(#[from] sqlx::Error),

    #[error("token could not be issued")]
    Token(#[from] ApiTokenError),

    #[error("token lifetime is out of range")]
    Expiry(#[source] jiff::Error),
}
