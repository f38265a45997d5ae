//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{IssuedToken, PgAuthService, hash_password, verify_password},
    database::Db,
    domain::users::{
        data::{Credentials, NewUser},
        errors::UsersServiceError,
        records::UserRecord,
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    auth: PgAuthService,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db, auth: PgAuthService) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            auth,
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let password_hash = hash_password(user.password.expose())?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(&mut tx, &user, &password_hash)
            .await?;

        tx.commit().await?;

        info!(user_id = %created.id, role = %created.role, "registered user");

        Ok(created)
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .find_user_credentials(&mut tx, &credentials.email)
            .await?;

        tx.commit().await?;

        let Some(found) = found else {
            return Err(UsersServiceError::InvalidCredentials);
        };

        if !verify_password(credentials.password.expose(), &found.password_hash)? {
            return Err(UsersServiceError::InvalidCredentials);
        }

        Ok(self.auth.issue_token(&found.user).await?)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Create an account. The role is taken from the payload; public
    /// registration always supplies [`Role::User`](crate::domain::users::records::Role).
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Check credentials and issue a bearer token.
    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, UsersServiceError>;
}
