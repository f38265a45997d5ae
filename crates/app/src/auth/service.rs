//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenVersion, AuthServiceError, Claims, IssuedToken, compute_verifier,
        format_api_token, generate_api_token_secret,
        models::NewApiToken,
        parse_api_token,
        repository::PgAuthRepository,
        verifiers_match,
    },
    database::Db,
    domain::users::records::UserRecord,
};

/// Lifetime of a token issued at login unless configured otherwise.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(12);

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    token_ttl: SignedDuration,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: &Db, token_ttl: SignedDuration) -> Self {
        Self {
            repository: PgAuthRepository::new(db.pool().clone()),
            token_ttl,
        }
    }

    /// Issue a new bearer token for the given user.
    pub async fn issue_token(&self, user: &UserRecord) -> Result<IssuedToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);
        let token_hash = compute_verifier(&token_uuid, version, user.uuid, &secret);

        let expires_at = Timestamp::now()
            .checked_add(self.token_ttl)
            .map_err(AuthServiceError::Expiry)?;

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_id: user.id,
                version,
                token_hash,
                expires_at,
            })
            .await?;

        Ok(IssuedToken {
            token,
            expires_at: metadata.expires_at,
            user: user.clone(),
        })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Claims, AuthServiceError> {
        let parsed_token =
            parse_api_token(bearer_token).map_err(|_error| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let verifier = compute_verifier(
            &parsed_token.token_uuid,
            parsed_token.version,
            token.user.uuid,
            &parsed_token.secret,
        );

        if !verifiers_match(&token.token_hash, &verifier) {
            return Err(AuthServiceError::NotFound);
        }

        Ok(Claims {
            subject_id: token.user.id,
            subject_uuid: token.user.uuid,
            role: token.user.role,
            email: token.user.email,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token into the caller's claims.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Claims, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::users::records::Role,
        test::{TestContext, helpers::register_user},
    };

    use super::*;

    #[tokio::test]
    async fn issued_tokens_authenticate_as_their_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "ana@example.com", Role::User).await?;

        let issued = ctx.auth.issue_token(&user).await?;
        let claims = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(claims.subject_id, user.id);
        assert_eq!(claims.subject_uuid, user.uuid);
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.email, "ana@example.com");
        assert!(issued.expires_at > Timestamp::now(), "token should expire in the future");

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "ben@example.com", Role::User).await?;
        let issued = ctx.auth.issue_token(&user).await?;

        let (id, _secret) = issued
            .token
            .split_once('.')
            .expect("issued tokens contain a secret");
        let forged = format!("{id}.{}", "0".repeat(64));

        let result = ctx.auth.authenticate_bearer(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_tokens_are_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "cy@example.com", Role::User).await?;

        let expired = PgAuthService::new(&ctx.app_db, SignedDuration::from_secs(-60));
        let issued = expired.issue_token(&user).await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_tokens_are_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
