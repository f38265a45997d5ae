//! Login Handler

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use dispatch_app::{
    auth::IssuedToken,
    domain::users::data::{Credentials, Password},
};

use crate::{
    envelope::Envelope,
    extensions::*,
    state::State,
    users::{errors::into_status_error, responses::UserResponse},
    validation,
};

/// Login Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Debug for LoginRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            email: request.email.trim().to_string(),
            password: Password::new(request.password),
        }
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token; shown once and never stored in plain form
    pub token: String,

    pub expires_at: String,

    pub user: UserResponse,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at.to_string(),
            user: issued.user.into(),
        }
    }
}

/// Login Handler
///
/// Exchanges credentials for a bearer token.
#[endpoint(
    tags("users"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<LoginResponse>>, StatusError> {
    let request = json.into_inner();

    validation::email(&request.email)?;
    validation::not_blank("password", &request.password)?;

    let issued = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .users
        .login(request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok("Login successful", issued.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use dispatch_app::domain::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::{make_user, users_service};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        users_service(users, Router::with_path("users/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_returns_token() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_login()
            .once()
            .withf(|credentials| {
                credentials.email == "ana@example.com"
                    && credentials.password.expose() == "Sup3r$ecret"
            })
            .return_once(|_| {
                Ok(IssuedToken {
                    token: "dp_v1_abc.def".to_string(),
                    expires_at: Timestamp::UNIX_EPOCH,
                    user: make_user(),
                })
            });

        let mut res = TestClient::post("http://example.com/users/login")
            .json(&json!({ "email": "ana@example.com", "password": "Sup3r$ecret" }))
            .send(&make_service(users))
            .await;

        let body: Envelope<LoginResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.token, "dp_v1_abc.def");
        assert_eq!(body.data.user.email, "ana@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_bad_credentials_returns_401() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_login()
            .once()
            .return_once(|_| Err(UsersServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/users/login")
            .json(&json!({ "email": "ana@example.com", "password": "wrong" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_malformed_email_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_login().never();

        let res = TestClient::post("http://example.com/users/login")
            .json(&json!({ "email": "not-an-email", "password": "Sup3r$ecret" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
