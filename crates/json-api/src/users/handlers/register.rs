//! Register User Handler

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use dispatch_app::domain::users::{
    data::{NewUser, Password},
    records::{Role, UserUuid},
};

use crate::{
    envelope::Envelope,
    extensions::*,
    state::State,
    users::{errors::into_status_error, responses::UserResponse},
    validation,
};

/// Register User Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterUserRequest {
    pub username: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RegisterUserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegisterUserRequest {
    fn validate(&self) -> Result<(), StatusError> {
        validation::length_between("username", &self.username, 5, 50)?;
        validation::length_between("last_name", &self.last_name, 5, 50)?;
        validation::phone_number("phone_number", &self.phone_number)?;
        validation::email(&self.email)?;
        validation::strong_password(&self.password)?;

        if self.password != self.confirm_password {
            return Err(StatusError::bad_request().brief("passwords do not match"));
        }

        Ok(())
    }
}

impl From<RegisterUserRequest> for NewUser {
    fn from(request: RegisterUserRequest) -> Self {
        NewUser {
            uuid: UserUuid::new(),
            username: request.username.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            phone_number: request.phone_number,
            email: request.email.trim().to_string(),
            password: Password::new(request.password),
            role: Role::User,
        }
    }
}

/// Register User Handler
///
/// Public sign-up. Accounts created here always get the `user` role.
#[endpoint(
    tags("users"),
    summary = "Register User",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<UserResponse>>, StatusError> {
    let request = json.into_inner();

    request.validate()?;

    let user = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .users
        .register(request.into())
        .await
        .map_err(into_status_error)?;

    info!(user_id = %user.id, "registered user");

    res.status_code(StatusCode::CREATED);

    Ok(Envelope::ok("User registered", user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use dispatch_app::domain::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::{make_user, users_service};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        users_service(users, Router::with_path("users/register").post(handler))
    }

    fn payload() -> Value {
        json!({
            "username": "anacl",
            "last_name": "Lopez",
            "phone_number": "3001234567",
            "email": "ana@example.com",
            "password": "Sup3r$ecret",
            "confirm_password": "Sup3r$ecret",
        })
    }

    #[tokio::test]
    async fn test_register_returns_201_with_user() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_register()
            .once()
            .withf(|new| {
                new.email == "ana@example.com"
                    && new.role == Role::User
                    && new.password.expose() == "Sup3r$ecret"
            })
            .return_once(|_| Ok(make_user()));

        let mut res = TestClient::post("http://example.com/users/register")
            .json(&payload())
            .send(&make_service(users))
            .await;

        let body: Envelope<UserResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(body.success, "envelope should report success");
        assert_eq!(body.data.email, "ana@example.com");
        assert_eq!(body.data.role, "user");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_role_cannot_be_chosen_by_the_client() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_register()
            .once()
            .withf(|new| new.role == Role::User)
            .return_once(|_| Ok(make_user()));

        let mut body = payload();
        body["role"] = json!("admin");

        let res = TestClient::post("http://example.com/users/register")
            .json(&body)
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email_returns_409() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_register()
            .once()
            .return_once(|_| Err(UsersServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/users/register")
            .json(&payload())
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_weak_password_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_register().never();

        let mut body = payload();
        body["password"] = json!("password");
        body["confirm_password"] = json!("password");

        let res = TestClient::post("http://example.com/users/register")
            .json(&body)
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_mismatched_confirmation_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_register().never();

        let mut body = payload();
        body["confirm_password"] = json!("Different1!");

        let res = TestClient::post("http://example.com/users/register")
            .json(&body)
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
