//! Errors

use salvo::http::StatusError;
use tracing::error;

use dispatch_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("A user with this email already exists")
        }
        UsersServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::Sql(source) => {
            error!("user storage failed: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Password(source) => {
            error!("password processing failed: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Token(source) => {
            error!("token issuance failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
