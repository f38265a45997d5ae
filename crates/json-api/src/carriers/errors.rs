//! Errors

use salvo::http::StatusError;
use tracing::error;

use dispatch_app::domain::carriers::CarriersServiceError;

pub(crate) fn into_status_error(error: CarriersServiceError) -> StatusError {
    match error {
        CarriersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Carrier already exists")
        }
        CarriersServiceError::NotFound => StatusError::not_found().brief("Carrier not found"),
        CarriersServiceError::MissingRequiredData | CarriersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid carrier payload")
        }
        CarriersServiceError::Sql(source) => {
            error!("carrier storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
