//! Errors

use salvo::http::StatusError;
use tracing::error;

use dispatch_app::domain::shipments::ShipmentsServiceError;

pub(crate) fn into_status_error(error: ShipmentsServiceError) -> StatusError {
    match error {
        ShipmentsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Shipment already exists")
        }
        ShipmentsServiceError::NotFound => StatusError::not_found().brief("Shipment not found"),
        ShipmentsServiceError::Forbidden => {
            StatusError::forbidden().brief("Shipment belongs to another user")
        }
        error @ (ShipmentsServiceError::ReservedStatus(_) | ShipmentsServiceError::Routed) => {
            StatusError::bad_request().brief(error.to_string())
        }
        ShipmentsServiceError::InvalidReference
        | ShipmentsServiceError::MissingRequiredData
        | ShipmentsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid shipment payload")
        }
        ShipmentsServiceError::Sql(source) => {
            error!("shipment storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
