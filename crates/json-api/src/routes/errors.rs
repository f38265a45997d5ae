//! Errors

use salvo::http::StatusError;
use tracing::error;

use dispatch_app::domain::routes::RoutesServiceError;

pub(crate) fn into_status_error(error: RoutesServiceError) -> StatusError {
    match error {
        RoutesServiceError::RouteNotFound => StatusError::not_found().brief("Route not found"),
        RoutesServiceError::AlreadyExists => StatusError::conflict().brief("Route already exists"),
        // The brief names the offending carrier or shipment.
        error @ (RoutesServiceError::InvalidArgument(_)
        | RoutesServiceError::CarrierNotFound(_)
        | RoutesServiceError::CarrierInactive(_)
        | RoutesServiceError::ShipmentNotFound(_)
        | RoutesServiceError::ShipmentNotPending { .. }
        | RoutesServiceError::ShipmentAlreadyRouted) => {
            StatusError::bad_request().brief(error.to_string())
        }
        RoutesServiceError::InvalidReference | RoutesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid route payload")
        }
        RoutesServiceError::Sql(source) => {
            error!("route storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
