//! Routes service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    carriers::records::CarrierId,
    shipments::records::{ShipmentId, ShipmentStatus},
};

/// Partial unique index holding a shipment to a single open route.
const ACTIVE_SHIPMENT_CONSTRAINT: &str = "route_shipments_active_shipment_unique";

#[derive(Debug, Error)]
pub enum RoutesServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("route already exists")]
    AlreadyExists,

    #[error("route not found")]
    RouteNotFound,

    #[error("carrier {0} not found")]
    CarrierNotFound(CarrierId),

    #[error("carrier {0} is not active")]
    CarrierInactive(CarrierId),

    #[error("shipment {0} not found")]
    ShipmentNotFound(ShipmentId),

    #[error("shipment {shipment} is {status}, only pending shipments can be routed")]
    ShipmentNotPending {
        shipment: ShipmentId,
        status: ShipmentStatus,
    },

    #[error("shipment is already assigned to an open route")]
    ShipmentAlreadyRouted,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for RoutesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::RouteNotFound;
        }

        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        match database_error.kind() {
            ErrorKind::UniqueViolation
                if database_error.constraint() == Some(ACTIVE_SHIPMENT_CONSTRAINT) =>
            {
                Self::ShipmentAlreadyRouted
            }
            ErrorKind::UniqueViolation => Self::AlreadyExists,
            ErrorKind::ForeignKeyViolation => Self::InvalidReference,
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => Self::InvalidData,
            ErrorKind::Other | _ => Self::Sql(error),
        }
    }
}
