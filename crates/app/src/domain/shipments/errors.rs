//! Shipments service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::shipments::records::ShipmentStatus;

#[derive(Debug, Error)]
pub enum ShipmentsServiceError {
    #[error("shipment already exists")]
    AlreadyExists,

    #[error("shipment not found")]
    NotFound,

    #[error("shipment belongs to another user")]
    Forbidden,

    #[error("only an administrator may set status {0}")]
    ReservedStatus(ShipmentStatus),

    #[error("shipment is bound to an open route")]
    Routed,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ShipmentsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
