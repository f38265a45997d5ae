//! Shipment Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{UnknownVariantError, users::records::UserId},
    ids::{TypedId, TypedUuid},
};

/// Shipment ID
pub type ShipmentId = TypedId<ShipmentRecord>;

/// Shipment UUID
pub type ShipmentUuid = TypedUuid<ShipmentRecord>;

/// Status Change ID
pub type StatusChangeId = TypedId<StatusChangeRecord>;

/// Lifecycle of a shipment. New shipments start as `Pending`; assignment to a
/// route moves them to `InTransit` and route completion to `Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "shipment_status", rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    Processing,
    InTransit,
    Delivered,
    Cancelled,
    Returned,
}

impl ShipmentStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Processing,
        Self::InTransit,
        Self::Delivered,
        Self::Cancelled,
        Self::Returned,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Returned => "returned",
        }
    }

    /// Statuses driven by route progress; owners cannot set them directly.
    #[must_use]
    pub const fn is_route_driven(self) -> bool {
        matches!(self, Self::InTransit | Self::Delivered)
    }
}

impl Display for ShipmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = UnknownVariantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownVariantError::new("shipment status", value))
    }
}

/// Shipment Record
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentRecord {
    pub id: ShipmentId,
    pub uuid: ShipmentUuid,
    pub user_id: UserId,
    pub origin: String,
    pub destination: String,
    pub origin_address: String,
    pub destination_address: String,
    pub description: String,
    pub product_type: String,
    pub weight: Decimal,
    pub height: i32,
    pub width: i32,
    pub length: i32,
    pub declared_value: Decimal,
    pub is_fragile: bool,
    pub status: ShipmentStatus,
    pub status_updated_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One entry in a shipment's append-only status history.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChangeRecord {
    pub id: StatusChangeId,
    pub shipment_id: ShipmentId,
    pub old_status: ShipmentStatus,
    pub new_status: ShipmentStatus,
    pub changed_at: Timestamp,
}
