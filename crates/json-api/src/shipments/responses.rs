//! Shipment Responses

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dispatch_app::domain::shipments::records::{ShipmentRecord, StatusChangeRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShipmentResponse {
    pub id: i64,
    pub uuid: Uuid,

    /// Owning user
    pub user_id: i64,

    pub origin: String,
    pub destination: String,
    pub origin_address: String,
    pub destination_address: String,
    pub description: String,
    pub product_type: String,

    /// Kilograms
    pub weight: Decimal,

    /// Centimetres
    pub height: i32,
    pub width: i32,
    pub length: i32,

    pub declared_value: Decimal,
    pub is_fragile: bool,
    pub status: String,
    pub status_updated_at: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ShipmentRecord> for ShipmentResponse {
    fn from(shipment: ShipmentRecord) -> Self {
        Self {
            id: shipment.id.into_i64(),
            uuid: shipment.uuid.into_uuid(),
            user_id: shipment.user_id.into_i64(),
            origin: shipment.origin,
            destination: shipment.destination,
            origin_address: shipment.origin_address,
            destination_address: shipment.destination_address,
            description: shipment.description,
            product_type: shipment.product_type,
            weight: shipment.weight,
            height: shipment.height,
            width: shipment.width,
            length: shipment.length,
            declared_value: shipment.declared_value,
            is_fragile: shipment.is_fragile,
            status: shipment.status.to_string(),
            status_updated_at: shipment.status_updated_at.to_string(),
            created_at: shipment.created_at.to_string(),
            updated_at: shipment.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusChangeResponse {
    pub id: i64,
    pub shipment_id: i64,
    pub old_status: String,
    pub new_status: String,
    pub changed_at: String,
}

impl From<StatusChangeRecord> for StatusChangeResponse {
    fn from(change: StatusChangeRecord) -> Self {
        Self {
            id: change.id.into_i64(),
            shipment_id: change.shipment_id.into_i64(),
            old_status: change.old_status.to_string(),
            new_status: change.new_status.to_string(),
            changed_at: change.changed_at.to_string(),
        }
    }
}
