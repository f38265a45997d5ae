//! Shipments Data

use rust_decimal::Decimal;

use crate::domain::shipments::records::ShipmentUuid;

/// New Shipment Data
///
/// Shipments are always created as pending; there is no status field.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShipment {
    pub uuid: ShipmentUuid,
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
}
