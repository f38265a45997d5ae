//! Carrier Records

use jiff::Timestamp;

use crate::ids::{TypedId, TypedUuid};

/// Carrier ID
pub type CarrierId = TypedId<CarrierRecord>;

/// Carrier UUID
pub type CarrierUuid = TypedUuid<CarrierRecord>;

/// Carrier Record
///
/// Carriers are never removed; deactivation clears `is_active`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierRecord {
    pub id: CarrierId,
    pub uuid: CarrierUuid,
    pub name: String,
    pub phone: String,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
