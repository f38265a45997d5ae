//! Carriers Data

use crate::domain::carriers::records::CarrierUuid;

/// New Carrier Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCarrier {
    pub uuid: CarrierUuid,
    pub name: String,
    pub phone: String,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: Option<String>,
}

/// Carrier Update Data
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarrierUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: Option<String>,
    pub is_active: Option<bool>,
}
