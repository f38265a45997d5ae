//! Carrier Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dispatch_app::domain::carriers::records::CarrierRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CarrierResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub phone: String,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: Option<String>,

    /// Inactive carriers cannot take new routes
    pub is_active: bool,

    pub created_at: String,
    pub updated_at: String,
}

impl From<CarrierRecord> for CarrierResponse {
    fn from(carrier: CarrierRecord) -> Self {
        Self {
            id: carrier.id.into_i64(),
            uuid: carrier.uuid.into_uuid(),
            name: carrier.name,
            phone: carrier.phone,
            vehicle_model: carrier.vehicle_model,
            vehicle_plate: carrier.vehicle_plate,
            is_active: carrier.is_active,
            created_at: carrier.created_at.to_string(),
            updated_at: carrier.updated_at.to_string(),
        }
    }
}
