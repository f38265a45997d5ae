//! Update Carrier Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use dispatch_app::domain::carriers::{data::CarrierUpdate, records::CarrierId};

use crate::{
    carriers::{
        errors::into_status_error,
        handlers::{validate_name, validate_phone, validate_vehicle},
        responses::CarrierResponse,
    },
    envelope::Envelope,
    extensions::*,
    state::State,
};

/// Update Carrier Request
///
/// Omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCarrierRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateCarrierRequest {
    fn validate(&self) -> Result<(), StatusError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }

        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }

        validate_vehicle(self.vehicle_model.as_deref(), self.vehicle_plate.as_deref())
    }
}

impl From<UpdateCarrierRequest> for CarrierUpdate {
    fn from(request: UpdateCarrierRequest) -> Self {
        CarrierUpdate {
            name: request.name.map(|name| name.trim().to_string()),
            phone: request.phone,
            vehicle_model: request.vehicle_model,
            vehicle_plate: request.vehicle_plate,
            is_active: request.is_active,
        }
    }
}

/// Update Carrier Handler
#[endpoint(
    tags("carriers"),
    summary = "Update Carrier",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Carrier updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Carrier not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateCarrierRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CarrierResponse>>, StatusError> {
    let request = json.into_inner();

    request.validate()?;

    let carrier = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .carriers
        .update_carrier(CarrierId::from_i64(id.into_inner()), request.into())
        .await
        .map_err(into_status_error)?;

    info!(carrier_id = %carrier.id, "updated carrier");

    Ok(Envelope::ok("Carrier updated", carrier.into()))
}
