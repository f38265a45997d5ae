//! Create Carrier Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use dispatch_app::domain::carriers::{data::NewCarrier, records::CarrierUuid};

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

/// Create Carrier Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCarrierRequest {
    pub name: String,
    pub phone: String,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: Option<String>,
}

impl CreateCarrierRequest {
    fn validate(&self) -> Result<(), StatusError> {
        validate_name(&self.name)?;
        validate_phone(&self.phone)?;
        validate_vehicle(self.vehicle_model.as_deref(), self.vehicle_plate.as_deref())
    }
}

impl From<CreateCarrierRequest> for NewCarrier {
    fn from(request: CreateCarrierRequest) -> Self {
        NewCarrier {
            uuid: CarrierUuid::new(),
            name: request.name.trim().to_string(),
            phone: request.phone,
            vehicle_model: request.vehicle_model,
            vehicle_plate: request.vehicle_plate,
        }
    }
}

/// Create Carrier Handler
#[endpoint(
    tags("carriers"),
    summary = "Create Carrier",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Carrier created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCarrierRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<CarrierResponse>>, StatusError> {
    let request = json.into_inner();

    request.validate()?;

    let carrier = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .carriers
        .create_carrier(request.into())
        .await
        .map_err(into_status_error)?;

    info!(carrier_id = %carrier.id, "created carrier");

    res.add_header(LOCATION, format!("/carriers/{}", carrier.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Envelope::ok("Carrier created", carrier.into()))
}
