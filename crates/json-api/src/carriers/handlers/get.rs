//! Get Carrier Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use dispatch_app::domain::carriers::records::CarrierId;

use crate::{
    carriers::{errors::into_status_error, responses::CarrierResponse},
    envelope::Envelope,
    extensions::*,
    state::State,
};

/// Get Carrier Handler
#[endpoint(
    tags("carriers"),
    summary = "Get Carrier",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CarrierResponse>>, StatusError> {
    let carrier = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .carriers
        .get_carrier(CarrierId::from_i64(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok("Carrier retrieved", carrier.into()))
}
