//! Shipment Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::Envelope,
    extensions::*,
    shipments::{errors::into_status_error, responses::ShipmentResponse},
    state::State,
};

/// Shipment Index Handler
///
/// Lists the caller's own shipments.
#[endpoint(
    tags("shipments"),
    summary = "List My Shipments",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ShipmentResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.claims_or_401()?.subject_id;

    let shipments = state
        .app
        .shipments
        .list_user_shipments(owner)
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok(
        "Shipments retrieved",
        shipments.into_iter().map(Into::into).collect(),
    ))
}
