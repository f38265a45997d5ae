//! Routes By Shipment Status Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use dispatch_app::domain::shipments::records::ShipmentStatus;

use crate::{
    envelope::Envelope,
    extensions::*,
    routes::{
        errors::into_status_error,
        responses::{RouteResponse, route_list},
    },
    state::State,
};

/// Routes By Shipment Status Handler
///
/// Routes carrying at least one shipment currently in the given status.
#[endpoint(
    tags("shipment-routes"),
    summary = "List Routes By Shipment Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Routes retrieved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown shipment status"),
    ),
)]
pub(crate) async fn handler(
    status: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<RouteResponse>>>, StatusError> {
    let status = status
        .into_inner()
        .parse::<ShipmentStatus>()
        .or_400("invalid shipment status")?;

    let routes = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .routes
        .list_routes_by_shipment_status(status)
        .await
        .map_err(into_status_error)?;

    Ok(route_list(routes))
}
