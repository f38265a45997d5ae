//! Route Detail Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use dispatch_app::domain::routes::records::RouteUuid;

use crate::{
    envelope::Envelope,
    extensions::*,
    routes::{errors::into_status_error, responses::RouteResponse},
    state::State,
};

/// Route Detail Handler
///
/// Looks a route up by its public UUID.
#[endpoint(
    tags("shipment-routes"),
    summary = "Get Route Detail",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Route found"),
        (status_code = StatusCode::NOT_FOUND, description = "Route not found"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<RouteResponse>>, StatusError> {
    let route = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .routes
        .get_route_by_uuid(RouteUuid::from_uuid(uuid.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok("Route found", route.into()))
}
