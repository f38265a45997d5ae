//! Get Route Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use dispatch_app::domain::routes::records::RouteId;

use crate::{
    envelope::Envelope,
    extensions::*,
    routes::{errors::into_status_error, responses::RouteResponse},
    state::State,
};

/// Get Route Handler
#[endpoint(
    tags("shipment-routes"),
    summary = "Get Route",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Route found"),
        (status_code = StatusCode::NOT_FOUND, description = "Route not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Envelope<RouteResponse>>, StatusError> {
    let route = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .routes
        .get_route(RouteId::from_i64(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok("Route found", route.into()))
}
