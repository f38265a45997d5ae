//! List Routes Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::Envelope,
    extensions::*,
    routes::{
        errors::into_status_error,
        responses::{RouteResponse, route_list},
    },
    state::State,
};

/// List Routes Handler
#[endpoint(
    tags("shipment-routes"),
    summary = "List Routes",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Routes retrieved"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<RouteResponse>>>, StatusError> {
    let routes = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .routes
        .list_routes()
        .await
        .map_err(into_status_error)?;

    Ok(route_list(routes))
}
