//! Create Route Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use dispatch_app::domain::{
    carriers::records::CarrierId,
    routes::{data::NewRoute, records::RouteUuid},
    shipments::records::ShipmentId,
};

use crate::{
    envelope::Envelope,
    extensions::*,
    routes::{errors::into_status_error, responses::RouteResponse},
    state::State,
};

/// Create Route Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateRouteRequest {
    pub carrier_id: i64,

    /// Pending shipments to put in transit; each may appear once
    pub shipment_ids: Vec<i64>,

    pub origin_address: Option<String>,
    pub destination_address: Option<String>,
    pub notes: Option<String>,
}

impl From<CreateRouteRequest> for NewRoute {
    fn from(request: CreateRouteRequest) -> Self {
        NewRoute {
            uuid: RouteUuid::new(),
            carrier_id: CarrierId::from_i64(request.carrier_id),
            shipment_ids: request
                .shipment_ids
                .into_iter()
                .map(ShipmentId::from_i64)
                .collect::<SmallVec<_>>(),
            origin_address: request.origin_address,
            destination_address: request.destination_address,
            notes: request.notes,
        }
    }
}

/// Create Route Handler
///
/// Binds pending shipments to an active carrier and puts them in transit.
#[endpoint(
    tags("shipment-routes"),
    summary = "Create Route",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Route created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown or unavailable carrier or shipment"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateRouteRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<RouteResponse>>, StatusError> {
    let route = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .routes
        .create_route(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/shipment-route/detail/{}", route.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Envelope::ok("Route created", route.into()))
}
