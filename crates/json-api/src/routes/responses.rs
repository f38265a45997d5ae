//! Route Responses

use std::string::ToString;

use salvo::{oapi::ToSchema, prelude::Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dispatch_app::domain::routes::records::{RouteRecord, RouteShipmentRecord};

use crate::{
    carriers::responses::CarrierResponse, envelope::Envelope,
    shipments::responses::ShipmentResponse,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RouteResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub carrier: CarrierResponse,
    pub origin_address: Option<String>,
    pub destination_address: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,

    /// Every shipment the route carried, released ones included
    pub shipments: Vec<RouteShipmentResponse>,
}

impl From<RouteRecord> for RouteResponse {
    fn from(route: RouteRecord) -> Self {
        Self {
            id: route.id.into_i64(),
            uuid: route.uuid.into_uuid(),
            carrier: route.carrier.into(),
            origin_address: route.origin_address,
            destination_address: route.destination_address,
            notes: route.notes,
            status: route.status.to_string(),
            created_at: route.created_at.to_string(),
            updated_at: route.updated_at.to_string(),
            shipments: route.shipments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RouteShipmentResponse {
    pub shipment: ShipmentResponse,
    pub assigned_at: String,

    /// Set once the route was completed or cancelled
    pub released_at: Option<String>,
}

impl From<RouteShipmentRecord> for RouteShipmentResponse {
    fn from(bound: RouteShipmentRecord) -> Self {
        Self {
            shipment: bound.shipment.into(),
            assigned_at: bound.assigned_at.to_string(),
            released_at: bound.released_at.as_ref().map(ToString::to_string),
        }
    }
}

pub(crate) fn route_list(routes: Vec<RouteRecord>) -> Json<Envelope<Vec<RouteResponse>>> {
    Envelope::ok(
        "Routes retrieved",
        routes.into_iter().map(Into::into).collect(),
    )
}
