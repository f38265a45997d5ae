//! Route Handlers

pub(crate) mod by_carrier;
pub(crate) mod by_date_range;
pub(crate) mod by_shipment;
pub(crate) mod by_shipment_status;
pub(crate) mod by_status;
pub(crate) mod create;
pub(crate) mod detail;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update_status;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use dispatch_app::domain::{
        routes::records::{RouteId, RouteRecord, RouteShipmentRecord, RouteStatus, RouteUuid},
        shipments::records::ShipmentStatus,
    };

    use crate::test_helpers::{make_carrier, make_shipment};

    pub(super) fn make_route(id: i64, status: RouteStatus, shipments: &[i64]) -> RouteRecord {
        RouteRecord {
            id: RouteId::from_i64(id),
            uuid: RouteUuid::new(),
            carrier: make_carrier(1),
            origin_address: Some("Depot 1".to_string()),
            destination_address: None,
            notes: None,
            status,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            shipments: shipments
                .iter()
                .map(|&shipment| RouteShipmentRecord {
                    shipment: make_shipment(shipment, ShipmentStatus::InTransit),
                    assigned_at: Timestamp::UNIX_EPOCH,
                    released_at: None,
                })
                .collect(),
        }
    }
}
