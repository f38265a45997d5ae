//! Shipment History Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use dispatch_app::domain::shipments::records::ShipmentId;

use crate::{
    envelope::Envelope,
    extensions::*,
    shipments::{errors::into_status_error, responses::StatusChangeResponse},
    state::State,
};

/// Shipment History Handler
///
/// Status transitions, oldest first.
#[endpoint(
    tags("shipments"),
    summary = "Shipment Status History",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<StatusChangeResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.claims_or_401()?.actor();

    let history = state
        .app
        .shipments
        .status_history(ShipmentId::from_i64(id.into_inner()), actor)
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok(
        "Status history retrieved",
        history.into_iter().map(Into::into).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use dispatch_app::domain::shipments::{
        MockShipmentsService, ShipmentsServiceError,
        records::{ShipmentStatus, StatusChangeId, StatusChangeRecord},
    };

    use crate::test_helpers::shipments_service;

    use super::*;

    fn make_service(shipments: MockShipmentsService) -> Service {
        shipments_service(
            shipments,
            Router::with_path("shipments/{id}/history").get(handler),
        )
    }

    fn change(id: i64, old: ShipmentStatus, new: ShipmentStatus) -> StatusChangeRecord {
        StatusChangeRecord {
            id: StatusChangeId::from_i64(id),
            shipment_id: ShipmentId::from_i64(9),
            old_status: old,
            new_status: new,
            changed_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_history_keeps_service_order() -> TestResult {
        let mut shipments = MockShipmentsService::new();

        shipments
            .expect_status_history()
            .once()
            .withf(|id, _| *id == ShipmentId::from_i64(9))
            .return_once(|_, _| {
                Ok(vec![
                    change(1, ShipmentStatus::Pending, ShipmentStatus::InTransit),
                    change(2, ShipmentStatus::InTransit, ShipmentStatus::Delivered),
                ])
            });

        let body: Envelope<Vec<StatusChangeResponse>> =
            TestClient::get("http://example.com/shipments/9/history")
                .send(&make_service(shipments))
                .await
                .take_json()
                .await?;

        let transitions: Vec<(&str, &str)> = body
            .data
            .iter()
            .map(|change| (change.old_status.as_str(), change.new_status.as_str()))
            .collect();

        assert_eq!(
            transitions,
            vec![("pending", "in_transit"), ("in_transit", "delivered")]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_history_of_unknown_shipment_returns_404() -> TestResult {
        let mut shipments = MockShipmentsService::new();

        shipments
            .expect_status_history()
            .once()
            .return_once(|_, _| Err(ShipmentsServiceError::NotFound));

        let res = TestClient::get("http://example.com/shipments/9/history")
            .send(&make_service(shipments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
