//! Update Shipment Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use dispatch_app::domain::shipments::records::{ShipmentId, ShipmentStatus};

use crate::{
    envelope::Envelope,
    extensions::*,
    shipments::{errors::into_status_error, responses::ShipmentResponse},
    state::State,
};

/// Update Shipment Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateShipmentStatusRequest {
    /// One of `pending`, `processing`, `in_transit`, `delivered`, `cancelled`, `returned`
    pub status: String,
}

/// Update Shipment Status Handler
///
/// Every effective change is recorded in the shipment's history.
#[endpoint(
    tags("shipments"),
    summary = "Update Shipment Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status, or a change only an admin may make"),
        (status_code = StatusCode::FORBIDDEN, description = "Shipment belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Shipment not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateShipmentStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ShipmentResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.claims_or_401()?.actor();

    let status = json
        .into_inner()
        .status
        .parse::<ShipmentStatus>()
        .or_400("invalid status")?;

    let shipment = state
        .app
        .shipments
        .update_status(ShipmentId::from_i64(id.into_inner()), status, actor)
        .await
        .map_err(into_status_error)?;

    info!(shipment_id = %shipment.id, status = %shipment.status, "shipment status set");

    Ok(Envelope::ok("Shipment status updated", shipment.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use dispatch_app::domain::shipments::{MockShipmentsService, ShipmentsServiceError};

    use crate::{
        envelope::ErrorEnvelope,
        test_helpers::{TEST_USER_ID, make_shipment, shipments_service},
    };

    use super::*;

    fn make_service(shipments: MockShipmentsService) -> Service {
        shipments_service(
            shipments,
            Router::with_path("shipments/{id}/status").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_update_status_parses_the_status() -> TestResult {
        let mut shipments = MockShipmentsService::new();

        shipments
            .expect_update_status()
            .once()
            .withf(|id, status, actor| {
                *id == ShipmentId::from_i64(4)
                    && *status == ShipmentStatus::Processing
                    && actor.user == TEST_USER_ID
            })
            .return_once(|_, _, _| Ok(make_shipment(4, ShipmentStatus::Processing)));

        let mut res = TestClient::patch("http://example.com/shipments/4/status")
            .json(&json!({ "status": "processing" }))
            .send(&make_service(shipments))
            .await;

        let body: Envelope<ShipmentResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.status, "processing");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_unknown_status_returns_400() -> TestResult {
        let mut shipments = MockShipmentsService::new();

        shipments.expect_update_status().never();

        let res = TestClient::patch("http://example.com/shipments/4/status")
            .json(&json!({ "status": "lost" }))
            .send(&make_service(shipments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_by_stranger_returns_403() -> TestResult {
        let mut shipments = MockShipmentsService::new();

        shipments
            .expect_update_status()
            .once()
            .return_once(|_, _, _| Err(ShipmentsServiceError::Forbidden));

        let res = TestClient::patch("http://example.com/shipments/4/status")
            .json(&json!({ "status": "cancelled" }))
            .send(&make_service(shipments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_to_delivered_by_owner_returns_400() -> TestResult {
        let mut shipments = MockShipmentsService::new();

        shipments
            .expect_update_status()
            .once()
            .return_once(|_, status, _| Err(ShipmentsServiceError::ReservedStatus(status)));

        let mut res = TestClient::patch("http://example.com/shipments/4/status")
            .json(&json!({ "status": "delivered" }))
            .send(&make_service(shipments))
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(!body.success);
        assert_eq!(body.message, "only an administrator may set status delivered");

        Ok(())
    }
}
