//! Get Shipment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use dispatch_app::domain::shipments::records::ShipmentUuid;

use crate::{
    envelope::Envelope,
    extensions::*,
    shipments::{errors::into_status_error, responses::ShipmentResponse},
    state::State,
};

/// Get Shipment Handler
///
/// Owners see their own shipments; admins see any.
#[endpoint(
    tags("shipments"),
    summary = "Get Shipment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Shipment found"),
        (status_code = StatusCode::FORBIDDEN, description = "Shipment belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Shipment not found"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ShipmentResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.claims_or_401()?.actor();

    let shipment = state
        .app
        .shipments
        .get_shipment_by_uuid(ShipmentUuid::from_uuid(uuid.into_inner()), actor)
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok("Shipment retrieved", shipment.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use dispatch_app::domain::{
        shipments::{MockShipmentsService, ShipmentsServiceError, records::ShipmentStatus},
        users::records::Role,
    };

    use crate::test_helpers::{TEST_USER_ID, make_shipment, shipments_service};

    use super::*;

    fn make_service(shipments: MockShipmentsService) -> Service {
        shipments_service(shipments, Router::with_path("shipments/{uuid}").get(handler))
    }

    #[tokio::test]
    async fn test_get_passes_the_caller_as_actor() -> TestResult {
        let shipment = make_shipment(3, ShipmentStatus::Pending);
        let uuid = shipment.uuid;

        let mut shipments = MockShipmentsService::new();

        shipments
            .expect_get_shipment_by_uuid()
            .once()
            .withf(move |u, actor| {
                *u == uuid && actor.user == TEST_USER_ID && actor.role == Role::User
            })
            .return_once(move |_, _| Ok(shipment));

        let body: Envelope<ShipmentResponse> =
            TestClient::get(format!("http://example.com/shipments/{uuid}"))
                .send(&make_service(shipments))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.id, 3);
        assert_eq!(body.data.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_someone_elses_shipment_returns_403() -> TestResult {
        let mut shipments = MockShipmentsService::new();

        shipments
            .expect_get_shipment_by_uuid()
            .once()
            .return_once(|_, _| Err(ShipmentsServiceError::Forbidden));

        let res = TestClient::get(format!("http://example.com/shipments/{}", Uuid::now_v7()))
            .send(&make_service(shipments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_shipment_returns_404() -> TestResult {
        let mut shipments = MockShipmentsService::new();

        shipments
            .expect_get_shipment_by_uuid()
            .once()
            .return_once(|_, _| Err(ShipmentsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/shipments/{}", Uuid::now_v7()))
            .send(&make_service(shipments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
