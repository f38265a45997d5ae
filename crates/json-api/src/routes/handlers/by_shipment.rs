//! Routes By Shipment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use dispatch_app::domain::shipments::records::ShipmentId;

use crate::{
    envelope::Envelope,
    extensions::*,
    routes::{
        errors::into_status_error,
        responses::{RouteResponse, route_list},
    },
    state::State,
};

/// Routes By Shipment Handler
///
/// Every route that ever carried the shipment, released bindings included.
#[endpoint(
    tags("shipment-routes"),
    summary = "List Routes By Shipment",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    shipment_id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<RouteResponse>>>, StatusError> {
    let routes = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .routes
        .list_routes_by_shipment(ShipmentId::from_i64(shipment_id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(route_list(routes))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use dispatch_app::domain::routes::{MockRoutesService, records::RouteStatus};

    use crate::{routes::handlers::tests::make_route, test_helpers::routes_service};

    use super::*;

    #[tokio::test]
    async fn test_lists_routes_for_shipment() -> TestResult {
        let mut routes = MockRoutesService::new();

        routes
            .expect_list_routes_by_shipment()
            .once()
            .withf(|shipment| *shipment == ShipmentId::from_i64(10))
            .return_once(|_| {
                Ok(vec![
                    make_route(1, RouteStatus::Cancelled, &[10]),
                    make_route(2, RouteStatus::InProgress, &[10]),
                ])
            });

        let service = routes_service(
            routes,
            Router::with_path("shipment-route/shipment/{shipment_id}").get(handler),
        );

        let body: Envelope<Vec<RouteResponse>> =
            TestClient::get("http://example.com/shipment-route/shipment/10")
                .send(&service)
                .await
                .take_json()
                .await?;

        assert_eq!(
            body.data.iter().map(|route| route.id).collect::<Vec<_>>(),
            vec![1, 2]
        );

        Ok(())
    }
}
