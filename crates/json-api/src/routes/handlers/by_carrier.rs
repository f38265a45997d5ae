//! Routes By Carrier Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use dispatch_app::domain::carriers::records::CarrierId;

use crate::{
    envelope::Envelope,
    extensions::*,
    routes::{
        errors::into_status_error,
        responses::{RouteResponse, route_list},
    },
    state::State,
};

/// Routes By Carrier Handler
#[endpoint(
    tags("shipment-routes"),
    summary = "List Routes By Carrier",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    carrier_id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<RouteResponse>>>, StatusError> {
    let routes = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .routes
        .list_routes_by_carrier(CarrierId::from_i64(carrier_id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(route_list(routes))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use dispatch_app::domain::routes::{MockRoutesService, RoutesServiceError};

    use crate::test_helpers::routes_service;

    use super::*;

    fn make_service(routes: MockRoutesService) -> Service {
        routes_service(
            routes,
            Router::with_path("shipment-route/carrier/{carrier_id}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_carrier_without_routes_returns_empty_list() -> TestResult {
        let mut routes = MockRoutesService::new();

        routes
            .expect_list_routes_by_carrier()
            .once()
            .withf(|carrier| *carrier == CarrierId::from_i64(3))
            .return_once(|_| Ok(Vec::new()));

        let body: Envelope<Vec<RouteResponse>> =
            TestClient::get("http://example.com/shipment-route/carrier/3")
                .send(&make_service(routes))
                .await
                .take_json()
                .await?;

        assert!(body.success);
        assert!(body.data.is_empty(), "no routes expected");

        Ok(())
    }

    #[tokio::test]
    async fn test_database_failure_returns_500() -> TestResult {
        let mut routes = MockRoutesService::new();

        routes
            .expect_list_routes_by_carrier()
            .once()
            .return_once(|_| Err(RoutesServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/shipment-route/carrier/3")
            .send(&make_service(routes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
