//! Update Route Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use dispatch_app::domain::routes::records::{RouteId, RouteStatus};

use crate::{
    envelope::Envelope,
    extensions::*,
    routes::{errors::into_status_error, responses::RouteResponse},
    state::State,
};

/// Update Route Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateRouteStatusRequest {
    /// One of `pending`, `assigned`, `in_progress`, `completed`, `cancelled`
    pub status: String,
}

/// Update Route Status Handler
///
/// Completing a route delivers its shipments; cancelling releases them.
#[endpoint(
    tags("shipment-routes"),
    summary = "Update Route Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Route status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or shipment conflict"),
        (status_code = StatusCode::NOT_FOUND, description = "Route not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateRouteStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<RouteResponse>>, StatusError> {
    let status = json
        .into_inner()
        .status
        .parse::<RouteStatus>()
        .or_400("invalid route status")?;

    let route = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .routes
        .update_route_status(RouteId::from_i64(id.into_inner()), status)
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok("Route status updated", route.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use dispatch_app::domain::routes::{MockRoutesService, RoutesServiceError};

    use crate::{
        envelope::ErrorEnvelope, routes::handlers::tests::make_route,
        test_helpers::routes_service,
    };

    use super::*;

    fn make_service(routes: MockRoutesService) -> Service {
        routes_service(
            routes,
            Router::with_path("shipment-route/status/{id}").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_update_status_forwards_parsed_status() -> TestResult {
        let mut routes = MockRoutesService::new();

        routes
            .expect_update_route_status()
            .once()
            .withf(|id, status| *id == RouteId::from_i64(6) && *status == RouteStatus::Completed)
            .return_once(|_, _| Ok(make_route(6, RouteStatus::Completed, &[1])));

        let body: Envelope<RouteResponse> =
            TestClient::patch("http://example.com/shipment-route/status/6")
                .json(&json!({ "status": "completed" }))
                .send(&make_service(routes))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.status, "completed");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_unknown_status_returns_400() -> TestResult {
        let mut routes = MockRoutesService::new();

        routes.expect_update_route_status().never();

        let res = TestClient::patch("http://example.com/shipment-route/status/6")
            .json(&json!({ "status": "finished" }))
            .send(&make_service(routes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_unknown_route_returns_404() -> TestResult {
        let mut routes = MockRoutesService::new();

        routes
            .expect_update_route_status()
            .once()
            .return_once(|_, _| Err(RoutesServiceError::RouteNotFound));

        let mut res = TestClient::patch("http://example.com/shipment-route/status/6")
            .json(&json!({ "status": "cancelled" }))
            .send(&make_service(routes))
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(!body.success);
        assert_eq!(body.message, "Route not found");
        assert_eq!(body.error, "Not Found");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_reclaim_conflict_returns_400() -> TestResult {
        let mut routes = MockRoutesService::new();

        routes
            .expect_update_route_status()
            .once()
            .return_once(|_, _| Err(RoutesServiceError::ShipmentAlreadyRouted));

        let res = TestClient::patch("http://example.com/shipment-route/status/6")
            .json(&json!({ "status": "pending" }))
            .send(&make_service(routes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
