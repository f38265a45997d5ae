//! Routes By Status Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use dispatch_app::domain::routes::records::RouteStatus;

use crate::{
    envelope::Envelope,
    extensions::*,
    routes::{
        errors::into_status_error,
        responses::{RouteResponse, route_list},
    },
    state::State,
};

/// Routes By Status Handler
#[endpoint(
    tags("shipment-routes"),
    summary = "List Routes By Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Routes retrieved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown route status"),
    ),
)]
pub(crate) async fn handler(
    status: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<RouteResponse>>>, StatusError> {
    let status = status
        .into_inner()
        .parse::<RouteStatus>()
        .or_400("invalid route status")?;

    let routes = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .routes
        .list_routes_by_status(status)
        .await
        .map_err(into_status_error)?;

    Ok(route_list(routes))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use dispatch_app::domain::routes::MockRoutesService;

    use crate::{routes::handlers::tests::make_route, test_helpers::routes_service};

    use super::*;

    fn make_service(routes: MockRoutesService) -> Service {
        routes_service(
            routes,
            Router::with_path("shipment-route/status/{status}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_filters_by_parsed_status() -> TestResult {
        let mut routes = MockRoutesService::new();

        routes
            .expect_list_routes_by_status()
            .once()
            .withf(|status| *status == RouteStatus::InProgress)
            .return_once(|_| Ok(vec![make_route(2, RouteStatus::InProgress, &[5])]));

        let body: Envelope<Vec<RouteResponse>> =
            TestClient::get("http://example.com/shipment-route/status/in_progress")
                .send(&make_service(routes))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut routes = MockRoutesService::new();

        routes.expect_list_routes_by_status().never();

        let res = TestClient::get("http://example.com/shipment-route/status/archived")
            .send(&make_service(routes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
