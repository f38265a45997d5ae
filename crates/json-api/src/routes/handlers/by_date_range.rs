//! Routes By Date Range Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{oapi::extract::QueryParam, prelude::*};

use dispatch_app::domain::routes::data::DateRange;

use crate::{
    envelope::Envelope,
    extensions::*,
    routes::{
        errors::into_status_error,
        responses::{RouteResponse, route_list},
    },
    state::State,
};

/// Routes By Date Range Handler
///
/// Routes created between `start_date` and `end_date` (`YYYY-MM-DD`, both
/// inclusive, UTC).
#[endpoint(
    tags("shipment-routes"),
    summary = "List Routes By Creation Date",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Routes retrieved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed or inverted date range"),
    ),
)]
pub(crate) async fn handler(
    start_date: QueryParam<String, true>,
    end_date: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<RouteResponse>>>, StatusError> {
    let range = DateRange {
        start: start_date
            .into_inner()
            .parse::<Date>()
            .or_400("invalid start_date")?,
        end: end_date
            .into_inner()
            .parse::<Date>()
            .or_400("invalid end_date")?,
    };

    let routes = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .routes
        .list_routes_by_date_range(range)
        .await
        .map_err(into_status_error)?;

    Ok(route_list(routes))
}
