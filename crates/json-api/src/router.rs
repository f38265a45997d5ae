//! App Router

use salvo::Router;

use crate::{auth, carriers, healthcheck, observability, routes, shipments, users};

/// Every API route. State injection and request logging are added by the caller.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("users")
                .push(Router::with_path("register").post(users::register::handler))
                .push(Router::with_path("login").post(users::login::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(shipments_router())
                .push(
                    Router::new()
                        .hoop(auth::admin::handler)
                        .push(carriers_router())
                        .push(shipment_routes_router()),
                ),
        )
}

fn shipments_router() -> Router {
    Router::with_path("shipments")
        .get(shipments::index::handler)
        .post(shipments::create::handler)
        .push(Router::with_path("{uuid}").get(shipments::get::handler))
        .push(
            Router::with_path("{id}")
                .push(Router::with_path("status").patch(shipments::update_status::handler))
                .push(Router::with_path("history").get(shipments::history::handler)),
        )
}

fn carriers_router() -> Router {
    Router::with_path("carriers")
        .get(carriers::index::handler)
        .post(carriers::create::handler)
        .push(
            Router::with_path("{id}")
                .get(carriers::get::handler)
                .put(carriers::update::handler)
                .delete(carriers::delete::handler),
        )
}

fn shipment_routes_router() -> Router {
    Router::with_path("shipment-route")
        .push(Router::with_path("create").post(routes::create::handler))
        .push(Router::with_path("list").get(routes::index::handler))
        .push(Router::with_path("status/{id}").patch(routes::update_status::handler))
        .push(Router::with_path("status/{status}").get(routes::by_status::handler))
        .push(Router::with_path("id/{id}").get(routes::get::handler))
        .push(Router::with_path("detail/{uuid}").get(routes::detail::handler))
        .push(Router::with_path("shipment/{shipment_id}").get(routes::by_shipment::handler))
        .push(Router::with_path("carrier/{carrier_id}").get(routes::by_carrier::handler))
        .push(Router::with_path("date-range").get(routes::by_date_range::handler))
        .push(
            Router::with_path("shipment-status/{status}")
                .get(routes::by_shipment_status::handler),
        )
}
