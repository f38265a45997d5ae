//! Route Repositories

mod route_shipments;
mod routes;

pub(crate) use route_shipments::PgRouteShipmentsRepository;
pub(crate) use routes::PgRoutesRepository;
