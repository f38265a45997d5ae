//! Routes service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carriers::{records::CarrierId, repository::PgCarriersRepository},
        routes::{
            data::{DateRange, NewRoute},
            errors::RoutesServiceError,
            records::{RouteId, RouteRecord, RouteShipmentRecord, RouteStatus, RouteUuid},
            repositories::{PgRouteShipmentsRepository, PgRoutesRepository},
        },
        shipments::{
            records::{ShipmentId, ShipmentStatus},
            repository::PgShipmentsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgRoutesService {
    db: Db,
    routes_repository: PgRoutesRepository,
    route_shipments_repository: PgRouteShipmentsRepository,
    shipments_repository: PgShipmentsRepository,
    carriers_repository: PgCarriersRepository,
}

impl PgRoutesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            routes_repository: PgRoutesRepository::new(),
            route_shipments_repository: PgRouteShipmentsRepository::new(),
            shipments_repository: PgShipmentsRepository::new(),
            carriers_repository: PgCarriersRepository::new(),
        }
    }

    /// Fill in the bound shipments of each route.
    async fn attach_shipments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut routes: Vec<RouteRecord>,
    ) -> Result<Vec<RouteRecord>, sqlx::Error> {
        if routes.is_empty() {
            return Ok(routes);
        }

        let ids: Vec<RouteId> = routes.iter().map(|route| route.id).collect();

        let rows = self
            .route_shipments_repository
            .list_route_shipments(tx, &ids)
            .await?;

        let mut by_route: FxHashMap<RouteId, Vec<RouteShipmentRecord>> = FxHashMap::default();

        for row in rows {
            by_route.entry(row.route_id).or_default().push(row.record);
        }

        for route in &mut routes {
            if let Some(shipments) = by_route.remove(&route.id) {
                route.shipments = shipments;
            }
        }

        Ok(routes)
    }

    async fn load_route(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route: RouteId,
    ) -> Result<RouteRecord, sqlx::Error> {
        let route = self.routes_repository.get_route(tx, route).await?;

        self.attach_shipments(tx, vec![route])
            .await?
            .pop()
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Deliver every shipment still held by a completed route.
    async fn deliver_route_shipments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route: RouteId,
    ) -> Result<usize, sqlx::Error> {
        let ids = self
            .route_shipments_repository
            .list_deliverable_shipment_ids(tx, route)
            .await?;

        let shipments = self.shipments_repository.lock_shipments(tx, &ids).await?;

        let mut delivered = 0;

        for shipment in shipments
            .iter()
            .filter(|shipment| shipment.status != ShipmentStatus::Delivered)
        {
            self.shipments_repository
                .transition_status(tx, shipment, ShipmentStatus::Delivered)
                .await?;

            delivered += 1;
        }

        Ok(delivered)
    }
}

/// Reject empty or repeated shipment lists, returning the ids ascending.
fn sorted_unique_shipments(route: &NewRoute) -> Result<Vec<ShipmentId>, RoutesServiceError> {
    if route.shipment_ids.is_empty() {
        return Err(RoutesServiceError::InvalidArgument(
            "at least one shipment is required".to_string(),
        ));
    }

    let mut ids = route.shipment_ids.to_vec();

    ids.sort_unstable();

    if ids.windows(2).any(|pair| pair.first() == pair.last()) {
        return Err(RoutesServiceError::InvalidArgument(
            "shipment ids must be unique".to_string(),
        ));
    }

    Ok(ids)
}

#[async_trait]
impl RoutesService for PgRoutesService {
    async fn create_route(&self, route: NewRoute) -> Result<RouteRecord, RoutesServiceError> {
        let shipment_ids = sorted_unique_shipments(&route)?;

        let mut tx = self.db.begin().await?;

        let carrier = self
            .carriers_repository
            .lock_carrier(&mut tx, route.carrier_id)
            .await?
            .ok_or(RoutesServiceError::CarrierNotFound(route.carrier_id))?;

        if !carrier.is_active {
            return Err(RoutesServiceError::CarrierInactive(carrier.id));
        }

        let shipments = self
            .shipments_repository
            .lock_shipments(&mut tx, &shipment_ids)
            .await?;

        for id in &shipment_ids {
            let shipment = shipments
                .iter()
                .find(|shipment| shipment.id == *id)
                .ok_or(RoutesServiceError::ShipmentNotFound(*id))?;

            if shipment.status != ShipmentStatus::Pending {
                return Err(RoutesServiceError::ShipmentNotPending {
                    shipment: shipment.id,
                    status: shipment.status,
                });
            }
        }

        let route_id = self.routes_repository.create_route(&mut tx, &route).await?;

        self.route_shipments_repository
            .create_route_shipments(&mut tx, route_id, &shipment_ids)
            .await?;

        for shipment in &shipments {
            self.shipments_repository
                .transition_status(&mut tx, shipment, ShipmentStatus::InTransit)
                .await?;
        }

        let created = self.load_route(&mut tx, route_id).await?;

        tx.commit().await?;

        info!(
            route_id = %created.id,
            carrier_id = %created.carrier.id,
            shipments = created.shipments.len(),
            "created route"
        );

        Ok(created)
    }

    async fn update_route_status(
        &self,
        route: RouteId,
        status: RouteStatus,
    ) -> Result<RouteRecord, RoutesServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .routes_repository
            .lock_route(&mut tx, route)
            .await?
            .ok_or(RoutesServiceError::RouteNotFound)?;

        if current.is_terminal() && !status.is_terminal() {
            self.route_shipments_repository
                .reclaim_route_shipments(&mut tx, route)
                .await?;
        }

        self.routes_repository
            .update_route_status(&mut tx, route, status)
            .await?;

        let delivered = if status == RouteStatus::Completed {
            self.deliver_route_shipments(&mut tx, route).await?
        } else {
            0
        };

        if status.is_terminal() {
            self.route_shipments_repository
                .release_route_shipments(&mut tx, route)
                .await?;
        }

        let updated = self.load_route(&mut tx, route).await?;

        tx.commit().await?;

        info!(
            route_id = %route,
            old_status = %current,
            new_status = %status,
            delivered,
            "route status changed"
        );

        Ok(updated)
    }

    async fn list_routes(&self) -> Result<Vec<RouteRecord>, RoutesServiceError> {
        let mut tx = self.db.begin().await?;

        let routes = self.routes_repository.list_routes(&mut tx).await?;
        let routes = self.attach_shipments(&mut tx, routes).await?;

        tx.commit().await?;

        Ok(routes)
    }

    async fn list_routes_by_status(
        &self,
        status: RouteStatus,
    ) -> Result<Vec<RouteRecord>, RoutesServiceError> {
        let mut tx = self.db.begin().await?;

        let routes = self
            .routes_repository
            .list_routes_by_status(&mut tx, status)
            .await?;

        let routes = self.attach_shipments(&mut tx, routes).await?;

        tx.commit().await?;

        Ok(routes)
    }

    async fn get_route(&self, route: RouteId) -> Result<RouteRecord, RoutesServiceError> {
        let mut tx = self.db.begin().await?;

        let route = self.load_route(&mut tx, route).await?;

        tx.commit().await?;

        Ok(route)
    }

    async fn get_route_by_uuid(&self, route: RouteUuid) -> Result<RouteRecord, RoutesServiceError> {
        let mut tx = self.db.begin().await?;

        let route = self
            .routes_repository
            .get_route_by_uuid(&mut tx, route)
            .await?;

        let route = self
            .attach_shipments(&mut tx, vec![route])
            .await?
            .pop()
            .ok_or(RoutesServiceError::RouteNotFound)?;

        tx.commit().await?;

        Ok(route)
    }

    async fn list_routes_by_shipment(
        &self,
        shipment: ShipmentId,
    ) -> Result<Vec<RouteRecord>, RoutesServiceError> {
        let mut tx = self.db.begin().await?;

        let routes = self
            .routes_repository
            .list_routes_by_shipment(&mut tx, shipment)
            .await?;

        let routes = self.attach_shipments(&mut tx, routes).await?;

        tx.commit().await?;

        Ok(routes)
    }

    async fn list_routes_by_carrier(
        &self,
        carrier: CarrierId,
    ) -> Result<Vec<RouteRecord>, RoutesServiceError> {
        let mut tx = self.db.begin().await?;

        let routes = self
            .routes_repository
            .list_routes_by_carrier(&mut tx, carrier)
            .await?;

        let routes = self.attach_shipments(&mut tx, routes).await?;

        tx.commit().await?;

        Ok(routes)
    }

    async fn list_routes_by_date_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<RouteRecord>, RoutesServiceError> {
        if range.start > range.end {
            return Err(RoutesServiceError::InvalidArgument(format!(
                "start date {} is after end date {}",
                range.start, range.end
            )));
        }

        let (from, to) = range
            .bounds()
            .map_err(|error| RoutesServiceError::InvalidArgument(error.to_string()))?;

        let mut tx = self.db.begin().await?;

        let routes = self
            .routes_repository
            .list_routes_by_date_range(&mut tx, from, to)
            .await?;

        let routes = self.attach_shipments(&mut tx, routes).await?;

        tx.commit().await?;

        Ok(routes)
    }

    async fn list_routes_by_shipment_status(
        &self,
        status: ShipmentStatus,
    ) -> Result<Vec<RouteRecord>, RoutesServiceError> {
        let mut tx = self.db.begin().await?;

        let routes = self.routes_repository.list_routes(&mut tx).await?;
        let routes = self.attach_shipments(&mut tx, routes).await?;

        tx.commit().await?;

        Ok(routes
            .into_iter()
            .filter(|route| {
                route
                    .shipments
                    .iter()
                    .any(|bound| bound.shipment.status == status)
            })
            .collect())
    }
}

#[automock]
#[async_trait]
pub trait RoutesService: Send + Sync {
    /// Bind pending shipments to a carrier and put them in transit.
    ///
    /// Either the route, every binding, and every shipment transition are
    /// stored together, or nothing is.
    async fn create_route(&self, route: NewRoute) -> Result<RouteRecord, RoutesServiceError>;

    /// Change a route's status. Completing a route delivers its shipments.
    async fn update_route_status(
        &self,
        route: RouteId,
        status: RouteStatus,
    ) -> Result<RouteRecord, RoutesServiceError>;

    /// All routes, ascending by id.
    async fn list_routes(&self) -> Result<Vec<RouteRecord>, RoutesServiceError>;

    async fn list_routes_by_status(
        &self,
        status: RouteStatus,
    ) -> Result<Vec<RouteRecord>, RoutesServiceError>;

    async fn get_route(&self, route: RouteId) -> Result<RouteRecord, RoutesServiceError>;

    async fn get_route_by_uuid(&self, route: RouteUuid) -> Result<RouteRecord, RoutesServiceError>;

    /// Routes that ever carried the shipment.
    async fn list_routes_by_shipment(
        &self,
        shipment: ShipmentId,
    ) -> Result<Vec<RouteRecord>, RoutesServiceError>;

    async fn list_routes_by_carrier(
        &self,
        carrier: CarrierId,
    ) -> Result<Vec<RouteRecord>, RoutesServiceError>;

    /// Routes created on any day of the range, both ends inclusive.
    async fn list_routes_by_date_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<RouteRecord>, RoutesServiceError>;

    /// Routes holding at least one shipment currently in `status`.
    async fn list_routes_by_shipment_status(
        &self,
        status: ShipmentStatus,
    ) -> Result<Vec<RouteRecord>, RoutesServiceError>;
}
