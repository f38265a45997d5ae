//! Route Shipments Repository
//!
//! Bindings between routes and shipments. A binding is open until its route
//! reaches a terminal status; storage allows one open binding per shipment.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    routes::records::{RouteId, RouteShipmentRecord},
    shipments::records::{ShipmentId, ShipmentRecord},
};

const CREATE_ROUTE_SHIPMENTS_SQL: &str = include_str!("../sql/create_route_shipments.sql");
const LIST_ROUTE_SHIPMENTS_SQL: &str = include_str!("../sql/list_route_shipments.sql");
const LIST_DELIVERABLE_SHIPMENT_IDS_SQL: &str =
    include_str!("../sql/list_deliverable_shipment_ids.sql");
const RELEASE_ROUTE_SHIPMENTS_SQL: &str = include_str!("../sql/release_route_shipments.sql");
const RECLAIM_ROUTE_SHIPMENTS_SQL: &str = include_str!("../sql/reclaim_route_shipments.sql");

/// Binding row tagged with the route it belongs to.
#[derive(Debug)]
pub(crate) struct RouteShipmentRow {
    pub route_id: RouteId,
    pub record: RouteShipmentRecord,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRouteShipmentsRepository;

impl PgRouteShipmentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_route_shipments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route: RouteId,
        shipments: &[ShipmentId],
    ) -> Result<u64, sqlx::Error> {
        let ids: Vec<i64> = shipments.iter().map(|id| id.into_i64()).collect();

        let rows_affected = query(CREATE_ROUTE_SHIPMENTS_SQL)
            .bind(route.into_i64())
            .bind(ids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Every binding of the given routes, open or released, in binding order.
    pub(crate) async fn list_route_shipments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        routes: &[RouteId],
    ) -> Result<Vec<RouteShipmentRow>, sqlx::Error> {
        let ids: Vec<i64> = routes.iter().map(|id| id.into_i64()).collect();

        query_as::<Postgres, RouteShipmentRow>(LIST_ROUTE_SHIPMENTS_SQL)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await
    }

    /// Shipments of the route that have not been claimed by another open
    /// route, ascending.
    pub(crate) async fn list_deliverable_shipment_ids(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route: RouteId,
    ) -> Result<Vec<ShipmentId>, sqlx::Error> {
        let ids: Vec<i64> = query_scalar(LIST_DELIVERABLE_SHIPMENT_IDS_SQL)
            .bind(route.into_i64())
            .fetch_all(&mut **tx)
            .await?;

        Ok(ids.into_iter().map(ShipmentId::from_i64).collect())
    }

    pub(crate) async fn release_route_shipments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route: RouteId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RELEASE_ROUTE_SHIPMENTS_SQL)
            .bind(route.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Re-open released bindings. Fails with a unique violation when one of
    /// the shipments has since joined another open route.
    pub(crate) async fn reclaim_route_shipments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route: RouteId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RECLAIM_ROUTE_SHIPMENTS_SQL)
            .bind(route.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for RouteShipmentRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            route_id: RouteId::from_i64(row.try_get("route_id")?),
            record: RouteShipmentRecord {
                shipment: ShipmentRecord::from_row(row)?,
                assigned_at: row.try_get::<SqlxTimestamp, _>("assigned_at")?.to_jiff(),
                released_at: row
                    .try_get::<Option<SqlxTimestamp>, _>("released_at")?
                    .map(SqlxTimestamp::to_jiff),
            },
        })
    }
}
