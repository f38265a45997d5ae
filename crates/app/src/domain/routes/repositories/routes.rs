//! Routes Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    carriers::records::{CarrierId, CarrierRecord, CarrierUuid},
    routes::{
        data::NewRoute,
        records::{RouteId, RouteRecord, RouteStatus, RouteUuid},
    },
    shipments::records::ShipmentId,
};

const CREATE_ROUTE_SQL: &str = include_str!("../sql/create_route.sql");
const GET_ROUTE_SQL: &str = include_str!("../sql/get_route.sql");
const GET_ROUTE_BY_UUID_SQL: &str = include_str!("../sql/get_route_by_uuid.sql");
const LOCK_ROUTE_SQL: &str = include_str!("../sql/lock_route.sql");
const UPDATE_ROUTE_STATUS_SQL: &str = include_str!("../sql/update_route_status.sql");
const LIST_ROUTES_SQL: &str = include_str!("../sql/list_routes.sql");
const LIST_ROUTES_BY_STATUS_SQL: &str = include_str!("../sql/list_routes_by_status.sql");
const LIST_ROUTES_BY_CARRIER_SQL: &str = include_str!("../sql/list_routes_by_carrier.sql");
const LIST_ROUTES_BY_SHIPMENT_SQL: &str = include_str!("../sql/list_routes_by_shipment.sql");
const LIST_ROUTES_BY_DATE_RANGE_SQL: &str = include_str!("../sql/list_routes_by_date_range.sql");

/// Route rows come back with their carrier but without shipments; those are
/// attached separately.
#[derive(Debug, Clone, Default)]
pub(crate) struct PgRoutesRepository;

impl PgRoutesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_route(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route: &NewRoute,
    ) -> Result<RouteId, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_ROUTE_SQL)
            .bind(route.uuid.into_uuid())
            .bind(route.carrier_id.into_i64())
            .bind(route.origin_address.as_deref())
            .bind(route.destination_address.as_deref())
            .bind(route.notes.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        Ok(RouteId::from_i64(id))
    }

    pub(crate) async fn get_route(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route: RouteId,
    ) -> Result<RouteRecord, sqlx::Error> {
        query_as::<Postgres, RouteRecord>(GET_ROUTE_SQL)
            .bind(route.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_route_by_uuid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route: RouteUuid,
    ) -> Result<RouteRecord, sqlx::Error> {
        query_as::<Postgres, RouteRecord>(GET_ROUTE_BY_UUID_SQL)
            .bind(route.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock the route row and return its current status.
    pub(crate) async fn lock_route(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route: RouteId,
    ) -> Result<Option<RouteStatus>, sqlx::Error> {
        query_scalar(LOCK_ROUTE_SQL)
            .bind(route.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_route_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route: RouteId,
        status: RouteStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ROUTE_STATUS_SQL)
            .bind(route.into_i64())
            .bind(status)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_routes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<RouteRecord>, sqlx::Error> {
        query_as::<Postgres, RouteRecord>(LIST_ROUTES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_routes_by_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: RouteStatus,
    ) -> Result<Vec<RouteRecord>, sqlx::Error> {
        query_as::<Postgres, RouteRecord>(LIST_ROUTES_BY_STATUS_SQL)
            .bind(status)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_routes_by_carrier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        carrier: CarrierId,
    ) -> Result<Vec<RouteRecord>, sqlx::Error> {
        query_as::<Postgres, RouteRecord>(LIST_ROUTES_BY_CARRIER_SQL)
            .bind(carrier.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Routes that ever held the shipment, whether or not they still do.
    pub(crate) async fn list_routes_by_shipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shipment: ShipmentId,
    ) -> Result<Vec<RouteRecord>, sqlx::Error> {
        query_as::<Postgres, RouteRecord>(LIST_ROUTES_BY_SHIPMENT_SQL)
            .bind(shipment.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Routes created within `[from, to]`, both ends inclusive.
    pub(crate) async fn list_routes_by_date_range(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<RouteRecord>, sqlx::Error> {
        query_as::<Postgres, RouteRecord>(LIST_ROUTES_BY_DATE_RANGE_SQL)
            .bind(SqlxTimestamp::from(from))
            .bind(SqlxTimestamp::from(to))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for RouteRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let carrier = CarrierRecord {
            id: CarrierId::from_i64(row.try_get("carrier_id")?),
            uuid: CarrierUuid::from_uuid(row.try_get("carrier_uuid")?),
            name: row.try_get("carrier_name")?,
            phone: row.try_get("carrier_phone")?,
            vehicle_model: row.try_get("carrier_vehicle_model")?,
            vehicle_plate: row.try_get("carrier_vehicle_plate")?,
            is_active: row.try_get("carrier_is_active")?,
            created_at: row
                .try_get::<SqlxTimestamp, _>("carrier_created_at")?
                .to_jiff(),
            updated_at: row
                .try_get::<SqlxTimestamp, _>("carrier_updated_at")?
                .to_jiff(),
        };

        Ok(Self {
            id: RouteId::from_i64(row.try_get("id")?),
            uuid: RouteUuid::from_uuid(row.try_get("uuid")?),
            carrier,
            origin_address: row.try_get("origin_address")?,
            destination_address: row.try_get("destination_address")?,
            notes: row.try_get("notes")?,
            status: row.try_get("status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            shipments: Vec::new(),
        })
    }
}
