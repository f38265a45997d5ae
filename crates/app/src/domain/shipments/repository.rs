//! Shipments Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    shipments::{
        data::NewShipment,
        records::{
            ShipmentId, ShipmentRecord, ShipmentStatus, ShipmentUuid, StatusChangeId,
            StatusChangeRecord,
        },
    },
    users::records::UserId,
};

const CREATE_SHIPMENT_SQL: &str = include_str!("sql/create_shipment.sql");
const GET_SHIPMENT_SQL: &str = include_str!("sql/get_shipment.sql");
const GET_SHIPMENT_BY_UUID_SQL: &str = include_str!("sql/get_shipment_by_uuid.sql");
const LIST_USER_SHIPMENTS_SQL: &str = include_str!("sql/list_user_shipments.sql");
const LOCK_SHIPMENT_SQL: &str = include_str!("sql/lock_shipment.sql");
const LOCK_SHIPMENTS_SQL: &str = include_str!("sql/lock_shipments.sql");
const UPDATE_SHIPMENT_STATUS_SQL: &str = include_str!("sql/update_shipment_status.sql");
const APPEND_STATUS_CHANGE_SQL: &str = include_str!("sql/append_status_change.sql");
const LIST_STATUS_CHANGES_SQL: &str = include_str!("sql/list_status_changes.sql");
const HAS_OPEN_ROUTE_SQL: &str = include_str!("sql/has_open_route.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgShipmentsRepository;

impl PgShipmentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_shipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserId,
        shipment: &NewShipment,
    ) -> Result<ShipmentRecord, sqlx::Error> {
        query_as::<Postgres, ShipmentRecord>(CREATE_SHIPMENT_SQL)
            .bind(shipment.uuid.into_uuid())
            .bind(owner.into_i64())
            .bind(&shipment.origin)
            .bind(&shipment.destination)
            .bind(&shipment.origin_address)
            .bind(&shipment.destination_address)
            .bind(&shipment.description)
            .bind(&shipment.product_type)
            .bind(shipment.weight)
            .bind(shipment.height)
            .bind(shipment.width)
            .bind(shipment.length)
            .bind(shipment.declared_value)
            .bind(shipment.is_fragile)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_shipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shipment: ShipmentId,
    ) -> Result<ShipmentRecord, sqlx::Error> {
        query_as::<Postgres, ShipmentRecord>(GET_SHIPMENT_SQL)
            .bind(shipment.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_shipment_by_uuid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shipment: ShipmentUuid,
    ) -> Result<ShipmentRecord, sqlx::Error> {
        query_as::<Postgres, ShipmentRecord>(GET_SHIPMENT_BY_UUID_SQL)
            .bind(shipment.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_shipments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserId,
    ) -> Result<Vec<ShipmentRecord>, sqlx::Error> {
        query_as::<Postgres, ShipmentRecord>(LIST_USER_SHIPMENTS_SQL)
            .bind(owner.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Lock a single shipment row for the rest of the transaction.
    pub(crate) async fn lock_shipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shipment: ShipmentId,
    ) -> Result<Option<ShipmentRecord>, sqlx::Error> {
        query_as::<Postgres, ShipmentRecord>(LOCK_SHIPMENT_SQL)
            .bind(shipment.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lock every listed shipment row, in ascending id order. Missing ids are
    /// simply absent from the result.
    pub(crate) async fn lock_shipments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shipments: &[ShipmentId],
    ) -> Result<Vec<ShipmentRecord>, sqlx::Error> {
        let ids: Vec<i64> = shipments.iter().map(|id| id.into_i64()).collect();

        query_as::<Postgres, ShipmentRecord>(LOCK_SHIPMENTS_SQL)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await
    }

    /// Whether the shipment is bound to a route that has not released it.
    pub(crate) async fn has_open_route(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shipment: ShipmentId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(HAS_OPEN_ROUTE_SQL)
            .bind(shipment.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Move a shipment to `status` and append the matching history entry.
    ///
    /// Callers must hold the row lock and must not call this for a no-op
    /// transition.
    pub(crate) async fn transition_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shipment: &ShipmentRecord,
        status: ShipmentStatus,
    ) -> Result<(ShipmentRecord, StatusChangeRecord), sqlx::Error> {
        let updated = query_as::<Postgres, ShipmentRecord>(UPDATE_SHIPMENT_STATUS_SQL)
            .bind(shipment.id.into_i64())
            .bind(status)
            .fetch_one(&mut **tx)
            .await?;

        let change = query_as::<Postgres, StatusChangeRecord>(APPEND_STATUS_CHANGE_SQL)
            .bind(shipment.id.into_i64())
            .bind(shipment.status)
            .bind(status)
            .fetch_one(&mut **tx)
            .await?;

        Ok((updated, change))
    }

    pub(crate) async fn list_status_changes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shipment: ShipmentId,
    ) -> Result<Vec<StatusChangeRecord>, sqlx::Error> {
        query_as::<Postgres, StatusChangeRecord>(LIST_STATUS_CHANGES_SQL)
            .bind(shipment.into_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ShipmentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ShipmentId::from_i64(row.try_get("id")?),
            uuid: ShipmentUuid::from_uuid(row.try_get("uuid")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            origin: row.try_get("origin")?,
            destination: row.try_get("destination")?,
            origin_address: row.try_get("origin_address")?,
            destination_address: row.try_get("destination_address")?,
            description: row.try_get("description")?,
            product_type: row.try_get("product_type")?,
            weight: row.try_get("weight")?,
            height: row.try_get("height")?,
            width: row.try_get("width")?,
            length: row.try_get("length")?,
            declared_value: row.try_get("declared_value")?,
            is_fragile: row.try_get("is_fragile")?,
            status: row.try_get("status")?,
            status_updated_at: row
                .try_get::<SqlxTimestamp, _>("status_updated_at")?
                .to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StatusChangeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: StatusChangeId::from_i64(row.try_get("id")?),
            shipment_id: ShipmentId::from_i64(row.try_get("shipment_id")?),
            old_status: row.try_get("old_status")?,
            new_status: row.try_get("new_status")?,
            changed_at: row.try_get::<SqlxTimestamp, _>("changed_at")?.to_jiff(),
        })
    }
}
