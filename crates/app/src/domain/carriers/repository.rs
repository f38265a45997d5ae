//! Carriers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::carriers::{
    data::{CarrierUpdate, NewCarrier},
    records::{CarrierId, CarrierRecord, CarrierUuid},
};

const CREATE_CARRIER_SQL: &str = include_str!("sql/create_carrier.sql");
const GET_CARRIER_SQL: &str = include_str!("sql/get_carrier.sql");
const LOCK_CARRIER_SQL: &str = include_str!("sql/lock_carrier.sql");
const LIST_CARRIERS_SQL: &str = include_str!("sql/list_carriers.sql");
const UPDATE_CARRIER_SQL: &str = include_str!("sql/update_carrier.sql");
const DEACTIVATE_CARRIER_SQL: &str = include_str!("sql/deactivate_carrier.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCarriersRepository;

impl PgCarriersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_carrier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        carrier: &NewCarrier,
    ) -> Result<CarrierRecord, sqlx::Error> {
        query_as::<Postgres, CarrierRecord>(CREATE_CARRIER_SQL)
            .bind(carrier.uuid.into_uuid())
            .bind(&carrier.name)
            .bind(&carrier.phone)
            .bind(carrier.vehicle_model.as_deref())
            .bind(carrier.vehicle_plate.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_carrier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        carrier: CarrierId,
    ) -> Result<CarrierRecord, sqlx::Error> {
        query_as::<Postgres, CarrierRecord>(GET_CARRIER_SQL)
            .bind(carrier.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Read a carrier and hold a share lock on it until the transaction ends,
    /// so it cannot be deactivated underneath an in-flight assignment.
    pub(crate) async fn lock_carrier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        carrier: CarrierId,
    ) -> Result<Option<CarrierRecord>, sqlx::Error> {
        query_as::<Postgres, CarrierRecord>(LOCK_CARRIER_SQL)
            .bind(carrier.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_carriers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        include_inactive: bool,
    ) -> Result<Vec<CarrierRecord>, sqlx::Error> {
        query_as::<Postgres, CarrierRecord>(LIST_CARRIERS_SQL)
            .bind(include_inactive)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_carrier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        carrier: CarrierId,
        update: &CarrierUpdate,
    ) -> Result<CarrierRecord, sqlx::Error> {
        query_as::<Postgres, CarrierRecord>(UPDATE_CARRIER_SQL)
            .bind(carrier.into_i64())
            .bind(update.name.as_deref())
            .bind(update.phone.as_deref())
            .bind(update.vehicle_model.as_deref())
            .bind(update.vehicle_plate.as_deref())
            .bind(update.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn deactivate_carrier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        carrier: CarrierId,
    ) -> Result<CarrierRecord, sqlx::Error> {
        query_as::<Postgres, CarrierRecord>(DEACTIVATE_CARRIER_SQL)
            .bind(carrier.into_i64())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CarrierRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CarrierId::from_i64(row.try_get("id")?),
            uuid: CarrierUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            vehicle_model: row.try_get("vehicle_model")?,
            vehicle_plate: row.try_get("vehicle_plate")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
