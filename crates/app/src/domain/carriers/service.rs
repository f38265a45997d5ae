//! Carriers service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::carriers::{
        data::{CarrierUpdate, NewCarrier},
        errors::CarriersServiceError,
        records::{CarrierId, CarrierRecord},
        repository::PgCarriersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCarriersService {
    db: Db,
    repository: PgCarriersRepository,
}

impl PgCarriersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCarriersRepository::new(),
        }
    }
}

#[async_trait]
impl CarriersService for PgCarriersService {
    async fn create_carrier(
        &self,
        carrier: NewCarrier,
    ) -> Result<CarrierRecord, CarriersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_carrier(&mut tx, &carrier).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_carrier(&self, carrier: CarrierId) -> Result<CarrierRecord, CarriersServiceError> {
        let mut tx = self.db.begin().await?;

        let carrier = self.repository.get_carrier(&mut tx, carrier).await?;

        tx.commit().await?;

        Ok(carrier)
    }

    async fn list_carriers(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<CarrierRecord>, CarriersServiceError> {
        let mut tx = self.db.begin().await?;

        let carriers = self
            .repository
            .list_carriers(&mut tx, include_inactive)
            .await?;

        tx.commit().await?;

        Ok(carriers)
    }

    async fn update_carrier(
        &self,
        carrier: CarrierId,
        update: CarrierUpdate,
    ) -> Result<CarrierRecord, CarriersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_carrier(&mut tx, carrier, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn deactivate_carrier(
        &self,
        carrier: CarrierId,
    ) -> Result<CarrierRecord, CarriersServiceError> {
        let mut tx = self.db.begin().await?;

        let deactivated = self.repository.deactivate_carrier(&mut tx, carrier).await?;

        tx.commit().await?;

        info!(carrier_id = %deactivated.id, "deactivated carrier");

        Ok(deactivated)
    }
}

#[automock]
#[async_trait]
pub trait CarriersService: Send + Sync {
    /// Register a new active carrier.
    async fn create_carrier(&self, carrier: NewCarrier)
    -> Result<CarrierRecord, CarriersServiceError>;

    /// Retrieve a single carrier, active or not.
    async fn get_carrier(&self, carrier: CarrierId) -> Result<CarrierRecord, CarriersServiceError>;

    /// List carriers; inactive ones only when asked for.
    async fn list_carriers(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<CarrierRecord>, CarriersServiceError>;

    /// Apply a partial update.
    async fn update_carrier(
        &self,
        carrier: CarrierId,
        update: CarrierUpdate,
    ) -> Result<CarrierRecord, CarriersServiceError>;

    /// Soft delete: the carrier stays readable but cannot take new routes.
    async fn deactivate_carrier(
        &self,
        carrier: CarrierId,
    ) -> Result<CarrierRecord, CarriersServiceError>;
}
