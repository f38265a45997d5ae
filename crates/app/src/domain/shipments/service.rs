//! Shipments service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::Actor,
    database::Db,
    domain::{
        shipments::{
            data::NewShipment,
            errors::ShipmentsServiceError,
            records::{
                ShipmentId, ShipmentRecord, ShipmentStatus, ShipmentUuid, StatusChangeRecord,
            },
            repository::PgShipmentsRepository,
        },
        users::records::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgShipmentsService {
    db: Db,
    repository: PgShipmentsRepository,
}

impl PgShipmentsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgShipmentsRepository::new(),
        }
    }
}

#[async_trait]
impl ShipmentsService for PgShipmentsService {
    async fn create_shipment(
        &self,
        owner: UserId,
        shipment: NewShipment,
    ) -> Result<ShipmentRecord, ShipmentsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_shipment(&mut tx, owner, &shipment)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_shipment_by_uuid(
        &self,
        shipment: ShipmentUuid,
        actor: Actor,
    ) -> Result<ShipmentRecord, ShipmentsServiceError> {
        let mut tx = self.db.begin().await?;

        let shipment = self
            .repository
            .get_shipment_by_uuid(&mut tx, shipment)
            .await?;

        tx.commit().await?;

        if !actor.may_access(shipment.user_id) {
            return Err(ShipmentsServiceError::Forbidden);
        }

        Ok(shipment)
    }

    async fn list_user_shipments(
        &self,
        owner: UserId,
    ) -> Result<Vec<ShipmentRecord>, ShipmentsServiceError> {
        let mut tx = self.db.begin().await?;

        let shipments = self.repository.list_user_shipments(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(shipments)
    }

    async fn update_status(
        &self,
        shipment: ShipmentId,
        status: ShipmentStatus,
        actor: Actor,
    ) -> Result<ShipmentRecord, ShipmentsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .lock_shipment(&mut tx, shipment)
            .await?
            .ok_or(ShipmentsServiceError::NotFound)?;

        if !actor.may_access(current.user_id) {
            return Err(ShipmentsServiceError::Forbidden);
        }

        if current.status == status {
            return Ok(current);
        }

        if !actor.role.is_admin() {
            if status.is_route_driven() {
                return Err(ShipmentsServiceError::ReservedStatus(status));
            }

            if self.repository.has_open_route(&mut tx, current.id).await? {
                return Err(ShipmentsServiceError::Routed);
            }
        }

        let (updated, change) = self
            .repository
            .transition_status(&mut tx, &current, status)
            .await?;

        tx.commit().await?;

        info!(
            shipment_id = %updated.id,
            old_status = %change.old_status,
            new_status = %change.new_status,
            "shipment status changed"
        );

        Ok(updated)
    }

    async fn status_history(
        &self,
        shipment: ShipmentId,
        actor: Actor,
    ) -> Result<Vec<StatusChangeRecord>, ShipmentsServiceError> {
        let mut tx = self.db.begin().await?;

        let owner = self.repository.get_shipment(&mut tx, shipment).await?.user_id;

        if !actor.may_access(owner) {
            return Err(ShipmentsServiceError::Forbidden);
        }

        let history = self
            .repository
            .list_status_changes(&mut tx, shipment)
            .await?;

        tx.commit().await?;

        Ok(history)
    }
}

#[automock]
#[async_trait]
pub trait ShipmentsService: Send + Sync {
    /// Register a new pending shipment owned by `owner`.
    async fn create_shipment(
        &self,
        owner: UserId,
        shipment: NewShipment,
    ) -> Result<ShipmentRecord, ShipmentsServiceError>;

    /// Retrieve a shipment by its public UUID; owner or admin only.
    async fn get_shipment_by_uuid(
        &self,
        shipment: ShipmentUuid,
        actor: Actor,
    ) -> Result<ShipmentRecord, ShipmentsServiceError>;

    /// List shipments owned by the given user.
    async fn list_user_shipments(
        &self,
        owner: UserId,
    ) -> Result<Vec<ShipmentRecord>, ShipmentsServiceError>;

    /// Change a shipment's status and record the transition.
    ///
    /// Setting the current status again returns the shipment unchanged and
    /// records nothing. Owners may not set `in_transit` or `delivered`, nor
    /// touch a shipment bound to an open route; admins may do both.
    async fn update_status(
        &self,
        shipment: ShipmentId,
        status: ShipmentStatus,
        actor: Actor,
    ) -> Result<ShipmentRecord, ShipmentsServiceError>;

    /// Status transitions for a shipment, oldest first.
    async fn status_history(
        &self,
        shipment: ShipmentId,
        actor: Actor,
    ) -> Result<Vec<StatusChangeRecord>, ShipmentsServiceError>;
}
