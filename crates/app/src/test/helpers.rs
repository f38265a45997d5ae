//! Test Helpers

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    domain::{
        carriers::{
            CarriersService, CarriersServiceError,
            data::NewCarrier,
            records::{CarrierId, CarrierRecord, CarrierUuid},
        },
        routes::{
            RoutesService, RoutesServiceError,
            data::NewRoute,
            records::{RouteRecord, RouteUuid},
        },
        shipments::{
            ShipmentsService, ShipmentsServiceError,
            data::NewShipment,
            records::{ShipmentId, ShipmentRecord, ShipmentUuid},
            repository::PgShipmentsRepository,
        },
        users::{
            UsersService, UsersServiceError,
            data::{NewUser, Password},
            records::{Role, UserId, UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

/// Password shared by every user created through [`register_user`].
pub(crate) const TEST_PASSWORD: &str = "password123";

pub(crate) async fn register_user(
    ctx: &TestContext,
    email: &str,
    role: Role,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .register(NewUser {
            uuid: UserUuid::new(),
            username: "Test".to_string(),
            last_name: "User".to_string(),
            phone_number: "3000000000".to_string(),
            email: email.to_string(),
            password: Password::new(TEST_PASSWORD),
            role,
        })
        .await
}

pub(crate) fn new_shipment() -> NewShipment {
    NewShipment {
        uuid: ShipmentUuid::new(),
        origin: "Bogotá".to_string(),
        destination: "Medellín".to_string(),
        origin_address: "Calle 1 # 2-3".to_string(),
        destination_address: "Carrera 4 # 5-6".to_string(),
        description: "Books".to_string(),
        product_type: "parcel".to_string(),
        weight: Decimal::new(1250, 2),
        height: 30,
        width: 20,
        length: 40,
        declared_value: Decimal::new(150_000, 0),
        is_fragile: false,
    }
}

pub(crate) async fn create_shipment(
    ctx: &TestContext,
    owner: UserId,
) -> Result<ShipmentRecord, ShipmentsServiceError> {
    ctx.shipments.create_shipment(owner, new_shipment()).await
}

/// Read a shipment straight from storage, bypassing ownership checks.
pub(crate) async fn load_shipment(
    ctx: &TestContext,
    shipment: ShipmentId,
) -> Result<ShipmentRecord, ShipmentsServiceError> {
    let mut tx = ctx.app_db.begin().await?;

    let shipment = PgShipmentsRepository::new()
        .get_shipment(&mut tx, shipment)
        .await?;

    tx.commit().await?;

    Ok(shipment)
}

pub(crate) async fn create_carrier(
    ctx: &TestContext,
    name: &str,
) -> Result<CarrierRecord, CarriersServiceError> {
    ctx.carriers
        .create_carrier(NewCarrier {
            uuid: CarrierUuid::new(),
            name: name.to_string(),
            phone: "3110000000".to_string(),
            vehicle_model: None,
            vehicle_plate: None,
        })
        .await
}

pub(crate) fn new_route(carrier: CarrierId, shipments: &[ShipmentId]) -> NewRoute {
    NewRoute {
        uuid: RouteUuid::new(),
        carrier_id: carrier,
        shipment_ids: SmallVec::from_slice(shipments),
        origin_address: None,
        destination_address: None,
        notes: None,
    }
}

pub(crate) async fn create_route(
    ctx: &TestContext,
    carrier: CarrierId,
    shipments: &[ShipmentId],
) -> Result<RouteRecord, RoutesServiceError> {
    ctx.routes.create_route(new_route(carrier, shipments)).await
}
