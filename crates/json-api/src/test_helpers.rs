//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use dispatch_app::{
    auth::{Claims, MockAuthService},
    context::AppContext,
    domain::{
        carriers::{
            MockCarriersService,
            records::{CarrierId, CarrierRecord, CarrierUuid},
        },
        routes::MockRoutesService,
        shipments::{
            MockShipmentsService,
            records::{ShipmentId, ShipmentRecord, ShipmentStatus, ShipmentUuid},
        },
        users::{
            MockUsersService,
            records::{Role, UserId, UserRecord, UserUuid},
        },
    },
};

use crate::{envelope, extensions::*, state::State};

pub(crate) const TEST_USER_ID: UserId = UserId::from_i64(7);

pub(crate) fn test_claims(role: Role) -> Claims {
    Claims {
        subject_id: TEST_USER_ID,
        subject_uuid: UserUuid::from_uuid(Uuid::nil()),
        role,
        email: "ana@example.com".to_string(),
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_claims(test_claims(Role::User));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_claims(test_claims(Role::Admin));
    ctrl.call_next(req, depot, res).await;
}

/// Every service mocked with no expectations, so any call fails the test.
fn strict_context() -> AppContext {
    AppContext {
        users: Arc::new(MockUsersService::new()),
        auth: Arc::new(MockAuthService::new()),
        shipments: Arc::new(MockShipmentsService::new()),
        carriers: Arc::new(MockCarriersService::new()),
        routes: Arc::new(MockRoutesService::new()),
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        auth: Arc::new(auth),
        ..strict_context()
    })
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    let state = State::from_app_context(AppContext {
        users: Arc::new(users),
        ..strict_context()
    });

    Service::new(Router::new().hoop(inject(state)).push(route)).catcher(envelope::catcher())
}

pub(crate) fn shipments_service(shipments: MockShipmentsService, route: Router) -> Service {
    let state = State::from_app_context(AppContext {
        shipments: Arc::new(shipments),
        ..strict_context()
    });

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
    .catcher(envelope::catcher())
}

pub(crate) fn carriers_service(carriers: MockCarriersService, route: Router) -> Service {
    let state = State::from_app_context(AppContext {
        carriers: Arc::new(carriers),
        ..strict_context()
    });

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_admin)
            .push(route),
    )
    .catcher(envelope::catcher())
}

pub(crate) fn routes_service(routes: MockRoutesService, route: Router) -> Service {
    let state = State::from_app_context(AppContext {
        routes: Arc::new(routes),
        ..strict_context()
    });

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_admin)
            .push(route),
    )
    .catcher(envelope::catcher())
}

pub(crate) fn make_user() -> UserRecord {
    UserRecord {
        id: TEST_USER_ID,
        uuid: UserUuid::from_uuid(Uuid::nil()),
        username: "anacl".to_string(),
        last_name: "Lopez".to_string(),
        phone_number: "3001234567".to_string(),
        email: "ana@example.com".to_string(),
        role: Role::User,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_shipment(id: i64, status: ShipmentStatus) -> ShipmentRecord {
    ShipmentRecord {
        id: ShipmentId::from_i64(id),
        uuid: ShipmentUuid::new(),
        user_id: TEST_USER_ID,
        origin: "Bogota".to_string(),
        destination: "Medellin".to_string(),
        origin_address: "Calle 1 #2-3".to_string(),
        destination_address: "Carrera 4 #5-6".to_string(),
        description: "Books".to_string(),
        product_type: "parcel".to_string(),
        weight: Decimal::new(25, 1),
        height: 10,
        width: 20,
        length: 30,
        declared_value: Decimal::new(15_000, 0),
        is_fragile: false,
        status,
        status_updated_at: Timestamp::UNIX_EPOCH,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_carrier(id: i64) -> CarrierRecord {
    CarrierRecord {
        id: CarrierId::from_i64(id),
        uuid: CarrierUuid::new(),
        name: "Juan Perez".to_string(),
        phone: "3001234567".to_string(),
        vehicle_model: Some("Renault Kangoo".to_string()),
        vehicle_plate: Some("ABC123".to_string()),
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
