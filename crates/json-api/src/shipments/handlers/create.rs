//! Create Shipment Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use dispatch_app::domain::shipments::{data::NewShipment, records::ShipmentUuid};

use crate::{
    envelope::Envelope,
    extensions::*,
    shipments::{errors::into_status_error, responses::ShipmentResponse},
    state::State,
    validation,
};

/// Create Shipment Request
///
/// New shipments always start as `pending`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateShipmentRequest {
    pub origin: String,
    pub destination: String,
    pub origin_address: String,
    pub destination_address: String,
    pub description: String,
    pub product_type: String,

    /// Kilograms, at least 0.1
    pub weight: Decimal,

    /// Centimetres, at least 1
    pub height: i32,
    pub width: i32,
    pub length: i32,

    #[serde(default)]
    pub declared_value: Decimal,

    #[serde(default)]
    pub is_fragile: bool,
}

impl CreateShipmentRequest {
    fn validate(&self) -> Result<(), StatusError> {
        validation::not_blank("origin", &self.origin)?;
        validation::not_blank("destination", &self.destination)?;
        validation::not_blank("origin_address", &self.origin_address)?;
        validation::not_blank("destination_address", &self.destination_address)?;
        validation::not_blank("product_type", &self.product_type)?;

        if self.weight < Decimal::new(1, 1) {
            return Err(StatusError::bad_request().brief("weight must be at least 0.1"));
        }

        if [self.height, self.width, self.length]
            .into_iter()
            .any(|dimension| dimension < 1)
        {
            return Err(StatusError::bad_request().brief("dimensions must be at least 1"));
        }

        if self.declared_value.is_sign_negative() {
            return Err(StatusError::bad_request().brief("declared_value cannot be negative"));
        }

        Ok(())
    }
}

impl From<CreateShipmentRequest> for NewShipment {
    fn from(request: CreateShipmentRequest) -> Self {
        NewShipment {
            uuid: ShipmentUuid::new(),
            origin: request.origin,
            destination: request.destination,
            origin_address: request.origin_address,
            destination_address: request.destination_address,
            description: request.description,
            product_type: request.product_type,
            weight: request.weight,
            height: request.height,
            width: request.width,
            length: request.length,
            declared_value: request.declared_value,
            is_fragile: request.is_fragile,
        }
    }
}

/// Create Shipment Handler
#[endpoint(
    tags("shipments"),
    summary = "Create Shipment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Shipment created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateShipmentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<ShipmentResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.claims_or_401()?.subject_id;
    let request = json.into_inner();

    request.validate()?;

    let shipment = state
        .app
        .shipments
        .create_shipment(owner, request.into())
        .await
        .map_err(into_status_error)?;

    info!(shipment_id = %shipment.id, user_id = %owner, "created shipment");

    res.add_header(LOCATION, format!("/shipments/{}", shipment.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Envelope::ok("Shipment created", shipment.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use dispatch_app::domain::shipments::{
        MockShipmentsService, ShipmentsServiceError, records::ShipmentStatus,
    };

    use crate::test_helpers::{TEST_USER_ID, make_shipment, shipments_service};

    use super::*;

    fn make_service(shipments: MockShipmentsService) -> Service {
        shipments_service(shipments, Router::with_path("shipments").post(handler))
    }

    fn payload() -> Value {
        json!({
            "origin": "Bogota",
            "destination": "Medellin",
            "origin_address": "Calle 1 #2-3",
            "destination_address": "Carrera 4 #5-6",
            "description": "Books",
            "product_type": "parcel",
            "weight": "2.5",
            "height": 10,
            "width": 20,
            "length": 30,
        })
    }

    #[tokio::test]
    async fn test_create_shipment_returns_201_for_the_caller() -> TestResult {
        let shipment = make_shipment(1, ShipmentStatus::Pending);
        let uuid = shipment.uuid;

        let mut shipments = MockShipmentsService::new();

        shipments
            .expect_create_shipment()
            .once()
            .withf(|owner, new| {
                *owner == TEST_USER_ID
                    && new.weight == Decimal::new(25, 1)
                    && new.declared_value == Decimal::ZERO
                    && !new.is_fragile
            })
            .return_once(move |_, _| Ok(shipment));

        let mut res = TestClient::post("http://example.com/shipments")
            .json(&payload())
            .send(&make_service(shipments))
            .await;

        let body: Envelope<ShipmentResponse> = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/shipments/{uuid}").as_str()));
        assert_eq!(body.data.status, "pending");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_shipment_light_weight_returns_400() -> TestResult {
        let mut shipments = MockShipmentsService::new();

        shipments.expect_create_shipment().never();

        let mut body = payload();
        body["weight"] = json!("0.05");

        let res = TestClient::post("http://example.com/shipments")
            .json(&body)
            .send(&make_service(shipments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_shipment_zero_dimension_returns_400() -> TestResult {
        let mut shipments = MockShipmentsService::new();

        shipments.expect_create_shipment().never();

        let mut body = payload();
        body["width"] = json!(0);

        let res = TestClient::post("http://example.com/shipments")
            .json(&body)
            .send(&make_service(shipments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_shipment_storage_check_failure_returns_400() -> TestResult {
        let mut shipments = MockShipmentsService::new();

        shipments
            .expect_create_shipment()
            .once()
            .return_once(|_, _| Err(ShipmentsServiceError::InvalidData));

        let res = TestClient::post("http://example.com/shipments")
            .json(&payload())
            .send(&make_service(shipments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
