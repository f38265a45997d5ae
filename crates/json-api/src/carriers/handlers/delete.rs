//! Delete Carrier Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use dispatch_app::domain::carriers::records::CarrierId;

use crate::{
    carriers::{errors::into_status_error, responses::CarrierResponse},
    envelope::Envelope,
    extensions::*,
    state::State,
};

/// Delete Carrier Handler
///
/// Deactivates the carrier. It stays readable and keeps its routes.
#[endpoint(
    tags("carriers"),
    summary = "Deactivate Carrier",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Carrier deactivated"),
        (status_code = StatusCode::NOT_FOUND, description = "Carrier not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CarrierResponse>>, StatusError> {
    let carrier = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .carriers
        .deactivate_carrier(CarrierId::from_i64(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    info!(carrier_id = %carrier.id, "carrier deactivated via api");

    Ok(Envelope::ok("Carrier deactivated", carrier.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use dispatch_app::domain::carriers::{CarriersServiceError, MockCarriersService};

    use crate::test_helpers::{carriers_service, make_carrier};

    use super::*;

    fn make_service(carriers: MockCarriersService) -> Service {
        carriers_service(carriers, Router::with_path("carriers/{id}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_deactivates() -> TestResult {
        let mut carriers = MockCarriersService::new();

        carriers
            .expect_deactivate_carrier()
            .once()
            .withf(|id| *id == CarrierId::from_i64(4))
            .return_once(|_| {
                let mut carrier = make_carrier(4);
                carrier.is_active = false;
                Ok(carrier)
            });

        let body: Envelope<CarrierResponse> = TestClient::delete("http://example.com/carriers/4")
            .send(&make_service(carriers))
            .await
            .take_json()
            .await?;

        assert!(!body.data.is_active, "carrier should be inactive");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_carrier_returns_404() -> TestResult {
        let mut carriers = MockCarriersService::new();

        carriers
            .expect_deactivate_carrier()
            .once()
            .return_once(|_| Err(CarriersServiceError::NotFound));

        let res = TestClient::delete("http://example.com/carriers/4")
            .send(&make_service(carriers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
