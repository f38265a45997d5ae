//! Carrier Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    carriers::{errors::into_status_error, responses::CarrierResponse},
    envelope::Envelope,
    extensions::*,
    state::State,
};

/// Carrier Index Handler
///
/// Active carriers only, unless `include_inactive=true`.
#[endpoint(
    tags("carriers"),
    summary = "List Carriers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    include_inactive: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<CarrierResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let carriers = state
        .app
        .carriers
        .list_carriers(include_inactive.into_inner().unwrap_or(false))
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok(
        "Carriers retrieved",
        carriers.into_iter().map(Into::into).collect(),
    ))
}
