//! Bearer authentication hoop.
//!
//! Resolves the `Authorization: Bearer` token to [`Claims`] and stores them in
//! the depot for the handlers and the admin gate.

use std::sync::Arc;

use dispatch_app::auth::{AuthServiceError, Claims};
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(claims) => {
            depot.insert_claims(claims);
            ctrl.call_next(req, depot, res).await;
        }
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();
        }
    }
}

async fn authenticate(req: &Request, depot: &Depot) -> Result<Claims, StatusError> {
    let token = bearer_token(req).ok_or_else(|| {
        StatusError::unauthorized().brief("Missing or invalid Authorization header")
    })?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(|error| match error {
            AuthServiceError::NotFound => {
                StatusError::unauthorized().brief("Invalid or expired API token")
            }
            error @ (AuthServiceError::Sql(_)
            | AuthServiceError::Token(_)
            | AuthServiceError::Expiry(_)) => {
                error!("bearer authentication failed: {error}");

                StatusError::internal_server_error()
            }
        })
}

/// Token from an `Authorization` header using the `Bearer` scheme, matched
/// case-insensitively.
fn bearer_token(req: &Request) -> Option<&str> {
    let (scheme, token) = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;

    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
