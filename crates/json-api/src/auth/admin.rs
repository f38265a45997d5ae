//! Admin gate.
//!
//! Must run after the auth middleware; rejects callers whose claims do not
//! carry the admin role.

use salvo::prelude::*;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let is_admin = match depot.claims_or_401() {
        Ok(claims) => claims.role.is_admin(),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    if !is_admin {
        res.render(StatusError::forbidden().brief("Administrator role required"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}
