//! Depot state shared by every handler.

use std::sync::Arc;

use dispatch_app::context::AppContext;

/// Injected once at startup with `affix_state::inject`.
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
