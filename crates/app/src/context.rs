//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::Db,
    domain::{
        carriers::{CarriersService, PgCarriersService},
        routes::{PgRoutesService, RoutesService},
        shipments::{PgShipmentsService, ShipmentsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),
}

/// Open the shared storage handle, optionally applying pending migrations.
pub async fn open_database(
    url: &str,
    max_connections: u32,
    run_migrations: bool,
) -> Result<Db, AppInitError> {
    let db = Db::connect(url, max_connections)
        .await
        .map_err(AppInitError::Database)?;

    if run_migrations {
        db.migrate().await.map_err(AppInitError::Migrations)?;
    }

    Ok(db)
}

/// Every service, wired to one storage handle.
#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
    pub shipments: Arc<dyn ShipmentsService>,
    pub carriers: Arc<dyn CarriersService>,
    pub routes: Arc<dyn RoutesService>,
}

impl AppContext {
    #[must_use]
    pub fn new(db: &Db, token_ttl: SignedDuration) -> Self {
        let auth = PgAuthService::new(db, token_ttl);

        Self {
            users: Arc::new(PgUsersService::new(db.clone(), auth.clone())),
            auth: Arc::new(auth),
            shipments: Arc::new(PgShipmentsService::new(db.clone())),
            carriers: Arc::new(PgCarriersService::new(db.clone())),
            routes: Arc::new(PgRoutesService::new(db.clone())),
        }
    }
}
