//! Dispatch JSON API Server

use std::process::ExitCode;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use dispatch_app::context::{AppContext, open_database};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod carriers;
mod config;
mod envelope;
mod extensions;
mod healthcheck;
mod observability;
mod router;
mod routes;
mod shipments;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod users;
mod validation;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(source) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging is not initialised until the configuration is known"
            )]
            {
                eprintln!("Configuration error: {source}");
            }

            return ExitCode::FAILURE;
        }
    };

    if let Err(source) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, so tracing has nowhere to write"
        )]
        {
            eprintln!("Observability error: {source}");
        }

        return ExitCode::FAILURE;
    }

    let db = match open_database(
        &config.database.database_url,
        config.database.max_connections,
        config.database.run_migrations,
    )
    .await
    {
        Ok(db) => db,
        Err(source) => {
            error!("failed to open database: {source}");

            return ExitCode::FAILURE;
        }
    };

    let app = AppContext::new(&db, config.auth.token_ttl());

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .hoop(observability::request_logging)
        .push(router::app_router());

    let doc = OpenApi::new("Dispatch API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let addr = config.socket_addr();

    info!("starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;
    let server = Server::new(listener);
    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(source) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {source}");
        }
    });

    let service = Service::new(router).catcher(envelope::catcher());

    server.serve(service).await;

    db.close().await;

    info!("server stopped");

    ExitCode::SUCCESS
}
