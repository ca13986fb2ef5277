//! Hilo Mágico JSON API Server

use std::{process::ExitCode, sync::Arc};

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

use hilo_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod access;
mod auth;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod orders;
mod products;
mod router;
mod shutdown;
mod state;
mod stores;
mod users;
#[cfg(test)]
mod test_helpers;

fn service_router(state: Arc<State>) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(router::app_router())
}

/// Mount the OpenAPI document and Swagger UI for everything in `router`.
fn with_api_docs(router: Router) -> Router {
    let doc = OpenApi::new("Hilo Mágico API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}

/// Hilo JSON API Server entry point
#[tokio::main]
pub async fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(config_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for config errors"
            )]
            {
                eprintln!("Configuration error: {config_error}");
            }

            return ExitCode::FAILURE;
        }
    };

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, so tracing output would be lost"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        return ExitCode::FAILURE;
    }

    let settings = match config.app_settings() {
        Ok(settings) => settings,
        Err(settings_error) => {
            error!("invalid configuration: {settings_error}");

            return ExitCode::FAILURE;
        }
    };

    let app = match AppContext::from_settings(&settings).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            return ExitCode::FAILURE;
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = with_api_docs(service_router(State::from_app_context(
        app,
        config.pagination,
    )));

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;

    ExitCode::SUCCESS
}
