//! DocuSpotlight viewer shell.
//!
//! Serves the single-page comparison viewer's shell: resolves the backend
//! endpoint once at startup, routes task URLs to the comparison view and
//! renders the page skeleton the client-side view boots from.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser request                 ┌──────────────────────────────────────────┐
//!     ───────────────────────────────▶│  http::server (axum, request id, trace)  │
//!                                     └───────────────┬──────────────────────────┘
//!                                                     │
//!                                                     ▼
//!                                     ┌──────────────────────────────────────────┐
//!                                     │  routing (matcher → router → guard)      │
//!                                     └───────────────┬──────────────────────────┘
//!                                                     │ Resolution
//!                                                     ▼
//!     Shell page / 307 / 404          ┌──────────────────────────────────────────┐
//!     ◀───────────────────────────────│  http::render (title, task id, api base) │
//!                                     └──────────────────────────────────────────┘
//!
//!     Startup: config → endpoint resolver (once) → shell::App → HttpServer
//! ```

use std::sync::Arc;

use tokio::net::TcpListener;

use docuspotlight::config;
use docuspotlight::http::HttpServer;
use docuspotlight::navigation::EagerLoader;
use docuspotlight::observability::{logging, metrics};
use docuspotlight::shell::{App, HeadlessEngine, LogNotifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_from_env()?;

    logging::init_logging(&config.observability);

    tracing::info!("docuspotlight v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        public_host = %config.listener.public_host,
        backend_port = %config.endpoint.backend_port,
        "Configuration loaded"
    );

    let metrics_handle = if config.observability.metrics_enabled {
        match metrics::install_recorder() {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!(error = %e, "Failed to install Prometheus recorder");
                None
            }
        }
    } else {
        None
    };

    let bind_address = config.listener.bind_address.clone();
    let app = Arc::new(App::bootstrap(
        config,
        &HeadlessEngine,
        Arc::new(LogNotifier),
        EagerLoader,
    )?);

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(app, metrics_handle);
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
