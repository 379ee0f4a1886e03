//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Resolve page requests through the task router
//! - Expose shell bootstrap data, path resolution and error reports as JSON
//! - Observability (metrics, correlation IDs)

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::validation::is_reserved_path;
use crate::config::ShellConfig;
use crate::endpoint::EndpointBranch;
use crate::http::render;
use crate::navigation::EagerLoader;
use crate::observability::metrics;
use crate::routing::{NavigationError, Resolution};
use crate::shell::{App, ErrorDisposition, Theme, ToastOptions, DEFAULT_TITLE};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub app: Arc<App<EagerLoader>>,
    pub metrics: Option<PrometheusHandle>,
}

/// HTTP server for the viewer shell.
pub struct HttpServer {
    router: Router,
    config: Arc<ShellConfig>,
}

impl HttpServer {
    /// Create a new HTTP server around a bootstrapped shell.
    pub fn new(app: Arc<App<EagerLoader>>, metrics: Option<PrometheusHandle>) -> Self {
        let config = app.config().clone();
        let state = AppState { app, metrics };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ShellConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/healthz", get(health_handler))
            .route("/shell/config", get(config_handler))
            .route("/shell/resolve", get(resolve_handler))
            .route("/shell/errors", post(error_report_handler))
            .route("/", get(page_handler))
            .route("/{*path}", get(page_handler));

        if state.metrics.is_some() {
            let metrics_path = &config.observability.metrics_path;
            if is_reserved_path(metrics_path) {
                tracing::error!(metrics_path = %metrics_path, "Metrics path collides with a shell route, not serving metrics");
            } else {
                router = router.route(metrics_path, get(metrics_handler));
            }
        }

        // Outermost first: the id is set before the trace span and echoed on the response.
        router.with_state(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// Run the server until `shutdown` completes.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            public_host = %self.config.listener.public_host,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Everything the client-side shell needs before its first navigation.
#[derive(Debug, Serialize)]
pub struct ShellBootstrap<'a> {
    pub api_base_url: &'a str,
    pub endpoint_branch: EndpointBranch,
    pub default_title: &'static str,
    pub theme: &'a Theme,
    pub notifications: &'a ToastOptions,
    pub routes: Vec<RouteSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RouteSummary<'a> {
    pub name: &'a str,
    pub path: &'a str,
}

async fn config_handler(State(state): State<AppState>) -> Response {
    let app = &state.app;
    let body = ShellBootstrap {
        api_base_url: app.endpoint().base_url(),
        endpoint_branch: app.endpoint().branch(),
        default_title: DEFAULT_TITLE,
        theme: app.theme(),
        notifications: app.toasts().options(),
        routes: app
            .router()
            .routes()
            .iter()
            .map(|r| RouteSummary {
                name: r.name(),
                path: r.path(),
            })
            .collect(),
    };
    Json(body).into_response()
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

/// Error body for rejected navigations.
#[derive(Debug, Serialize, Deserialize)]
pub struct NavigationErrorBody {
    pub error: String,
    pub message: String,
}

fn navigation_status(err: &NavigationError) -> StatusCode {
    match err {
        NavigationError::NotFound { .. } => StatusCode::NOT_FOUND,
        NavigationError::RedirectCycle { .. } => StatusCode::LOOP_DETECTED,
    }
}

/// Metrics outcome for a page request that resolved.
fn page_outcome(resolution: &Resolution) -> &'static str {
    if resolution.hops > 0 {
        "redirected"
    } else {
        "rendered"
    }
}

/// Resolve `path`, recording `outcome_of` for successes and the error kind
/// for failures.
fn resolve(
    state: &AppState,
    path: &str,
    outcome_of: fn(&Resolution) -> &'static str,
) -> Result<Resolution, NavigationError> {
    let start = Instant::now();
    let result = state.app.router().navigate(path);
    match &result {
        Ok(resolution) => {
            tracing::debug!(
                path = %path,
                route = %resolution.target.route,
                task_id = %resolution.target.task_id,
                hops = resolution.hops,
                "Path resolved"
            );
            metrics::record_navigation(outcome_of(resolution), resolution.hops, start);
        }
        Err(err) => {
            tracing::warn!(path = %path, error = %err, "Path not resolvable");
            metrics::record_navigation(err.kind(), 0, start);
        }
    }
    result
}

async fn resolve_handler(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Response {
    match resolve(&state, &query.path, |_| "resolved") {
        Ok(resolution) => Json(resolution).into_response(),
        Err(err) => (
            navigation_status(&err),
            Json(NavigationErrorBody {
                error: err.kind().to_string(),
                message: err.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Page handler: redirect, render the shell page, or an explicit error page.
async fn page_handler(State(state): State<AppState>, uri: Uri) -> Response {
    match resolve(&state, uri.path(), page_outcome) {
        Ok(resolution) if resolution.hops > 0 => (
            StatusCode::TEMPORARY_REDIRECT,
            [(header::LOCATION, resolution.final_path)],
        )
            .into_response(),
        Ok(resolution) => Html(render::shell_page(
            &resolution,
            state.app.theme(),
            state.app.endpoint().base_url(),
        ))
        .into_response(),
        Err(err) => (navigation_status(&err), Html(render::error_page(&err))).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorReport {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorAck {
    pub suppressed: bool,
}

async fn error_report_handler(
    State(state): State<AppState>,
    Json(report): Json<ErrorReport>,
) -> Json<ErrorAck> {
    let suppressed = state.app.report_error(&report.message) == ErrorDisposition::Suppressed;
    Json(ErrorAck { suppressed })
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::TaskRouter;

    #[test]
    fn test_navigation_status() {
        assert_eq!(
            navigation_status(&NavigationError::NotFound { path: "/x".into() }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            navigation_status(&NavigationError::RedirectCycle {
                path: "/".into(),
                hops: 5
            }),
            StatusCode::LOOP_DETECTED
        );
    }

    #[test]
    fn test_page_outcome() {
        let router = TaskRouter::with_default_routes(4).unwrap();
        assert_eq!(page_outcome(&router.navigate("/").unwrap()), "redirected");
        assert_eq!(
            page_outcome(&router.navigate("/comparison/task/idd").unwrap()),
            "rendered"
        );
    }

    #[test]
    fn test_resolution_serializes_flat() {
        let router = TaskRouter::with_default_routes(4).unwrap();
        let json = serde_json::to_value(router.navigate("/").unwrap()).unwrap();
        assert_eq!(json["route"], "ComparisonTask");
        assert_eq!(json["task_id"], "sztaxi");
        assert_eq!(json["view"], "ComparisonPage");
        assert_eq!(json["final_path"], "/comparison/task/sztaxi");
        assert_eq!(json["hops"], 1);
    }
}
