//! Application shell bootstrap.
//!
//! # Responsibilities
//! - Resolve the backend endpoint once, from the host the shell is served under
//! - Mount the theme on the rendering engine
//! - Install the toast plugin
//! - Build the task router and the navigation session
//!
//! # Design Decisions
//! - Ordered bootstrap: endpoint first, then engine and plugins, then routing
//! - Everything built here is immutable afterwards and shared by reference

use std::sync::Arc;

use thiserror::Error;

use crate::config::ShellConfig;
use crate::endpoint::{ApiUrlError, BackendApi, EndpointConfig, EndpointResolver};
use crate::navigation::{Navigator, ViewLoader};
use crate::routing::{RouteTableError, TaskRouter};
use crate::shell::errors::{ErrorDisposition, ErrorFilter};
use crate::shell::notify::{Notifier, ToastPlugin};
use crate::shell::theme::{EngineHandle, RenderingEngine, Theme};

/// Title shown before any route sets one.
pub const DEFAULT_TITLE: &str = "DocuSpotlight";

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("route table: {0}")]
    Routes(#[from] RouteTableError),

    #[error("backend endpoint: {0}")]
    Endpoint(#[from] ApiUrlError),
}

/// The bootstrapped viewer shell.
#[derive(Debug)]
pub struct App<L> {
    config: Arc<ShellConfig>,
    endpoint: Arc<EndpointConfig>,
    api: BackendApi,
    theme: Theme,
    _engine: EngineHandle,
    toasts: ToastPlugin,
    errors: ErrorFilter,
    router: Arc<TaskRouter>,
    navigator: Navigator<L>,
}

impl<L: ViewLoader> App<L> {
    pub fn bootstrap(
        config: ShellConfig,
        engine: &dyn RenderingEngine,
        notifier: Arc<dyn Notifier>,
        loader: L,
    ) -> Result<Self, BootstrapError> {
        let resolver = EndpointResolver::new(config.endpoint.clone());
        let endpoint = resolver.resolve(&config.listener.public_host);
        let api = BackendApi::new(&endpoint)?;

        let theme = Theme::from(&config.theme);
        let engine_handle = engine.mount(&theme);
        let toasts = ToastPlugin::install(&config.notifications, notifier);

        let router = Arc::new(TaskRouter::with_default_routes(
            config.routing.max_redirect_hops,
        )?);
        let navigator = Navigator::new(router.clone(), loader, Some(DEFAULT_TITLE.to_string()));

        tracing::info!(
            public_host = %config.listener.public_host,
            api_base_url = %endpoint,
            routes = router.routes().len(),
            "Shell bootstrapped"
        );

        Ok(Self {
            config: Arc::new(config),
            endpoint,
            api,
            theme,
            _engine: engine_handle,
            toasts,
            errors: ErrorFilter::default(),
            router,
            navigator,
        })
    }

    pub fn config(&self) -> &Arc<ShellConfig> {
        &self.config
    }

    pub fn endpoint(&self) -> &Arc<EndpointConfig> {
        &self.endpoint
    }

    pub fn api(&self) -> &BackendApi {
        &self.api
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn toasts(&self) -> &ToastPlugin {
        &self.toasts
    }

    pub fn router(&self) -> &Arc<TaskRouter> {
        &self.router
    }

    pub fn navigator(&self) -> &Navigator<L> {
        &self.navigator
    }

    /// Classify a page error event reported by the viewer.
    pub fn report_error(&self, message: &str) -> ErrorDisposition {
        self.errors.check(message)
    }
}
