//! Per-session navigation.
//!
//! # Responsibilities
//! - Resolve a path through the router's guard
//! - Wait for the (possibly lazily loaded) view to become available
//! - Apply the page title, then publish the rendered view
//! - Drop navigations overtaken by a newer request
//!
//! # Design Decisions
//! - Last request wins: every navigation takes a generation number; only the
//!   newest generation may commit side effects
//! - Title and view are committed together under one lock, so a superseded
//!   navigation can never overwrite a newer one
//! - Failed navigations leave the previous view and title untouched

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwapOption;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::navigation::title::DocumentTitle;
use crate::observability::metrics;
use crate::routing::{NavigationError, Resolution, TaskRouter, ViewRef};

/// The view could not be made ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load view {view}: {reason}")]
pub struct ViewLoadError {
    pub view: String,
    pub reason: String,
}

/// Loads the component behind a [`ViewRef`] before it renders.
pub trait ViewLoader: Send + Sync {
    fn load(&self, view: &ViewRef) -> impl Future<Output = Result<(), ViewLoadError>> + Send;
}

/// Loader for views that are always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct EagerLoader;

impl ViewLoader for EagerLoader {
    async fn load(&self, _view: &ViewRef) -> Result<(), ViewLoadError> {
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum NavigateError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Load(#[from] ViewLoadError),
}

/// What the session currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub generation: u64,
    #[serde(flatten)]
    pub resolution: Resolution,
}

impl RenderedView {
    pub fn task_id(&self) -> &str {
        &self.resolution.target.task_id
    }

    pub fn route(&self) -> &str {
        &self.resolution.target.route
    }
}

/// Result of a navigation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Rendered(Arc<RenderedView>),
    /// A newer navigation started before this one finished.
    Superseded { path: String },
}

/// A navigation session.
#[derive(Debug)]
pub struct Navigator<L> {
    router: Arc<TaskRouter>,
    loader: L,
    title: DocumentTitle,
    current: ArcSwapOption<RenderedView>,
    generation: AtomicU64,
    commit: Mutex<()>,
}

impl<L: ViewLoader> Navigator<L> {
    pub fn new(router: Arc<TaskRouter>, loader: L, initial_title: Option<String>) -> Self {
        Self {
            router,
            loader,
            title: DocumentTitle::new(initial_title),
            current: ArcSwapOption::empty(),
            generation: AtomicU64::new(0),
            commit: Mutex::new(()),
        }
    }

    /// Navigate to `path`.
    pub async fn navigate(&self, path: &str) -> Result<NavigationOutcome, NavigateError> {
        let start = Instant::now();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let resolution = match self.router.navigate(path) {
            Ok(resolution) => resolution,
            Err(err) => {
                tracing::warn!(path = %path, generation, error = %err, "Navigation rejected, keeping current view");
                metrics::record_navigation(err.kind(), 0, start);
                return Err(err.into());
            }
        };

        if let Err(err) = self.loader.load(&resolution.target.view).await {
            tracing::error!(path = %path, generation, error = %err, "View failed to load");
            metrics::record_navigation("load_failed", resolution.hops, start);
            return Err(err.into());
        }

        let _commit = self.commit.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(path = %path, generation, "Navigation superseded");
            metrics::record_navigation("superseded", resolution.hops, start);
            return Ok(NavigationOutcome::Superseded {
                path: resolution.requested_path,
            });
        }

        self.title.apply(resolution.target.title.as_deref());

        let hops = resolution.hops;
        let view = Arc::new(RenderedView {
            generation,
            resolution,
        });
        self.current.store(Some(view.clone()));

        tracing::info!(
            path = %view.resolution.requested_path,
            route = %view.route(),
            task_id = %view.task_id(),
            hops,
            "Navigation rendered"
        );
        metrics::record_navigation("rendered", hops, start);

        Ok(NavigationOutcome::Rendered(view))
    }

    /// The view currently shown, if any navigation has rendered yet.
    pub fn current_view(&self) -> Option<Arc<RenderedView>> {
        self.current.load_full()
    }

    pub fn title(&self) -> Option<String> {
        self.title.get()
    }

    pub fn router(&self) -> &Arc<TaskRouter> {
        &self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::{oneshot, Notify};

    fn router() -> Arc<TaskRouter> {
        Arc::new(TaskRouter::with_default_routes(4).unwrap())
    }

    fn navigator() -> Navigator<EagerLoader> {
        Navigator::new(router(), EagerLoader, Some("DocuSpotlight".into()))
    }

    fn rendered(outcome: NavigationOutcome) -> Arc<RenderedView> {
        match outcome {
            NavigationOutcome::Rendered(view) => view,
            other => panic!("expected a rendered view, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_default_comparison_sets_title() {
        let nav = navigator();
        let view = rendered(nav.navigate("/comparison/task/idd").await.unwrap());

        assert_eq!(view.route(), "DefaultComparison");
        assert_eq!(view.task_id(), "idd");
        assert_eq!(nav.title().as_deref(), Some("DocuSpotlight - 演示"));
    }

    #[tokio::test]
    async fn test_parameterized_keeps_title() {
        let nav = navigator();
        nav.navigate("/comparison/task/idd").await.unwrap();
        let view = rendered(nav.navigate("/comparison/task/xyz123").await.unwrap());

        assert_eq!(view.route(), "ComparisonTask");
        assert_eq!(view.task_id(), "xyz123");
        assert_eq!(nav.title().as_deref(), Some("DocuSpotlight - 演示"));
    }

    #[tokio::test]
    async fn test_root_lands_on_sztaxi() {
        let nav = navigator();
        let view = rendered(nav.navigate("/").await.unwrap());

        assert_eq!(view.task_id(), "sztaxi");
        assert_eq!(view.resolution.hops, 1);
        assert_eq!(nav.title().as_deref(), Some("DocuSpotlight"));
    }

    #[tokio::test]
    async fn test_not_found_keeps_previous_view() {
        let nav = navigator();
        nav.navigate("/comparison/task/idd").await.unwrap();

        let err = nav.navigate("/nowhere").await.unwrap_err();
        assert!(matches!(
            err,
            NavigateError::Navigation(NavigationError::NotFound { .. })
        ));
        assert_eq!(nav.current_view().unwrap().task_id(), "idd");
        assert_eq!(nav.title().as_deref(), Some("DocuSpotlight - 演示"));
    }

    /// Loader whose loads finish only when the test releases them.
    #[derive(Default)]
    struct GatedLoader {
        gates: std::sync::Mutex<HashMap<String, oneshot::Receiver<()>>>,
        /// Signalled once a load is parked on its gate.
        entered: Arc<Notify>,
    }

    impl GatedLoader {
        fn gate(&self, key: &str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(key.to_string(), rx);
            tx
        }
    }

    impl ViewLoader for GatedLoader {
        async fn load(&self, view: &ViewRef) -> Result<(), ViewLoadError> {
            let gate = self.gates.lock().unwrap().remove(view.name());
            if let Some(gate) = gate {
                self.entered.notify_one();
                let _ = gate.await;
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_superseded_navigation_has_no_effect() {
        let loader = GatedLoader::default();
        let release_first = loader.gate(crate::routing::COMPARISON_VIEW);
        let entered = loader.entered.clone();
        let nav = Arc::new(Navigator::new(router(), loader, Some("DocuSpotlight".into())));

        // First navigation blocks inside the loader.
        let first = tokio::spawn({
            let nav = nav.clone();
            async move { nav.navigate("/comparison/task/idd").await }
        });
        entered.notified().await;

        // Second navigation finds no gate and completes right away.
        let second = rendered(nav.navigate("/comparison/task/xyz123").await.unwrap());
        assert_eq!(second.task_id(), "xyz123");

        release_first.send(()).unwrap();
        let first = first.await.unwrap().unwrap();
        assert_eq!(
            first,
            NavigationOutcome::Superseded {
                path: "/comparison/task/idd".into()
            }
        );

        assert_eq!(nav.current_view().unwrap().task_id(), "xyz123");
        assert_eq!(nav.title().as_deref(), Some("DocuSpotlight"));
    }

    struct FailingLoader;

    impl ViewLoader for FailingLoader {
        async fn load(&self, view: &ViewRef) -> Result<(), ViewLoadError> {
            Err(ViewLoadError {
                view: view.name().to_string(),
                reason: "chunk missing".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_load_failure_leaves_state() {
        let nav = Navigator::new(router(), FailingLoader, None);
        let err = nav.navigate("/comparison/task/idd").await.unwrap_err();

        assert!(matches!(err, NavigateError::Load(_)));
        assert!(nav.current_view().is_none());
        assert_eq!(nav.title(), None);
    }
}
