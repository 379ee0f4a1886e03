//! Navigation guard.
//!
//! # Responsibilities
//! - Turn a requested path into a decision: render, redirect or reject
//! - Follow redirect chains with a hop ceiling
//!
//! # Design Decisions
//! - The guard is pure: it never touches the page title. The caller applies
//!   the title from the returned decision before rendering.
//! - Redirect cycles fail closed, either on a revisited path or once the hop
//!   ceiling is exceeded

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::routing::matcher::normalize_path;
use crate::routing::router::{RouteKind, TaskRouter, ViewRef};

/// Why a navigation could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// No route matches the path.
    #[error("no route matches {path}")]
    NotFound { path: String },

    /// The redirect chain starting at `path` does not terminate.
    #[error("redirect cycle starting at {path} after {hops} hops")]
    RedirectCycle { path: String, hops: usize },
}

impl NavigationError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            NavigationError::NotFound { .. } => "not_found",
            NavigationError::RedirectCycle { .. } => "redirect_cycle",
        }
    }
}

/// Everything the renderer needs once a route allows a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderTarget {
    /// Name of the matched route.
    pub route: String,
    pub view: ViewRef,
    pub task_id: String,
    /// Title to apply before rendering; `None` leaves the current title alone.
    pub title: Option<String>,
}

/// Outcome of one guard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow(RenderTarget),
    Redirect { route: String, to: String },
    Reject(NavigationError),
}

/// A completed navigation: the render target plus how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    #[serde(flatten)]
    pub target: RenderTarget,
    pub requested_path: String,
    pub final_path: String,
    pub hops: usize,
}

impl TaskRouter {
    /// Decide what a single path resolves to, without following redirects.
    pub fn guard(&self, path: &str) -> GuardDecision {
        let Some((route, matched)) = self.match_path(path) else {
            return GuardDecision::Reject(NavigationError::NotFound {
                path: normalize_path(path),
            });
        };

        match route.kind() {
            RouteKind::Redirect { to } => GuardDecision::Redirect {
                route: route.name().to_string(),
                to: to.clone(),
            },
            RouteKind::FixedTask {
                task_id,
                title,
                target,
            } => GuardDecision::Allow(RenderTarget {
                route: route.name().to_string(),
                view: target.clone(),
                task_id: task_id.clone(),
                title: title.clone(),
            }),
            RouteKind::ParameterizedTask {
                param,
                title,
                target,
            } => match matched.get(param) {
                Some(task_id) => GuardDecision::Allow(RenderTarget {
                    route: route.name().to_string(),
                    view: target.clone(),
                    task_id: task_id.to_string(),
                    title: title.clone(),
                }),
                None => GuardDecision::Reject(NavigationError::NotFound {
                    path: normalize_path(path),
                }),
            },
        }
    }

    /// Resolve `path` to a render target, following redirects.
    pub fn navigate(&self, path: &str) -> Result<Resolution, NavigationError> {
        let requested_path = normalize_path(path);
        let mut current = requested_path.clone();
        let mut visited = HashSet::from([current.clone()]);
        let mut hops = 0;

        loop {
            match self.guard(&current) {
                GuardDecision::Allow(target) => {
                    return Ok(Resolution {
                        target,
                        requested_path,
                        final_path: current,
                        hops,
                    });
                }
                GuardDecision::Redirect { route, to } => {
                    hops += 1;
                    let next = normalize_path(&to);
                    tracing::debug!(route = %route, from = %current, to = %next, hops, "Following redirect");

                    if hops > self.max_redirect_hops() || !visited.insert(next.clone()) {
                        tracing::warn!(path = %requested_path, hops, "Redirect cycle detected");
                        return Err(NavigationError::RedirectCycle {
                            path: requested_path,
                            hops,
                        });
                    }
                    current = next;
                }
                GuardDecision::Reject(err) => return Err(err),
            }
        }
    }
}
