//! Route table and lookup.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the matching route for a requested path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - Scan order sorted by specificity once at startup: literal paths before
//!   parameterized ones regardless of declaration order
//! - Declaration order breaks ties between equally specific patterns
//! - Explicit NoMatch rather than silent default

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::routing::matcher::{compile, Matcher, PathMatch, PatternError, RequestPath};

/// Name of the comparison view every task route renders.
pub const COMPARISON_VIEW: &str = "ComparisonPage";

/// Opaque reference to the view a route renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ViewRef(String);

impl ViewRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a route does once it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// Resolve another path instead of rendering.
    Redirect { to: String },

    /// Render `target` for a task id fixed by the route.
    FixedTask {
        task_id: String,
        title: Option<String>,
        target: ViewRef,
    },

    /// Render `target` for the task id captured by parameter `param`.
    ParameterizedTask {
        param: String,
        title: Option<String>,
        target: ViewRef,
    },
}

/// Declarative route definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    pub path: String,
    pub name: String,
    pub kind: RouteKind,
}

impl RouteDef {
    pub fn redirect(path: impl Into<String>, name: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            kind: RouteKind::Redirect { to: to.into() },
        }
    }

    pub fn fixed_task(
        path: impl Into<String>,
        name: impl Into<String>,
        task_id: impl Into<String>,
        target: ViewRef,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            kind: RouteKind::FixedTask {
                task_id: task_id.into(),
                title: None,
                target,
            },
        }
    }

    pub fn parameterized(
        path: impl Into<String>,
        name: impl Into<String>,
        param: impl Into<String>,
        target: ViewRef,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            kind: RouteKind::ParameterizedTask {
                param: param.into(),
                title: None,
                target,
            },
        }
    }

    /// Attach a page title. Redirect routes never apply a title.
    pub fn with_title(mut self, value: impl Into<String>) -> Self {
        match &mut self.kind {
            RouteKind::FixedTask { title, .. } | RouteKind::ParameterizedTask { title, .. } => {
                *title = Some(value.into());
            }
            RouteKind::Redirect { .. } => {}
        }
        self
    }

    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            RouteKind::FixedTask { title, .. } | RouteKind::ParameterizedTask { title, .. } => {
                title.as_deref()
            }
            RouteKind::Redirect { .. } => None,
        }
    }
}

/// The route table the viewer ships with.
pub fn default_routes() -> Vec<RouteDef> {
    let view = ViewRef::new(COMPARISON_VIEW);
    vec![
        RouteDef::redirect("/", "Home", "/comparison/task/sztaxi"),
        RouteDef::fixed_task("/comparison/task/idd", "DefaultComparison", "idd", view.clone())
            .with_title("DocuSpotlight - 演示"),
        RouteDef::parameterized("/comparison/task/:taskId", "ComparisonTask", "taskId", view),
    ]
}

/// Route table construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("route {name}: {source}")]
    Pattern {
        name: String,
        #[source]
        source: PatternError,
    },

    #[error("route name {0:?} declared more than once")]
    DuplicateName(String),

    #[error("literal path {0:?} declared more than once")]
    DuplicatePath(String),

    #[error("route {name}: {kind} routes need a literal path, got {path:?}")]
    ExpectedLiteral {
        name: String,
        kind: &'static str,
        path: String,
    },

    #[error("route {name}: pattern {path:?} does not capture parameter {param:?}")]
    MissingParam {
        name: String,
        path: String,
        param: String,
    },

    #[error("route {name}: redirect target {to:?} is not an absolute path")]
    RelativeRedirect { name: String, to: String },
}

/// A compiled route.
#[derive(Debug)]
pub struct Route {
    def: RouteDef,
    matcher: Box<dyn Matcher>,
}

impl Route {
    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn path(&self) -> &str {
        self.matcher.pattern()
    }

    pub fn kind(&self) -> &RouteKind {
        &self.def.kind
    }

    pub fn title(&self) -> Option<&str> {
        self.def.title()
    }
}

/// Immutable task router.
#[derive(Debug)]
pub struct TaskRouter {
    routes: Vec<Route>,
    /// Indices into `routes`, most specific first.
    scan_order: Vec<usize>,
    max_redirect_hops: usize,
}

impl TaskRouter {
    /// Compile and validate a route table.
    pub fn new(defs: Vec<RouteDef>, max_redirect_hops: usize) -> Result<Self, RouteTableError> {
        let mut names = HashSet::new();
        let mut literal_paths = HashSet::new();
        let mut routes = Vec::with_capacity(defs.len());

        for def in defs {
            let matcher = compile(&def.path).map_err(|source| RouteTableError::Pattern {
                name: def.name.clone(),
                source,
            })?;

            if !names.insert(def.name.clone()) {
                return Err(RouteTableError::DuplicateName(def.name));
            }

            let literal = matcher.specificity().is_literal();
            if literal && !literal_paths.insert(matcher.pattern().to_string()) {
                return Err(RouteTableError::DuplicatePath(matcher.pattern().to_string()));
            }

            match &def.kind {
                RouteKind::Redirect { to } => {
                    if !literal {
                        return Err(expected_literal(&def, "redirect"));
                    }
                    if !to.starts_with('/') {
                        return Err(RouteTableError::RelativeRedirect {
                            name: def.name.clone(),
                            to: to.clone(),
                        });
                    }
                }
                RouteKind::FixedTask { .. } => {
                    if !literal {
                        return Err(expected_literal(&def, "fixed task"));
                    }
                }
                RouteKind::ParameterizedTask { param, .. } => {
                    let sample = def.path.replace(&format!(":{param}"), "sample");
                    let captures = RequestPath::parse(&sample)
                        .ok()
                        .and_then(|path| matcher.match_path(&path))
                        .and_then(|m| m.get(param).map(str::to_owned));
                    if literal || captures.is_none() {
                        return Err(RouteTableError::MissingParam {
                            name: def.name.clone(),
                            path: def.path.clone(),
                            param: param.clone(),
                        });
                    }
                }
            }

            routes.push(Route { def, matcher });
        }

        warn_shadowing_order(&routes);

        let mut scan_order: Vec<usize> = (0..routes.len()).collect();
        // Stable sort keeps declaration order among equally specific routes.
        scan_order.sort_by(|a, b| {
            routes[*b]
                .matcher
                .specificity()
                .cmp(&routes[*a].matcher.specificity())
        });

        Ok(Self {
            routes,
            scan_order,
            max_redirect_hops,
        })
    }

    /// The viewer's route table.
    pub fn with_default_routes(max_redirect_hops: usize) -> Result<Self, RouteTableError> {
        Self::new(default_routes(), max_redirect_hops)
    }

    /// Find the route for `path`. Returns `None` if nothing matches,
    /// including when a segment does not decode to UTF-8.
    pub fn match_path(&self, path: &str) -> Option<(&Route, PathMatch)> {
        let path = match RequestPath::parse(path) {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!(error = %e, "Undecodable request path");
                return None;
            }
        };
        self.scan_order.iter().find_map(|&index| {
            let route = &self.routes[index];
            route.matcher.match_path(&path).map(|m| (route, m))
        })
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name() == name)
    }

    pub fn max_redirect_hops(&self) -> usize {
        self.max_redirect_hops
    }
}

fn expected_literal(def: &RouteDef, kind: &'static str) -> RouteTableError {
    RouteTableError::ExpectedLiteral {
        name: def.name.clone(),
        kind,
        path: def.path.clone(),
    }
}

/// Log parameterized routes declared ahead of literal routes they overlap.
/// Matching stays correct; the table just reads misleadingly.
fn warn_shadowing_order(routes: &[Route]) {
    for (i, earlier) in routes.iter().enumerate() {
        if earlier.matcher.specificity().is_literal() {
            continue;
        }
        for later in &routes[i + 1..] {
            if later.matcher.specificity().is_literal()
                && RequestPath::parse(later.matcher.pattern())
                    .is_ok_and(|path| earlier.matcher.match_path(&path).is_some())
            {
                tracing::warn!(
                    parameterized = %earlier.name(),
                    literal = %later.name(),
                    "Parameterized route declared before an overlapping literal route"
                );
            }
        }
    }
}
