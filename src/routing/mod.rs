//! Task routing subsystem.
//!
//! # Data Flow
//! ```text
//! Requested path (e.g. /comparison/task/xyz123?tab=diff)
//!     → matcher.rs (normalize, evaluate patterns)
//!     → router.rs (route lookup, most specific first)
//!     → guard.rs (Allow | Redirect | Reject, redirects followed)
//!     → Return: Resolution or NavigationError
//!
//! Route Compilation (at startup):
//!     RouteDef[]
//!     → Compile matchers, validate table
//!     → Sort by specificity (literal before parameterized)
//!     → Freeze as immutable TaskRouter
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by specificity, then declaration)

pub mod guard;
pub mod matcher;
pub mod router;

pub use guard::{GuardDecision, NavigationError, RenderTarget, Resolution};
pub use router::{default_routes, Route, RouteDef, RouteKind, RouteTableError, TaskRouter, ViewRef, COMPARISON_VIEW};
