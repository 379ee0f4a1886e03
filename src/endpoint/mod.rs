//! Backend endpoint subsystem.
//!
//! # Data Flow
//! ```text
//! observed host name + EndpointSettings (env overlay applied)
//!     → resolver.rs (local vs cluster branch, memoized once)
//!     → Arc<EndpointConfig> (immutable, session lifetime)
//!     → api.rs (typed backend URLs for the comparison view)
//! ```

pub mod api;
pub mod resolver;

pub use api::{ApiUrlError, BackendApi};
pub use resolver::{resolve_endpoint, EndpointBranch, EndpointConfig, EndpointResolver, LOCALHOST};
