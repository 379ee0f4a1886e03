//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overlay: BACKEND_PORT, PROTOCOL, K8S_HOST)
//!     → validation.rs (semantic checks)
//!     → ShellConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the endpoint it feeds is fixed for the session
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env_overrides, load_config, load_from_env, ConfigError};
pub use validation::{validate_config, ValidationError};
pub use schema::EndpointSettings;
pub use schema::ListenerConfig;
pub use schema::NotificationConfig;
pub use schema::ObservabilityConfig;
pub use schema::RoutingConfig;
pub use schema::ShellConfig;
pub use schema::ThemeConfig;
pub use schema::TimeoutConfig;
pub use schema::ToastPosition;
