//! Viewer shell composition.
//!
//! # Data Flow
//! ```text
//! ShellConfig
//!     → endpoint resolver (once)
//!     → theme.rs (mount on RenderingEngine)
//!     → notify.rs (install toast plugin)
//!     → routing + navigation (TaskRouter, Navigator)
//!     → app.rs (App, immutable for the session)
//! ```

pub mod app;
pub mod errors;
pub mod notify;
pub mod theme;

pub use app::{App, BootstrapError, DEFAULT_TITLE};
pub use errors::{ErrorDisposition, ErrorFilter};
pub use notify::{LogNotifier, Notifier, ToastOptions, ToastPlugin};
pub use theme::{ColorRole, EngineHandle, HeadlessEngine, RenderingEngine, Theme};
